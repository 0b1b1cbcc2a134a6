use crate::cards::{parse_values, Card, CardId, CardParseError, MAX_VALUE};
use crate::hand::{Hand, HAND_SIZE};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of cards in a full Cabo deck.
pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PileError {
    #[error("no cards left in pile")]
    EmptyPile,
}

/// Copies of `value` in a full deck: two of 0 and 13, four of everything else.
pub const fn copies_of(value: u8) -> usize {
    match value {
        0 | MAX_VALUE => 2,
        _ => 4,
    }
}

/// The draw pile. The top of the deck is the end of the vector.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// An unshuffled 52-card Cabo deck.
    ///
    /// ```
    /// use cabo_rs::deck::Deck;
    ///
    /// let deck = Deck::cabo();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn cabo() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        let mut next_id = 0u16;
        for value in 0..=MAX_VALUE {
            for _ in 0..copies_of(value) {
                cards.push(Card::new_unchecked(value, CardId(next_id)));
                next_id += 1;
            }
        }
        Self { cards }
    }

    /// A deck whose draw order is exactly `values`, first element on top.
    ///
    /// Useful for scripting rounds; the composition rule is not enforced.
    pub fn stacked(values: &[u8]) -> Result<Self, CardParseError> {
        let mut cards = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let id = u16::try_from(i).map_err(|_| CardParseError::TooManyCards(values.len()))?;
                Card::try_new(v, CardId(id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        cards.reverse();
        Ok(Self { cards })
    }

    /// Parse a stacked deck from text, e.g. `"3 5 7, 0"`.
    pub fn stacked_from_str(input: &str) -> Result<Self, CardParseError> {
        Self::stacked(&parse_values(input)?)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().rev()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Fisher-Yates shuffle with the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Result<Card, PileError> {
        self.cards.pop().ok_or(PileError::EmptyPile)
    }
}

/// Compose a fresh deck and shuffle it uniformly.
///
/// ```
/// use cabo_rs::deck::build_deck;
/// use rand::SeedableRng;
///
/// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
/// assert_eq!(build_deck(&mut rng).len(), 52);
/// ```
pub fn build_deck<R: Rng + ?Sized>(rng: &mut R) -> Deck {
    let mut deck = Deck::cabo();
    deck.shuffle_with(rng);
    deck
}

/// Face-up discard pile; only the most recent card can be drawn.
#[derive(Debug, Clone, Default)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn draw(&mut self) -> Result<Card, PileError> {
        self.cards.pop().ok_or(PileError::EmptyPile)
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

/// Result of dealing a round.
#[derive(Debug, Clone)]
pub struct Deal {
    pub player: Hand,
    pub opponent: Hand,
    pub discard: DiscardPile,
    pub deck: Deck,
}

/// Cards consumed by a deal: two hands plus the first discard.
pub const DEAL_SIZE: usize = 2 * HAND_SIZE + 1;

/// Deal four cards to the player, then four to the opponent, then seed the discard pile.
pub fn deal(deck: Deck) -> Result<Deal, PileError> {
    if deck.len() < DEAL_SIZE {
        return Err(PileError::EmptyPile);
    }
    Ok(split_deal(deck.cards))
}

/// Build, shuffle and deal a fresh round. A full deck always covers the deal.
pub fn deal_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Deal {
    split_deal(build_deck(rng).cards)
}

// Caller guarantees `cards.len() >= DEAL_SIZE`.
fn split_deal(mut cards: Vec<Card>) -> Deal {
    let n = cards.len();
    let from_top = |i: usize| cards[n - 1 - i];
    let player = Hand::new([from_top(0), from_top(1), from_top(2), from_top(3)]);
    let opponent = Hand::new([from_top(4), from_top(5), from_top(6), from_top(7)]);
    let mut discard = DiscardPile::new();
    discard.push(from_top(8));
    cards.truncate(n - DEAL_SIZE);
    Deal { player, opponent, discard, deck: Deck { cards } }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(deck: &Deck) -> [usize; 14] {
        let mut counts = [0usize; 14];
        for c in deck.iter() {
            counts[c.value() as usize] += 1;
        }
        counts
    }

    #[test]
    fn cabo_deck_composition() {
        let d = Deck::cabo();
        assert_eq!(d.len(), DECK_SIZE);
        let counts = counts(&d);
        assert_eq!(counts[0], 2);
        assert_eq!(counts[13], 2);
        for v in 1..=12 {
            assert_eq!(counts[v], 4, "value {v}");
        }
    }

    #[test]
    fn deck_size_is_the_sum_of_copies() {
        let total: usize = (0..=MAX_VALUE).map(copies_of).sum();
        assert_eq!(total, 52);
        assert_eq!(DECK_SIZE, total);
    }

    #[test]
    fn card_ids_are_unique() {
        let d = Deck::cabo();
        let mut ids: Vec<_> = d.iter().map(|c| c.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::cabo();
        let mut d2 = Deck::cabo();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
        assert_eq!(counts(&d1), counts(&Deck::cabo()));
    }

    #[test]
    fn stacked_deck_draws_in_order() {
        let mut d = Deck::stacked_from_str("3 5 13").unwrap();
        assert_eq!(d.draw().unwrap().value(), 3);
        assert_eq!(d.draw().unwrap().value(), 5);
        assert_eq!(d.draw().unwrap().value(), 13);
        assert_eq!(d.draw(), Err(PileError::EmptyPile));
    }

    #[test]
    fn deal_order_player_opponent_discard() {
        let deck = Deck::stacked(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
        let dealt = deal(deck).unwrap();
        assert_eq!(dealt.player.values(), [1, 2, 3, 4]);
        assert_eq!(dealt.opponent.values(), [5, 6, 7, 8]);
        assert_eq!(dealt.discard.top().map(|c| c.value()), Some(9));
        assert_eq!(dealt.deck.len(), 1);
    }

    #[test]
    fn deal_from_short_deck_fails() {
        let deck = Deck::stacked(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(deal(deck).err(), Some(PileError::EmptyPile));
    }

    #[test]
    fn stacked_deck_rejects_more_cards_than_ids() {
        let full = vec![1u8; usize::from(u16::MAX) + 1];
        assert_eq!(Deck::stacked(&full).map(|d| d.len()), Ok(full.len()));
        let over = vec![1u8; full.len() + 1];
        assert_eq!(Deck::stacked(&over).err(), Some(CardParseError::TooManyCards(over.len())));
    }

    #[test]
    fn shuffled_deal_leaves_43_cards() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let dealt = deal_shuffled(&mut rng);
        assert_eq!(dealt.deck.len(), 43);
        assert_eq!(dealt.discard.len(), 1);
    }

    #[test]
    fn discard_pile_exposes_only_top() {
        let mut pile = DiscardPile::new();
        assert_eq!(pile.draw(), Err(PileError::EmptyPile));
        let mut d = Deck::stacked(&[4, 9]).unwrap();
        pile.push(d.draw().unwrap());
        pile.push(d.draw().unwrap());
        assert_eq!(pile.top().map(|c| c.value()), Some(9));
        assert_eq!(pile.draw().unwrap().value(), 9);
        assert_eq!(pile.len(), 1);
    }
}
