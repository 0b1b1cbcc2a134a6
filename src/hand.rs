use crate::cards::Card;
use std::fmt;

/// Number of slots in every hand.
pub const HAND_SIZE: usize = 4;

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    /// The human player.
    Player,
    /// The automated opponent.
    Opponent,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::Player, Seat::Opponent];

    pub const fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Seat::Player => "You",
            Seat::Opponent => "Bot",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed four-slot hand. Slots are replaced in place, never added or removed.
///
/// ```
/// use cabo_rs::deck::Deck;
/// use cabo_rs::hand::Hand;
///
/// let mut deck = Deck::stacked(&[3, 0, 12, 5]).unwrap();
/// let hand = Hand::new([
///     deck.draw().unwrap(),
///     deck.draw().unwrap(),
///     deck.draw().unwrap(),
///     deck.draw().unwrap(),
/// ]);
/// assert_eq!(hand.value(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    slots: [Card; HAND_SIZE],
}

impl Hand {
    pub const fn new(slots: [Card; HAND_SIZE]) -> Self {
        Self { slots }
    }

    pub fn get(&self, slot: usize) -> Option<Card> {
        self.slots.get(slot).copied()
    }

    pub fn as_array(&self) -> &[Card; HAND_SIZE] {
        &self.slots
    }

    pub fn values(&self) -> [u8; HAND_SIZE] {
        self.slots.map(|c| c.value())
    }

    /// Sum of the true slot values, regardless of who knows them.
    pub fn value(&self) -> u32 {
        hand_value(&self.slots)
    }

    /// Put `card` into `slot`, returning the card it displaced.
    pub(crate) fn replace(&mut self, slot: usize, card: Card) -> Card {
        std::mem::replace(&mut self.slots[slot], card)
    }
}

/// Sum of card values; independent of slot order.
pub fn hand_value(cards: &[Card]) -> u32 {
    cards.iter().map(|c| u32::from(c.value())).sum()
}

/// Exchange `a_slot` of `a` with `b_slot` of `b`.
pub(crate) fn exchange(a: &mut Hand, a_slot: usize, b: &mut Hand, b_slot: usize) {
    std::mem::swap(&mut a.slots[a_slot], &mut b.slots[b_slot]);
}
