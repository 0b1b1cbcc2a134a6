use std::fmt;
use std::str::FromStr;

/// Highest card value in a Cabo deck.
pub const MAX_VALUE: u8 = 13;

/// Unique identity of a physical card within one deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u16);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The special power granted by a deck-drawn card with value 7 through 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ActionKind {
    /// Look at one of your own cards.
    Peek,
    /// Look at one of the opponent's cards.
    Spy,
    /// Blindly exchange one of your cards with one of the opponent's.
    Swap,
    /// Look at an opponent card, then exchange it with one of yours.
    SpySwap,
}

impl ActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::Peek => "Peek",
            ActionKind::Spy => "Spy",
            ActionKind::Swap => "Swap",
            ActionKind::SpySwap => "Spy Swap",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed rule mapping a card value to its action, if any.
///
/// ```
/// use cabo_rs::cards::{action_type_for, ActionKind};
///
/// assert_eq!(action_type_for(7), Some(ActionKind::Peek));
/// assert_eq!(action_type_for(13), Some(ActionKind::SpySwap));
/// assert_eq!(action_type_for(6), None);
/// ```
pub const fn action_type_for(value: u8) -> Option<ActionKind> {
    match value {
        7 | 8 => Some(ActionKind::Peek),
        9 | 10 => Some(ActionKind::Spy),
        11 | 12 => Some(ActionKind::Swap),
        13 => Some(ActionKind::SpySwap),
        _ => None,
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card value: '{0}'")]
    Invalid(String),
    #[error("card value out of range 0..=13: {0}")]
    OutOfRange(u8),
    #[error("too many cards to number: {0}")]
    TooManyCards(usize),
}

/// A Cabo card: a point value (0..=13) plus a unique identity.
///
/// Two cards with the same value are still distinct cards; equality compares identity too.
///
/// ```
/// use cabo_rs::cards::{Card, CardId};
///
/// let card = Card::try_new(9, CardId(3)).unwrap();
/// assert_eq!(card.value(), 9);
/// assert_eq!(card.to_string(), "9");
/// assert!(Card::try_new(14, CardId(0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    value: u8,
    id: CardId,
}

impl Card {
    pub fn try_new(value: u8, id: CardId) -> Result<Self, CardParseError> {
        if value > MAX_VALUE {
            return Err(CardParseError::OutOfRange(value));
        }
        Ok(Self { value, id })
    }

    pub(crate) const fn new_unchecked(value: u8, id: CardId) -> Self {
        Self { value, id }
    }

    pub const fn value(self) -> u8 {
        self.value
    }

    pub const fn id(self) -> CardId {
        self.id
    }

    pub const fn action(self) -> Option<ActionKind> {
        action_type_for(self.value)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Parse a single card value ("0".."13").
pub fn parse_value(s: &str) -> Result<u8, CardParseError> {
    let t = s.trim();
    let v: u8 = t.parse().map_err(|_| CardParseError::Invalid(s.to_string()))?;
    if v > MAX_VALUE {
        return Err(CardParseError::OutOfRange(v));
    }
    Ok(v)
}

/// Parse multiple card values separated by whitespace or commas.
///
/// ```
/// use cabo_rs::cards::parse_values;
///
/// assert_eq!(parse_values("3, 5 13").unwrap(), vec![3, 5, 13]);
/// assert!(parse_values("3 x").is_err());
/// ```
pub fn parse_values(input: &str) -> Result<Vec<u8>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(parse_value)
        .collect()
}

impl FromStr for ActionKind {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-', '_'], "").as_str() {
            "peek" => Ok(ActionKind::Peek),
            "spy" => Ok(ActionKind::Spy),
            "swap" => Ok(ActionKind::Swap),
            "spyswap" => Ok(ActionKind::SpySwap),
            _ => Err(CardParseError::Invalid(s.to_string())),
        }
    }
}
