use crate::hand::{Hand, Seat};

/// Added to the caller's value when their hand ends strictly higher than the opponent's.
pub const FAILED_CALL_PENALTY: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    Won(Seat),
    Tie,
}

/// Scored result of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundResult {
    /// Raw hand values, indexed by [`Seat::index`].
    pub hand_values: [u32; 2],
    /// Values after the failed-call penalty.
    pub finals: [u32; 2],
    pub caller: Option<Seat>,
    pub penalized: Option<Seat>,
    pub outcome: Outcome,
}

impl RoundResult {
    pub fn hand_value(&self, seat: Seat) -> u32 {
        self.hand_values[seat.index()]
    }

    pub fn final_value(&self, seat: Seat) -> u32 {
        self.finals[seat.index()]
    }
}

/// Score a finished round.
///
/// ```
/// use cabo_rs::hand::Seat;
/// use cabo_rs::scoring::{resolve_values, Outcome};
///
/// let r = resolve_values(12, 9, Some(Seat::Player));
/// assert_eq!(r.final_value(Seat::Player), 17);
/// assert_eq!(r.outcome, Outcome::Won(Seat::Opponent));
/// ```
pub fn resolve_values(player: u32, opponent: u32, caller: Option<Seat>) -> RoundResult {
    let hand_values = [player, opponent];
    let mut finals = hand_values;
    let penalized = caller.filter(|&c| hand_values[c.index()] > hand_values[c.other().index()]);
    if let Some(seat) = penalized {
        finals[seat.index()] += FAILED_CALL_PENALTY;
    }
    let outcome = match finals[0].cmp(&finals[1]) {
        std::cmp::Ordering::Less => Outcome::Won(Seat::Player),
        std::cmp::Ordering::Greater => Outcome::Won(Seat::Opponent),
        std::cmp::Ordering::Equal => Outcome::Tie,
    };
    RoundResult { hand_values, finals, caller, penalized, outcome }
}

pub fn resolve(player: &Hand, opponent: &Hand, caller: Option<Seat>) -> RoundResult {
    resolve_values(player.value(), opponent.value(), caller)
}

/// Cumulative session totals; lower is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    totals: [u32; 2],
    rounds: u32,
}

impl Scores {
    pub fn total(&self, seat: Seat) -> u32 {
        self.totals[seat.index()]
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn record(&mut self, result: &RoundResult) {
        for seat in Seat::BOTH {
            self.totals[seat.index()] += result.final_value(seat);
        }
        self.rounds += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_call_is_penalized() {
        let r = resolve_values(12, 9, Some(Seat::Player));
        assert_eq!(r.finals, [17, 9]);
        assert_eq!(r.penalized, Some(Seat::Player));
        assert_eq!(r.outcome, Outcome::Won(Seat::Opponent));
    }

    #[test]
    fn successful_call_has_no_penalty() {
        let r = resolve_values(5, 9, Some(Seat::Player));
        assert_eq!(r.finals, [5, 9]);
        assert_eq!(r.penalized, None);
        assert_eq!(r.outcome, Outcome::Won(Seat::Player));
    }

    #[test]
    fn opponent_caller_penalized_symmetrically() {
        let r = resolve_values(4, 10, Some(Seat::Opponent));
        assert_eq!(r.finals, [4, 15]);
        assert_eq!(r.penalized, Some(Seat::Opponent));
    }

    #[test]
    fn equal_values_do_not_penalize_and_tie() {
        let r = resolve_values(8, 8, Some(Seat::Opponent));
        assert_eq!(r.penalized, None);
        assert_eq!(r.outcome, Outcome::Tie);
    }

    #[test]
    fn no_caller_no_adjustment() {
        let r = resolve_values(30, 2, None);
        assert_eq!(r.finals, [30, 2]);
        assert_eq!(r.outcome, Outcome::Won(Seat::Opponent));
    }

    #[test]
    fn caller_with_lower_hand_keeps_raw_values() {
        let r = resolve_values(9, 4, Some(Seat::Opponent));
        assert_eq!(r.finals, [9, 4]);
        assert_eq!(r.outcome, Outcome::Won(Seat::Opponent));
    }

    #[test]
    fn scores_accumulate_adjusted_values() {
        let mut s = Scores::default();
        s.record(&resolve_values(12, 9, Some(Seat::Player)));
        s.record(&resolve_values(3, 7, None));
        assert_eq!(s.total(Seat::Player), 20);
        assert_eq!(s.total(Seat::Opponent), 16);
        assert_eq!(s.rounds(), 2);
    }
}
