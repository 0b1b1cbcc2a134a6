// Engine API boundary. Agents drive turns through this trait instead of
// reaching into `Game`; a scripted engine can stand in for tests.

use crate::game::{DrawSource, IntentError, OpponentMove, Phase};
use crate::hand::Seat;

pub trait TableEngine {
    // Player intents
    fn draw(&mut self, source: DrawSource) -> Result<(), IntentError>;
    fn select_slot(&mut self, owner: Seat, slot: usize) -> Result<(), IntentError>;
    fn use_action_card(&mut self) -> Result<(), IntentError>;
    fn skip_drawn_card(&mut self) -> Result<(), IntentError>;
    fn continue_action(&mut self) -> Result<(), IntentError>;
    fn declare_call(&mut self) -> Result<(), IntentError>;

    // Opponent
    fn play_opponent_turn(&mut self, mv: OpponentMove) -> Result<(), IntentError>;

    // Queries
    fn phase(&self) -> Phase;
    fn current(&self) -> Seat;
}

impl TableEngine for crate::game::Game {
    fn draw(&mut self, source: DrawSource) -> Result<(), IntentError> {
        match source {
            DrawSource::Deck => self.draw_from_deck(),
            DrawSource::Discard => self.draw_from_discard(),
        }
    }
    fn select_slot(&mut self, owner: Seat, slot: usize) -> Result<(), IntentError> {
        match owner {
            Seat::Player => self.select_own_slot(slot),
            Seat::Opponent => self.select_opponent_slot(slot),
        }
    }
    fn use_action_card(&mut self) -> Result<(), IntentError> {
        self.use_action_card()
    }
    // One key covers both "skip the action" and "discard the drawn card".
    fn skip_drawn_card(&mut self) -> Result<(), IntentError> {
        match self.drawn_card().and_then(|c| c.action()) {
            Some(_) if self.drawn_source() == Some(DrawSource::Deck) => self.skip_action_card(),
            _ => self.discard_drawn_card(),
        }
    }
    fn continue_action(&mut self) -> Result<(), IntentError> {
        self.continue_action()
    }
    fn declare_call(&mut self) -> Result<(), IntentError> {
        self.declare_call()
    }

    fn play_opponent_turn(&mut self, mv: OpponentMove) -> Result<(), IntentError> {
        self.play_opponent_turn(mv)
    }

    fn phase(&self) -> Phase {
        self.phase()
    }
    fn current(&self) -> Seat {
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentTable, BotProfile, Intent};

    /// Accepts any intent and records what reached it.
    #[derive(Default)]
    struct Recorder {
        current: Option<Seat>,
        calls: Vec<String>,
    }

    impl Recorder {
        fn note(&mut self, call: String) -> Result<(), IntentError> {
            self.calls.push(call);
            Ok(())
        }
    }

    impl TableEngine for Recorder {
        fn draw(&mut self, source: DrawSource) -> Result<(), IntentError> {
            self.note(format!("draw {source:?}"))
        }
        fn select_slot(&mut self, owner: Seat, slot: usize) -> Result<(), IntentError> {
            self.note(format!("select {owner:?} {slot}"))
        }
        fn use_action_card(&mut self) -> Result<(), IntentError> {
            self.note("use".into())
        }
        fn skip_drawn_card(&mut self) -> Result<(), IntentError> {
            self.note("skip".into())
        }
        fn continue_action(&mut self) -> Result<(), IntentError> {
            self.note("continue".into())
        }
        fn declare_call(&mut self) -> Result<(), IntentError> {
            self.note("call".into())
        }
        fn play_opponent_turn(&mut self, mv: OpponentMove) -> Result<(), IntentError> {
            self.current = Some(Seat::Player);
            self.note(format!("opponent {}", mv.slot))
        }
        fn phase(&self) -> Phase {
            Phase::Playing
        }
        fn current(&self) -> Seat {
            self.current.unwrap_or(Seat::Player)
        }
    }

    #[test]
    fn agents_need_nothing_beyond_the_trait() {
        let mut engine = Recorder::default();
        let mut table = AgentTable::human_vs_bot(BotProfile::default().with_seed(4));

        assert!(table.submit(&mut engine, Seat::Player, Intent::Draw(DrawSource::Deck)).unwrap());
        assert!(table.submit(&mut engine, Seat::Player, Intent::Select(Seat::Player, 1)).unwrap());
        engine.current = Some(Seat::Opponent);
        assert!(table.on_turn(&mut engine).unwrap());

        assert_eq!(engine.calls.len(), 3);
        assert_eq!(engine.calls[..2], ["draw Deck", "select Player 1"]);
        assert!(engine.calls[2].starts_with("opponent "));
        assert_eq!(engine.current(), Seat::Player);
    }
}
