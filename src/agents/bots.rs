use crate::engine::TableEngine;
use crate::game::{IntentError, OpponentMove, Phase};
use crate::hand::{Seat, HAND_SIZE};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};

use super::{AgentKind, PlayerAgent};

/// Chance that the opponent calls Cabo after an ordinary turn.
pub const CALL_PROBABILITY: f64 = 0.15;

/// Randomness the opponent policy consumes. Every `rand::Rng` is one; tests
/// can script exact sequences.
pub trait DecisionSource {
    /// A slot index in `0..HAND_SIZE`, uniformly.
    fn pick_slot(&mut self) -> usize;
    /// A probability roll in `[0, 1)`.
    fn roll(&mut self) -> f64;
}

impl<R: Rng> DecisionSource for R {
    fn pick_slot(&mut self) -> usize {
        self.random_range(0..HAND_SIZE)
    }

    fn roll(&mut self) -> f64 {
        self.random()
    }
}

/// The opponent's whole decision procedure. It ignores its own knowledge and
/// the action cards entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentPolicy;

impl OpponentPolicy {
    /// Pick the slot to replace and, outside the final round, roll once for the call.
    ///
    /// ```
    /// use cabo_rs::agents::OpponentPolicy;
    /// use cabo_rs::game::Phase;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(5);
    /// let mv = OpponentPolicy::decide(Phase::FinalRound, &mut rng);
    /// assert!(mv.slot < 4);
    /// assert!(!mv.declare);
    /// ```
    pub fn decide<S: DecisionSource + ?Sized>(phase: Phase, source: &mut S) -> OpponentMove {
        let slot = source.pick_slot().min(HAND_SIZE - 1);
        let declare = phase == Phase::Playing && source.roll() < CALL_PROBABILITY;
        OpponentMove { slot, declare }
    }
}

/// Pacing and seeding for the bot seat.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    /// Think time before every move. Display only; zero plays at once.
    pub delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// A fixed think time of `delay_ms` before every move.
    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self { delay_ms, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::with_delay_ms(0)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// The automated opponent: waits out its think time, then plays one
/// [`OpponentPolicy`] move.
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, next_action_at: None }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, IntentError> {
        if !matches!(engine.phase(), Phase::Playing | Phase::FinalRound) {
            self.next_action_at = None;
            return Ok(false);
        }
        if engine.current() != seat {
            return Ok(false);
        }
        // Waiting never touches the rng, so decisions do not depend on tick timing.
        let now = Instant::now();
        if self.profile.delay_ms > 0 {
            match self.next_action_at {
                None => {
                    self.next_action_at = Some(now + Duration::from_millis(self.profile.delay_ms));
                    return Ok(false);
                }
                Some(next) if now < next => {
                    return Ok(false);
                }
                Some(_) => {}
            }
        }
        self.next_action_at = None;

        let mv = OpponentPolicy::decide(engine.phase(), &mut self.state.rng);
        tracing::debug!(slot = mv.slot, declare = mv.declare, "bot decided");
        engine.play_opponent_turn(mv).map(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crate::game::{Game, GameConfig};
    use std::collections::VecDeque;
    use std::thread;

    struct Scripted {
        slots: VecDeque<usize>,
        rolls: VecDeque<f64>,
    }

    impl DecisionSource for Scripted {
        fn pick_slot(&mut self) -> usize {
            self.slots.pop_front().unwrap_or(0)
        }
        fn roll(&mut self) -> f64 {
            self.rolls.pop_front().unwrap_or(1.0)
        }
    }

    fn scripted(slots: &[usize], rolls: &[f64]) -> Scripted {
        Scripted { slots: slots.iter().copied().collect(), rolls: rolls.iter().copied().collect() }
    }

    fn bot_to_move() -> Game {
        let deck = Deck::stacked(&[5, 1, 2, 3, 6, 4, 4, 6, 0, 3, 9, 9, 9]).unwrap();
        let mut g = Game::with_deck(GameConfig::default(), deck).unwrap();
        g.reveal_setup_slot(0).unwrap();
        g.reveal_setup_slot(1).unwrap();
        g.draw_from_deck().unwrap();
        g.discard_drawn_card().unwrap();
        g
    }

    #[test]
    fn roll_below_threshold_declares() {
        let mv = OpponentPolicy::decide(Phase::Playing, &mut scripted(&[2], &[0.14]));
        assert_eq!(mv, OpponentMove { slot: 2, declare: true });
        let mv = OpponentPolicy::decide(Phase::Playing, &mut scripted(&[1], &[0.15]));
        assert_eq!(mv, OpponentMove { slot: 1, declare: false });
    }

    #[test]
    fn final_round_never_rolls() {
        let mut src = scripted(&[3], &[0.0]);
        let mv = OpponentPolicy::decide(Phase::FinalRound, &mut src);
        assert!(!mv.declare);
        assert_eq!(src.rolls.len(), 1, "roll left unconsumed");
    }

    #[test]
    fn out_of_range_slot_is_clamped() {
        let mv = OpponentPolicy::decide(Phase::Playing, &mut scripted(&[9], &[0.9]));
        assert_eq!(mv.slot, HAND_SIZE - 1);
    }

    #[test]
    fn rng_source_is_uniform_enough() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut hits = [0usize; HAND_SIZE];
        let mut calls = 0;
        for _ in 0..4000 {
            let mv = OpponentPolicy::decide(Phase::Playing, &mut rng);
            hits[mv.slot] += 1;
            calls += usize::from(mv.declare);
        }
        assert!(hits.iter().all(|&h| h > 850), "{hits:?}");
        assert!((450..750).contains(&calls), "{calls}");
    }

    #[test]
    fn bot_plays_after_its_delay() {
        let mut g = bot_to_move();
        let mut bot = BotAgent::new(BotProfile::with_delay_ms(15).with_seed(7));

        // First tick only schedules the move.
        assert!(!bot.on_turn(&mut g, Seat::Opponent).unwrap());
        assert_eq!(g.current(), Seat::Opponent);
        assert_eq!(g.deck_len(), 3);

        thread::sleep(Duration::from_millis(20));
        assert!(bot.on_turn(&mut g, Seat::Opponent).unwrap());
        assert_eq!(g.deck_len(), 2);
        assert_eq!(g.discard().len(), 3);
    }

    #[test]
    fn waiting_ticks_do_not_change_the_decision() {
        let mut paced = bot_to_move();
        let mut instant = bot_to_move();
        let mut slow = BotAgent::new(BotProfile::with_delay_ms(15).with_seed(7));
        let mut fast = BotAgent::new(BotProfile::default().with_seed(7));

        for _ in 0..5 {
            assert!(!slow.on_turn(&mut paced, Seat::Opponent).unwrap());
        }
        thread::sleep(Duration::from_millis(20));
        assert!(slow.on_turn(&mut paced, Seat::Opponent).unwrap());
        assert!(fast.on_turn(&mut instant, Seat::Opponent).unwrap());

        let describe = |g: &Game| -> Vec<String> { g.log().iter().map(|e| e.event.describe()).collect() };
        assert_eq!(describe(&paced), describe(&instant));
        assert_eq!(paced.phase(), instant.phase());
    }

    #[test]
    fn bot_idle_outside_live_round() {
        let deck = Deck::stacked(&[1; 12]).unwrap();
        let mut g = Game::with_deck(GameConfig::default(), deck).unwrap();
        let mut bot = BotAgent::new(BotProfile::default());
        assert!(!bot.on_turn(&mut g, Seat::Opponent).unwrap());
        assert_eq!(g.phase(), Phase::Setup);
    }

    #[test]
    fn bot_does_not_act_for_the_player() {
        let deck = Deck::stacked(&[1; 12]).unwrap();
        let mut g = Game::with_deck(GameConfig::default(), deck).unwrap();
        g.reveal_setup_slot(0).unwrap();
        g.reveal_setup_slot(1).unwrap();
        let mut bot = BotAgent::new(BotProfile::default().with_seed(2));
        assert!(!bot.on_turn(&mut g, Seat::Opponent).unwrap());
        assert_eq!(g.deck_len(), 3);
    }
}
