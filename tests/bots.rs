use cabo_rs::agents::{
    AgentKind, AgentTable, BotAgent, BotProfile, DecisionSource, Intent, OpponentPolicy,
    PlayerAgent,
};
use cabo_rs::deck::Deck;
use cabo_rs::engine::TableEngine;
use cabo_rs::game::{DrawSource, Game, GameConfig, OpponentMove, Phase};
use cabo_rs::hand::Seat;

/// Always the same slot and roll.
struct Fixed {
    slot: usize,
    roll: f64,
}

impl DecisionSource for Fixed {
    fn pick_slot(&mut self) -> usize {
        self.slot
    }
    fn roll(&mut self) -> f64 {
        self.roll
    }
}

fn after_setup(deck_tail: &[u8]) -> Game {
    let mut values = vec![5, 1, 2, 3, 6, 4, 4, 6, 0];
    values.extend_from_slice(deck_tail);
    let mut g = Game::with_deck(GameConfig::default(), Deck::stacked(&values).unwrap()).unwrap();
    g.reveal_setup_slot(0).unwrap();
    g.reveal_setup_slot(1).unwrap();
    g
}

#[test]
fn bot_ignores_other_seat() {
    let mut g = after_setup(&[3, 3]);
    let mut bot = BotAgent::new(BotProfile::default().with_seed(1));
    assert!(!bot.on_turn(&mut g, Seat::Opponent).unwrap());
    assert_eq!(g.current(), Seat::Player);
    assert_eq!(g.deck_len(), 2);
}

#[test]
fn bot_turn_replaces_and_passes() {
    let mut g = after_setup(&[3, 7, 9]);
    g.draw_from_deck().unwrap();
    g.select_own_slot(0).unwrap();
    let mut bot = BotAgent::new(BotProfile::default().with_seed(3));
    assert!(bot.on_turn(&mut g, Seat::Opponent).unwrap());

    assert_eq!(g.deck_len(), 1);
    assert_eq!(g.hand(Seat::Opponent).values().iter().filter(|&&v| v == 7).count(), 1);
    assert!(matches!(g.phase(), Phase::Playing | Phase::FinalRound));
}

#[test]
fn declared_call_gives_player_the_last_turn() {
    let mut g = after_setup(&[3, 7, 9]);
    g.draw_from_deck().unwrap();
    g.discard_drawn_card().unwrap();
    let mv = OpponentPolicy::decide(g.phase(), &mut Fixed { slot: 1, roll: 0.01 });
    assert_eq!(mv, OpponentMove { slot: 1, declare: true });
    g.play_opponent_turn(mv).unwrap();

    assert_eq!(g.caller(), Some(Seat::Opponent));
    assert_eq!(g.phase(), Phase::FinalRound);
    assert_eq!(g.current(), Seat::Player);
    assert!(g.status().starts_with("Bot called CABO!"));
    assert_eq!(g.declare_call(), Err(cabo_rs::game::IntentError::WrongPhase(Phase::FinalRound)));
}

#[test]
fn final_round_move_never_declares() {
    let mv = OpponentPolicy::decide(Phase::FinalRound, &mut Fixed { slot: 0, roll: 0.0 });
    assert!(!mv.declare);
}

#[test]
fn table_routes_human_intents_and_bot_moves() {
    let mut g = after_setup(&[3, 7, 9, 9]);
    let mut table = AgentTable::human_vs_bot(BotProfile::default().with_seed(9));
    assert_eq!(table.agent_kind(Seat::Player), Some(AgentKind::Human));
    assert_eq!(table.agent_kind(Seat::Opponent), Some(AgentKind::Bot));

    assert!(table.submit(&mut g, Seat::Player, Intent::Draw(DrawSource::Deck)).unwrap());
    assert!(table.submit(&mut g, Seat::Player, Intent::Select(Seat::Player, 2)).unwrap());
    assert_eq!(g.current(), Seat::Opponent);

    // Off-turn input is dropped.
    assert!(!table.submit(&mut g, Seat::Player, Intent::Draw(DrawSource::Deck)).unwrap());
    assert_eq!(g.deck_len(), 3);

    assert!(table.on_turn(&mut g).unwrap());
    assert_eq!(g.deck_len(), 2);
}

#[test]
fn seeded_sessions_replay_identically() {
    fn play(seed: u64) -> (Vec<String>, [u32; 2]) {
        let mut g = Game::new(GameConfig { seed: Some(seed) });
        let mut table = AgentTable::human_vs_bot(BotProfile::default().with_seed(seed));
        g.reveal_setup_slot(0).unwrap();
        g.reveal_setup_slot(1).unwrap();
        while g.phase() != Phase::RoundOver {
            match g.current() {
                Seat::Player => {
                    g.draw(DrawSource::Deck).unwrap();
                    if g.phase() != Phase::RoundOver {
                        g.skip_drawn_card().unwrap();
                    }
                }
                Seat::Opponent => {
                    table.on_turn(&mut g).unwrap();
                }
            }
        }
        let log = g.log().iter().map(|e| format!("{} {}", e.seat, e.event.describe())).collect();
        let r = g.last_result().unwrap();
        (log, r.finals)
    }

    assert_eq!(play(21), play(21));
}
