//! cabo-rs: a two-player round of Cabo, human against a bot
//!
//! Goals:
//! - The whole round is one sequential state machine owned by [`game::Game`]
//! - Illegal inputs are rejected with an error and leave the round untouched
//! - Randomness is injectable so rounds can be replayed exactly
//!
//! ## Quick start: script a round
//! ```
//! use cabo_rs::deck::Deck;
//! use cabo_rs::game::{Game, GameConfig, OpponentMove, Phase};
//! use cabo_rs::hand::Seat;
//!
//! // You: 5 1 2 3, Bot: 6 4 4 6, discard 0, then the deck.
//! let deck = Deck::stacked_from_str("5 1 2 3 6 4 4 6 0 3 9").unwrap();
//! let mut game = Game::with_deck(GameConfig::default(), deck).unwrap();
//! game.reveal_setup_slot(0).unwrap();
//! game.reveal_setup_slot(1).unwrap();
//!
//! game.draw_from_deck().unwrap();
//! game.select_own_slot(0).unwrap(); // the 3 replaces the 5
//! assert_eq!(game.hand(Seat::Player).values(), [3, 1, 2, 3]);
//!
//! game.play_opponent_turn(OpponentMove { slot: 2, declare: true }).unwrap();
//! assert_eq!(game.phase(), Phase::FinalRound);
//! assert_eq!(game.current(), Seat::Player);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin cabo-rs
//! ```
//! Set `CABO_LOG=debug` to write a log file.

pub mod action;
pub mod agents;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod logging;
pub mod scoring;
pub mod tui;
pub mod visibility;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
