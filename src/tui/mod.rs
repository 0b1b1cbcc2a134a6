//! Ratatui front end. Holds no game rules: every key becomes an intent for the
//! engine, and everything drawn comes from [`crate::game::Game::view`].

pub mod app;
pub mod controller;
mod ui;
