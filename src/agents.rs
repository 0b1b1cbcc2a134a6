//! Agents: pluggable controllers for the two seats.
//!
//! `PlayerAgent` is the seat-level trait and `AgentTable` coordinates which
//! agent sits where. It lives in the library so the TUI stays thin and does
//! not need to schedule the opponent itself.

use crate::engine::TableEngine;
use crate::game::{DrawSource, IntentError, Phase};
use crate::hand::Seat;
use core::fmt;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Seat-level intents, typically produced by a UI for the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    Draw(DrawSource),
    Select(Seat, usize),
    UseAction,
    /// Skip the drawn action card, or discard a plain deck draw.
    SkipDrawn,
    Continue,
    DeclareCall,
}

/// A seat controller that acts for its seat when it is allowed to.
pub trait PlayerAgent {
    /// Called when `seat` may act. Returns whether anything was applied.
    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, IntentError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an intent; default is to ignore and return false.
    fn receive(&mut self, _intent: Intent) -> bool {
        false
    }
}

mod bots;

pub use bots::{BotAgent, BotProfile, DecisionSource, OpponentPolicy, CALL_PROBABILITY};

/// Executes intents queued by a UI.
pub struct HumanAgent {
    pending: Option<Intent>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, intent: Intent) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(intent);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, IntentError> {
        // Input outside our own turn is dropped, never replayed later.
        let Some(intent) = self.pending.take() else {
            return Ok(false);
        };
        if engine.phase() == Phase::RoundOver || engine.current() != seat {
            return Ok(false);
        }
        match intent {
            Intent::Draw(source) => engine.draw(source),
            Intent::Select(owner, slot) => engine.select_slot(owner, slot),
            Intent::UseAction => engine.use_action_card(),
            Intent::SkipDrawn => engine.skip_drawn_card(),
            Intent::Continue => engine.continue_action(),
            Intent::DeclareCall => engine.declare_call(),
        }
        .map(|_| true)
    }
}

/// One optional agent per seat. Bot pacing lives in [`BotProfile`].
pub struct AgentTable {
    seats: [Option<Box<dyn PlayerAgent>>; 2],
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    /// A table with both seats empty.
    pub fn new() -> Self {
        Self { seats: [None, None] }
    }

    /// The usual table: a human player against a bot with `profile`.
    pub fn human_vs_bot(profile: BotProfile) -> Self {
        let mut table = Self::new();
        table.set_agent(Seat::Player, Some(Box::new(HumanAgent::new())));
        table.set_agent(Seat::Opponent, Some(Box::new(BotAgent::new(profile))));
        table
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: Seat, agent: Option<Box<dyn PlayerAgent>>) {
        self.seats[seat.index()] = agent;
    }

    pub fn agent_kind(&self, seat: Seat) -> Option<AgentKind> {
        self.seats[seat.index()].as_deref().map(|ag| ag.kind())
    }

    pub fn has_agent(&self, seat: Seat) -> bool {
        self.seats[seat.index()].is_some()
    }

    /// Whether any non-human agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| ag.kind() == AgentKind::Bot)
    }

    /// Send an intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: Seat, intent: Intent) -> bool {
        match self.seats[seat.index()].as_mut() {
            Some(agent) => agent.receive(intent),
            None => false,
        }
    }

    /// Queue `intent` for `seat` and let that seat act on it immediately.
    pub fn submit(
        &mut self,
        engine: &mut dyn TableEngine,
        seat: Seat,
        intent: Intent,
    ) -> Result<bool, IntentError> {
        if !self.receive(seat, intent) {
            return Ok(false);
        }
        match self.seats[seat.index()].as_mut() {
            Some(agent) => agent.on_turn(engine, seat),
            None => Ok(false),
        }
    }

    /// Drive the agent at the current seat, if any.
    pub fn on_turn(&mut self, engine: &mut dyn TableEngine) -> Result<bool, IntentError> {
        let seat = engine.current();
        match self.seats[seat.index()].as_mut() {
            Some(agent) => agent.on_turn(engine, seat),
            None => Ok(false),
        }
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        self.seats = [None, None];
    }
}
