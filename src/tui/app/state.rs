use crate::agents::{AgentTable, BotProfile, Intent};
use crate::game::{DrawSource, Game, GameConfig, Phase};
use crate::hand::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewRound,
    DrawDeck,
    DrawDiscard,
    SelectOwn(usize),
    SelectOpponent(usize),
    UseAction,
    SkipDrawn,
    Continue,
    CallCabo,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub game: Game,
    pub agents: AgentTable,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_bot_delay_ms: u64,
    pub bot_delay_ms: u64,
    pub cfg_seed: Option<u64>,
    pub seed: Option<u64>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
}

impl Default for AppState {
    fn default() -> Self {
        let delay = Self::DEFAULT_BOT_DELAY_MS;
        Self {
            scene: Scene::Menu,
            game: Game::new(GameConfig::default()),
            agents: AgentTable::human_vs_bot(Self::bot_profile(delay, None)),
            menu_index: 0,
            cfg_bot_delay_ms: delay,
            bot_delay_ms: delay,
            cfg_seed: None,
            seed: None,
            help_open: false,
            history_open: false,
            history_offset: 0,
        }
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    pub const DEFAULT_BOT_DELAY_MS: u64 = 800;

    /// Hand a player intent to the human seat. Illegal intents change nothing.
    fn submit(&mut self, intent: Intent) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        matches!(self.agents.submit(&mut self.game, Seat::Player, intent), Ok(true))
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    /// Returns true when the input changed the round.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset = self.game.log().len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewRound => self.scene == Scene::Table && self.new_round(),
            InputAction::DrawDeck => self.submit(Intent::Draw(DrawSource::Deck)),
            InputAction::DrawDiscard => self.submit(Intent::Draw(DrawSource::Discard)),
            InputAction::SelectOwn(slot) => self.submit(Intent::Select(Seat::Player, slot)),
            InputAction::SelectOpponent(slot) => self.submit(Intent::Select(Seat::Opponent, slot)),
            InputAction::UseAction => self.submit(Intent::UseAction),
            InputAction::SkipDrawn => self.submit(Intent::SkipDrawn),
            InputAction::Continue => self.submit(Intent::Continue),
            InputAction::CallCabo => self.submit(Intent::DeclareCall),
        }
    }

    /// Deal the next round once the current one is over.
    pub fn new_round(&mut self) -> bool {
        if self.game.start_new_round().is_err() {
            return false;
        }
        self.history_offset = 0;
        true
    }

    /// Let the bot move when its think time is up. Called on every controller tick.
    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || self.game.phase() == Phase::RoundOver {
            return;
        }
        if let Err(err) = self.agents.on_turn(&mut self.game) {
            tracing::warn!(%err, "agent move rejected");
        }
    }

    pub(crate) fn bot_profile(delay_ms: u64, seed: Option<u64>) -> BotProfile {
        let profile = BotProfile::with_delay_ms(delay_ms);
        match seed {
            // Keep the bot's stream apart from the shuffle stream.
            Some(s) => profile.with_seed(s.rotate_left(32) ^ 0x0CAB_0CAB),
            None => profile,
        }
    }
}
