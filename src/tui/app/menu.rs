use crate::agents::AgentTable;
use crate::game::{Game, GameConfig};

use super::AppState;

const DELAY_STEP_MS: u64 = 100;
const MAX_DELAY_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    BotDelayMs,
    Seed,
}

const MENU_ITEMS: [MenuItem; 2] = [MenuItem::BotDelayMs, MenuItem::Seed];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
            MenuItem::Seed => match app.cfg_seed {
                Some(seed) => format!("Seed: {seed}"),
                None => "Seed: random".to_string(),
            },
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = (app.cfg_bot_delay_ms + DELAY_STEP_MS).min(MAX_DELAY_MS);
            }
            MenuItem::Seed => {
                app.cfg_seed = Some(app.cfg_seed.map_or(1, |s| s.saturating_add(1)));
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(DELAY_STEP_MS);
            }
            // Stepping below 1 goes back to a random seed.
            MenuItem::Seed => {
                app.cfg_seed = match app.cfg_seed {
                    Some(s) if s > 1 => Some(s - 1),
                    _ => None,
                };
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_seed = self.seed;
        self.scene = super::Scene::Menu;
    }

    /// Start a fresh session with the edited settings. Scores reset.
    pub fn apply_menu(&mut self) {
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.seed = self.cfg_seed;
        self.game = Game::new(GameConfig { seed: self.seed });
        self.agents = AgentTable::human_vs_bot(Self::bot_profile(self.bot_delay_ms, self.seed));
        self.close_help();
        self.close_history();
        self.scene = super::Scene::Table;
        tracing::info!(delay_ms = self.bot_delay_ms, seed = ?self.seed, "session restarted");
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
