use crate::action::{ActionProtocol, Step};
use crate::cards::{ActionKind, Card};
use crate::deck::{deal, deal_shuffled, Deal, Deck, DiscardPile, PileError};
use crate::hand::{exchange, Hand, Seat, HAND_SIZE};
use crate::scoring::{resolve, Outcome, RoundResult, Scores, FAILED_CALL_PENALTY};
use crate::visibility::{SlotVisibility, TransientReveal, Visibility};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::{debug, info, trace};

/// Own slots the player looks at before play starts.
pub const SETUP_REVEALS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    /// The player is picking the two cards to look at.
    Setup,
    Playing,
    /// Cabo was called; the other seat takes exactly one more turn.
    FinalRound,
    RoundOver,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::Playing => "Playing",
            Phase::FinalRound => "Final round",
            Phase::RoundOver => "Round over",
        }
    }

    fn is_live(self) -> bool {
        matches!(self, Phase::Playing | Phase::FinalRound)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    Deck,
    Discard,
}

/// Why an intent was not applied. The round is left untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntentError {
    #[error("not allowed during {0}")]
    WrongPhase(Phase),
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("no card has been drawn")]
    NothingDrawn,
    #[error("a card has already been drawn this turn")]
    AlreadyDrawn,
    #[error("an action card is being resolved")]
    ActionInProgress,
    #[error("no action card is being resolved")]
    NoActionInProgress,
    #[error("the drawn card has no action")]
    NotAnActionCard,
    #[error("a card taken from the discard pile must replace one of yours")]
    MustReplace,
    #[error("the action is not waiting for continue")]
    NotAwaitingContinue,
    #[error("slot {0} does not exist")]
    SlotOutOfRange(usize),
    #[error("slot {0} is already known")]
    SlotAlreadyKnown(usize),
    #[error("that card cannot be selected now")]
    SelectionIgnored,
    #[error("the discard pile is empty")]
    EmptyDiscard,
}

/// The opponent's complete turn, decided before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentMove {
    /// Slot that receives the drawn card.
    pub slot: usize,
    /// Call Cabo after the replace. Only honoured outside the final round.
    pub declare: bool,
}

/// A public event of the running round, for the history overlay.
///
/// Values appear only when the card is face up (discard pile, round end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundEvent {
    LookedAtOwn { slot: usize },
    DrewFromDeck,
    DrewFromDiscard { value: u8 },
    Replaced { slot: usize, discarded: u8 },
    Discarded { value: u8 },
    UsedAction { kind: ActionKind, value: u8 },
    Peeked { slot: usize },
    Spied { slot: usize },
    Swapped { own_slot: usize, opponent_slot: usize },
    CalledCabo,
    DeckExhausted,
    RoundOver { outcome: Outcome },
}

impl RoundEvent {
    pub fn describe(&self) -> String {
        match *self {
            RoundEvent::LookedAtOwn { slot } => format!("looked at own card {}", slot + 1),
            RoundEvent::DrewFromDeck => "drew from the deck".to_string(),
            RoundEvent::DrewFromDiscard { value } => format!("took the {value} from the discard"),
            RoundEvent::Replaced { slot, discarded } => {
                format!("replaced card {} and discarded a {discarded}", slot + 1)
            }
            RoundEvent::Discarded { value } => format!("discarded the {value}"),
            RoundEvent::UsedAction { kind, value } => format!("used the {value} as {kind}"),
            RoundEvent::Peeked { slot } => format!("peeked at own card {}", slot + 1),
            RoundEvent::Spied { slot } => format!("spied on opponent card {}", slot + 1),
            RoundEvent::Swapped { own_slot, opponent_slot } => {
                format!("swapped own card {} with opponent card {}", own_slot + 1, opponent_slot + 1)
            }
            RoundEvent::CalledCabo => "called CABO".to_string(),
            RoundEvent::DeckExhausted => "found the deck empty".to_string(),
            RoundEvent::RoundOver { outcome: Outcome::Won(seat) } => format!("round over, {seat} won"),
            RoundEvent::RoundOver { outcome: Outcome::Tie } => "round over, tie".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundLogEntry {
    pub seat: Seat,
    pub event: RoundEvent,
    pub phase: Phase,
}

/// Session configuration. Rules themselves are fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for shuffling; `None` draws one from the OS.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drawn {
    card: Card,
    source: DrawSource,
}

/// Everything about the round in progress. Replaced wholesale by the next deal.
#[derive(Debug, Clone)]
pub struct RoundState {
    deck: Deck,
    discard: DiscardPile,
    hands: [Hand; 2],
    visibility: Visibility,
    current: Seat,
    drawn: Option<Drawn>,
    protocol: Option<ActionProtocol>,
    caller: Option<Seat>,
    phase: Phase,
}

impl RoundState {
    fn from_deal(dealt: Deal) -> Self {
        Self {
            deck: dealt.deck,
            discard: dealt.discard,
            hands: [dealt.player, dealt.opponent],
            visibility: Visibility::new(),
            current: Seat::Player,
            drawn: None,
            protocol: None,
            caller: None,
            phase: Phase::Setup,
        }
    }
}

/// What one seat can see of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotView {
    /// The card value when visible to the viewer.
    pub value: Option<u8>,
    /// Shown only for the current action card.
    pub transient: bool,
    /// Remembered as the first selection of a two-step action.
    pub selected: bool,
    /// A selection here would be accepted.
    pub selectable: bool,
}

/// Read-only snapshot of the table as one seat sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub phase: Phase,
    pub current: Seat,
    pub deck_len: usize,
    pub discard_len: usize,
    pub discard_top: Option<u8>,
    pub drawn: Option<u8>,
    pub drawn_from: Option<DrawSource>,
    pub protocol: Option<ActionProtocol>,
    pub transient: Option<TransientReveal>,
    /// Indexed by [`Seat::index`].
    pub hands: [[SlotView; HAND_SIZE]; 2],
    pub caller: Option<Seat>,
    pub scores: Scores,
    pub last_result: Option<RoundResult>,
    pub status: String,
}

/// The turn engine. Owns the round and the session scores.
#[derive(Debug)]
pub struct Game {
    rng: ChaCha8Rng,
    round: RoundState,
    scores: Scores,
    last_result: Option<RoundResult>,
    round_number: u32,
    log: Vec<RoundLogEntry>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    /// Start a session and deal its first round.
    ///
    /// ```
    /// use cabo_rs::game::{Game, GameConfig, Phase};
    ///
    /// let game = Game::new(GameConfig { seed: Some(7) });
    /// assert_eq!(game.phase(), Phase::Setup);
    /// assert_eq!(game.deck_len(), 52 - 9);
    /// ```
    pub fn new(config: GameConfig) -> Self {
        Self::seated(config, |rng| deal_shuffled(rng))
    }

    /// Start a session whose first round is dealt from `deck` exactly as stacked.
    pub fn with_deck(config: GameConfig, deck: Deck) -> Result<Self, PileError> {
        let dealt = deal(deck)?;
        Ok(Self::seated(config, |_| dealt))
    }

    fn seated(config: GameConfig, first: impl FnOnce(&mut ChaCha8Rng) -> Deal) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let round = RoundState::from_deal(first(&mut rng));
        let mut game = Self {
            rng,
            round,
            scores: Scores::default(),
            last_result: None,
            round_number: 0,
            log: Vec::new(),
        };
        game.begin_round();
        game
    }

    /// Replace the current round with one dealt from `deck`. Scores are kept.
    pub fn start_round_with_deck(&mut self, deck: Deck) -> Result<(), PileError> {
        self.round = RoundState::from_deal(deal(deck)?);
        self.begin_round();
        Ok(())
    }

    fn begin_round(&mut self) {
        self.round_number += 1;
        self.log.clear();
        info!(round = self.round_number, deck = self.round.deck.len(), "round dealt");
    }

    // --- Queries ---

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    /// Seat whose turn it is.
    pub fn current(&self) -> Seat {
        self.round.current
    }

    pub fn deck_len(&self) -> usize {
        self.round.deck.len()
    }

    pub fn discard(&self) -> &DiscardPile {
        &self.round.discard
    }

    /// True contents of a hand. Presentation code should use [`Game::view`].
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.round.hands[seat.index()]
    }

    pub fn visibility(&self) -> &Visibility {
        &self.round.visibility
    }

    pub fn drawn_card(&self) -> Option<Card> {
        self.round.drawn.map(|d| d.card)
    }

    pub fn drawn_source(&self) -> Option<DrawSource> {
        self.round.drawn.map(|d| d.source)
    }

    pub fn protocol(&self) -> Option<ActionProtocol> {
        self.round.protocol
    }

    pub fn transient_reveal(&self) -> Option<TransientReveal> {
        self.round.visibility.transient()
    }

    pub fn caller(&self) -> Option<Seat> {
        self.round.caller
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Result of the most recently finished round.
    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn log(&self) -> &[RoundLogEntry] {
        &self.log
    }

    pub fn log_recent_offset(&self, n: usize, offset: usize) -> Vec<RoundLogEntry> {
        if n == 0 || self.log.is_empty() {
            return Vec::new();
        }
        let len = self.log.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.log[start..end].to_vec()
    }

    // --- Player intents ---

    /// Look at one of your own cards during setup.
    pub fn reveal_setup_slot(&mut self, slot: usize) -> Result<(), IntentError> {
        self.ensure_phase(&[Phase::Setup])?;
        check_slot(slot)?;
        if self.round.visibility.known_count(Seat::Player) >= SETUP_REVEALS {
            return Err(self.reject(IntentError::WrongPhase(Phase::Setup)));
        }
        if !self.round.visibility.reveal_to_owner(Seat::Player, slot) {
            return Err(self.reject(IntentError::SlotAlreadyKnown(slot)));
        }
        self.record(Seat::Player, RoundEvent::LookedAtOwn { slot });
        if self.round.visibility.known_count(Seat::Player) == SETUP_REVEALS {
            self.round.phase = Phase::Playing;
            debug!("setup complete, play begins");
        }
        Ok(())
    }

    pub fn draw_from_deck(&mut self) -> Result<(), IntentError> {
        self.ensure_can_draw()?;
        match self.round.deck.draw() {
            Ok(card) => {
                self.round.drawn = Some(Drawn { card, source: DrawSource::Deck });
                self.record(Seat::Player, RoundEvent::DrewFromDeck);
                debug!(action = ?card.action(), "player drew from deck");
            }
            Err(PileError::EmptyPile) => self.exhaust_deck(Seat::Player),
        }
        Ok(())
    }

    pub fn draw_from_discard(&mut self) -> Result<(), IntentError> {
        self.ensure_can_draw()?;
        let Ok(card) = self.round.discard.draw() else {
            return Err(self.reject(IntentError::EmptyDiscard));
        };
        self.round.drawn = Some(Drawn { card, source: DrawSource::Discard });
        self.record(Seat::Player, RoundEvent::DrewFromDiscard { value: card.value() });
        debug!(value = card.value(), "player drew from discard");
        Ok(())
    }

    /// Click on one of your own slots: setup reveal, replace, or action selection.
    pub fn select_own_slot(&mut self, slot: usize) -> Result<(), IntentError> {
        check_slot(slot)?;
        match self.round.phase {
            Phase::Setup => self.reveal_setup_slot(slot),
            Phase::Playing | Phase::FinalRound => {
                self.ensure_turn(Seat::Player)?;
                if self.round.protocol.is_some() {
                    self.advance_protocol(Seat::Player, slot)
                } else if self.round.drawn.is_some() {
                    self.replace_slot(slot)
                } else {
                    Err(self.reject(IntentError::NothingDrawn))
                }
            }
            Phase::RoundOver => Err(self.reject(IntentError::WrongPhase(Phase::RoundOver))),
        }
    }

    /// Click on one of the opponent's slots; only meaningful inside an action card.
    pub fn select_opponent_slot(&mut self, slot: usize) -> Result<(), IntentError> {
        check_slot(slot)?;
        self.ensure_live()?;
        self.ensure_turn(Seat::Player)?;
        if self.round.protocol.is_none() {
            return Err(self.reject(IntentError::NoActionInProgress));
        }
        self.advance_protocol(Seat::Opponent, slot)
    }

    /// Start resolving the drawn action card.
    pub fn use_action_card(&mut self) -> Result<(), IntentError> {
        let (card, kind) = self.pending_action_card()?;
        self.round.protocol = Some(ActionProtocol::start(kind));
        self.record(Seat::Player, RoundEvent::UsedAction { kind, value: card.value() });
        debug!(?kind, "action card in use");
        Ok(())
    }

    /// Decline the drawn action card: discard it and end the turn.
    pub fn skip_action_card(&mut self) -> Result<(), IntentError> {
        self.pending_action_card()?;
        self.discard_drawn_and_end_turn(Seat::Player);
        Ok(())
    }

    /// Discard a deck-drawn card without replacing anything.
    pub fn discard_drawn_card(&mut self) -> Result<(), IntentError> {
        self.ensure_live()?;
        self.ensure_turn(Seat::Player)?;
        self.ensure_no_protocol()?;
        match self.round.drawn {
            None => Err(self.reject(IntentError::NothingDrawn)),
            Some(Drawn { source: DrawSource::Discard, .. }) => {
                Err(self.reject(IntentError::MustReplace))
            }
            Some(Drawn { source: DrawSource::Deck, .. }) => {
                self.discard_drawn_and_end_turn(Seat::Player);
                Ok(())
            }
        }
    }

    /// Finish a Peek or Spy after the card has been shown.
    pub fn continue_action(&mut self) -> Result<(), IntentError> {
        self.ensure_live()?;
        self.ensure_turn(Seat::Player)?;
        match self.round.protocol {
            None => Err(self.reject(IntentError::NoActionInProgress)),
            Some(p) if !p.awaiting_continue() => Err(self.reject(IntentError::NotAwaitingContinue)),
            Some(_) => {
                self.round.visibility.clear_transient();
                self.round.protocol = None;
                self.discard_drawn_and_end_turn(Seat::Player);
                Ok(())
            }
        }
    }

    /// Call Cabo at the start of your turn.
    pub fn declare_call(&mut self) -> Result<(), IntentError> {
        self.ensure_phase(&[Phase::Playing])?;
        self.ensure_turn(Seat::Player)?;
        if self.round.drawn.is_some() {
            return Err(self.reject(IntentError::AlreadyDrawn));
        }
        self.declare(Seat::Player);
        Ok(())
    }

    /// Deal the next round once the current one is over.
    pub fn start_new_round(&mut self) -> Result<(), IntentError> {
        self.ensure_phase(&[Phase::RoundOver])?;
        self.round = RoundState::from_deal(deal_shuffled(&mut self.rng));
        self.begin_round();
        Ok(())
    }

    // --- Opponent ---

    /// Apply the opponent's whole turn: draw from the deck, replace `mv.slot`,
    /// and call Cabo if asked and still allowed.
    pub fn play_opponent_turn(&mut self, mv: OpponentMove) -> Result<(), IntentError> {
        self.ensure_live()?;
        self.ensure_turn(Seat::Opponent)?;
        check_slot(mv.slot)?;
        let card = match self.round.deck.draw() {
            Ok(card) => card,
            Err(PileError::EmptyPile) => {
                self.exhaust_deck(Seat::Opponent);
                return Ok(());
            }
        };
        self.record(Seat::Opponent, RoundEvent::DrewFromDeck);
        let old = self.round.hands[Seat::Opponent.index()].replace(mv.slot, card);
        self.round.visibility.forget(Seat::Opponent, mv.slot);
        self.round.discard.push(old);
        self.record(
            Seat::Opponent,
            RoundEvent::Replaced { slot: mv.slot, discarded: old.value() },
        );
        debug!(slot = mv.slot, discarded = old.value(), "opponent replaced a card");
        if self.round.phase == Phase::FinalRound {
            self.finish_round();
        } else if mv.declare {
            self.declare(Seat::Opponent);
        } else {
            self.round.current = Seat::Player;
        }
        Ok(())
    }

    // --- Snapshot ---

    /// What `viewer` can see right now, plus a prompt for the next legal input.
    pub fn view(&self, viewer: Seat) -> TableView {
        let r = &self.round;
        let drawn = if r.current == viewer { r.drawn } else { None };
        let selection =
            r.protocol.and_then(|p| p.selection(r.current)).filter(|_| r.current == viewer);
        let hands = Seat::BOTH.map(|owner| {
            std::array::from_fn(|slot| {
                let card = r.hands[owner.index()].as_array()[slot];
                SlotView {
                    value: r
                        .visibility
                        .is_visible_to(viewer, owner, slot)
                        .then_some(card.value()),
                    transient: matches!(
                        r.visibility.state(owner, slot),
                        SlotVisibility::TransientlyRevealed { viewer: v, .. } if v == viewer
                    ),
                    selected: selection == Some((owner, slot)),
                    selectable: self.is_selectable(viewer, owner, slot),
                }
            })
        });
        TableView {
            phase: r.phase,
            current: r.current,
            deck_len: r.deck.len(),
            discard_len: r.discard.len(),
            discard_top: r.discard.top().map(|c| c.value()),
            drawn: drawn.map(|d| d.card.value()),
            drawn_from: drawn.map(|d| d.source),
            protocol: r.protocol.filter(|_| r.current == viewer),
            transient: r.visibility.transient().filter(|t| t.viewer == viewer),
            hands,
            caller: r.caller,
            scores: self.scores,
            last_result: self.last_result.filter(|_| r.phase == Phase::RoundOver),
            status: self.status(),
        }
    }

    fn is_selectable(&self, viewer: Seat, owner: Seat, slot: usize) -> bool {
        let r = &self.round;
        match r.phase {
            Phase::Setup => {
                viewer == Seat::Player
                    && owner == viewer
                    && r.visibility.known_count(viewer) < SETUP_REVEALS
                    && r.visibility.state(owner, slot) == SlotVisibility::Hidden
            }
            Phase::Playing | Phase::FinalRound if r.current == viewer => match r.protocol {
                Some(p) => p.expected_owner(viewer) == Some(owner),
                None => r.drawn.is_some() && owner == viewer,
            },
            _ => false,
        }
    }

    /// Human-readable prompt for the player.
    pub fn status(&self) -> String {
        let r = &self.round;
        match r.phase {
            Phase::Setup => {
                let left = SETUP_REVEALS - r.visibility.known_count(Seat::Player).min(SETUP_REVEALS);
                if left == SETUP_REVEALS {
                    format!("Pick {SETUP_REVEALS} of your cards to look at")
                } else {
                    format!("Good! Pick {left} more of your cards to look at")
                }
            }
            Phase::RoundOver => self.result_message(),
            Phase::Playing | Phase::FinalRound => match r.current {
                Seat::Opponent if r.phase == Phase::FinalRound => {
                    "CABO! Bot takes its final turn...".to_string()
                }
                Seat::Opponent => "Bot's turn...".to_string(),
                Seat::Player => self.player_prompt(),
            },
        }
    }

    fn player_prompt(&self) -> String {
        let r = &self.round;
        if let Some(p) = r.protocol {
            let opponent = r.hands[Seat::Opponent.index()];
            return match p {
                ActionProtocol::Peek { revealed: None } => {
                    "PEEK: pick one of your cards to look at".to_string()
                }
                ActionProtocol::Spy { revealed: None } => {
                    "SPY: pick one of Bot's cards to look at".to_string()
                }
                ActionProtocol::Peek { revealed: Some(slot) } => format!(
                    "Peeked! Your card {} is a {}. Continue when ready",
                    slot + 1,
                    r.hands[Seat::Player.index()].as_array()[slot].value()
                ),
                ActionProtocol::Spy { revealed: Some(slot) } => format!(
                    "Spied! Bot's card {} is a {}. Continue when ready",
                    slot + 1,
                    opponent.as_array()[slot].value()
                ),
                ActionProtocol::Swap { own: None } => {
                    "SWAP: first pick one of your cards".to_string()
                }
                ActionProtocol::Swap { own: Some(_) } => {
                    "SWAP: now pick one of Bot's cards to swap with".to_string()
                }
                ActionProtocol::SpySwap { spied: None } => {
                    "SPY SWAP: pick one of Bot's cards to look at".to_string()
                }
                ActionProtocol::SpySwap { spied: Some(slot) } => format!(
                    "Bot has a {}. Pick one of your cards to swap it with",
                    opponent.as_array()[slot].value()
                ),
            };
        }
        match r.drawn {
            Some(Drawn { card, source: DrawSource::Discard }) => {
                format!("Replace one of your cards with the {card}")
            }
            Some(Drawn { card, source: DrawSource::Deck }) => match card.action() {
                Some(kind) => format!(
                    "Action card! Use {} or skip it, or keep the {card} by replacing a card",
                    kind.label().to_uppercase()
                ),
                None => format!("Replace one of your cards with the {card}, or discard it"),
            },
            None if r.phase == Phase::FinalRound => {
                "Bot called CABO! Your final turn: draw from the deck or the discard pile"
                    .to_string()
            }
            None => "Your turn! Draw from the deck or the discard pile, or call CABO".to_string(),
        }
    }

    fn result_message(&self) -> String {
        let Some(result) = self.last_result else {
            return "Round over".to_string();
        };
        let you = result.final_value(Seat::Player);
        let bot = result.final_value(Seat::Opponent);
        let penalty = match result.penalized {
            Some(seat) => format!(" ({seat}: +{FAILED_CALL_PENALTY} failed CABO)"),
            None => String::new(),
        };
        match result.outcome {
            Outcome::Won(Seat::Player) => format!("YOU WIN! You: {you} vs Bot: {bot}{penalty}"),
            Outcome::Won(Seat::Opponent) => format!("BOT WINS! You: {you} vs Bot: {bot}{penalty}"),
            Outcome::Tie => format!("TIE! Both: {you}{penalty}"),
        }
    }

    // --- Transitions ---

    fn advance_protocol(&mut self, owner: Seat, slot: usize) -> Result<(), IntentError> {
        let actor = self.round.current;
        let Some(mut protocol) = self.round.protocol else {
            return Err(self.reject(IntentError::NoActionInProgress));
        };
        match protocol.select(actor, owner, slot) {
            Step::Ignored => Err(self.reject(IntentError::SelectionIgnored)),
            Step::Selected { .. } => {
                self.round.protocol = Some(protocol);
                Ok(())
            }
            Step::Reveal { owner, slot } => {
                self.round.visibility.reveal_transient(actor, owner, slot);
                self.round.protocol = Some(protocol);
                let event = if owner == actor {
                    RoundEvent::Peeked { slot }
                } else {
                    RoundEvent::Spied { slot }
                };
                self.record(actor, event);
                Ok(())
            }
            Step::Exchange { actor_slot, opponent_slot } => {
                let [player, opponent] = &mut self.round.hands;
                let (mine, theirs) = match actor {
                    Seat::Player => (player, opponent),
                    Seat::Opponent => (opponent, player),
                };
                exchange(mine, actor_slot, theirs, opponent_slot);
                self.round.visibility.forget(actor, actor_slot);
                self.round.visibility.forget(actor.other(), opponent_slot);
                self.round.visibility.clear_transient();
                self.round.protocol = None;
                self.record(actor, RoundEvent::Swapped { own_slot: actor_slot, opponent_slot });
                self.discard_drawn_and_end_turn(actor);
                Ok(())
            }
        }
    }

    fn replace_slot(&mut self, slot: usize) -> Result<(), IntentError> {
        let Some(drawn) = self.round.drawn.take() else {
            return Err(self.reject(IntentError::NothingDrawn));
        };
        let seat = self.round.current;
        let old = self.round.hands[seat.index()].replace(slot, drawn.card);
        self.round.visibility.forget(seat, slot);
        self.round.discard.push(old);
        self.record(seat, RoundEvent::Replaced { slot, discarded: old.value() });
        debug!(slot, discarded = old.value(), "player replaced a card");
        self.end_turn(seat);
        Ok(())
    }

    fn discard_drawn_and_end_turn(&mut self, seat: Seat) {
        if let Some(drawn) = self.round.drawn.take() {
            self.round.discard.push(drawn.card);
            self.record(seat, RoundEvent::Discarded { value: drawn.card.value() });
        }
        self.end_turn(seat);
    }

    fn end_turn(&mut self, seat: Seat) {
        if self.round.phase == Phase::FinalRound {
            self.finish_round();
        } else {
            self.round.current = seat.other();
            debug!(next = ?self.round.current, "turn passed");
        }
    }

    fn declare(&mut self, seat: Seat) {
        self.round.caller = Some(seat);
        self.round.phase = Phase::FinalRound;
        self.round.current = seat.other();
        self.record(seat, RoundEvent::CalledCabo);
        info!(caller = ?seat, "cabo called");
    }

    fn exhaust_deck(&mut self, seat: Seat) {
        self.record(seat, RoundEvent::DeckExhausted);
        info!(?seat, "deck exhausted");
        self.finish_round();
    }

    fn finish_round(&mut self) {
        let r = &mut self.round;
        r.phase = Phase::RoundOver;
        r.drawn = None;
        r.protocol = None;
        r.visibility.expose_all();
        let result = resolve(&r.hands[0], &r.hands[1], r.caller);
        self.scores.record(&result);
        self.last_result = Some(result);
        self.record(self.round.current, RoundEvent::RoundOver { outcome: result.outcome });
        info!(
            round = self.round_number,
            player = result.hand_value(Seat::Player),
            opponent = result.hand_value(Seat::Opponent),
            player_final = result.final_value(Seat::Player),
            opponent_final = result.final_value(Seat::Opponent),
            caller = ?result.caller,
            outcome = ?result.outcome,
            "round over"
        );
    }

    fn record(&mut self, seat: Seat, event: RoundEvent) {
        self.log.push(RoundLogEntry { seat, event, phase: self.round.phase });
    }

    // --- Guards ---

    fn reject(&self, err: IntentError) -> IntentError {
        trace!(%err, phase = ?self.round.phase, "intent rejected");
        err
    }

    fn ensure_phase(&self, allowed: &[Phase]) -> Result<(), IntentError> {
        if allowed.contains(&self.round.phase) {
            Ok(())
        } else {
            Err(self.reject(IntentError::WrongPhase(self.round.phase)))
        }
    }

    fn ensure_live(&self) -> Result<(), IntentError> {
        if self.round.phase.is_live() {
            Ok(())
        } else {
            Err(self.reject(IntentError::WrongPhase(self.round.phase)))
        }
    }

    fn ensure_turn(&self, seat: Seat) -> Result<(), IntentError> {
        if self.round.current == seat {
            Ok(())
        } else {
            Err(self.reject(IntentError::NotYourTurn))
        }
    }

    fn ensure_no_protocol(&self) -> Result<(), IntentError> {
        if self.round.protocol.is_some() {
            Err(self.reject(IntentError::ActionInProgress))
        } else {
            Ok(())
        }
    }

    fn ensure_can_draw(&self) -> Result<(), IntentError> {
        self.ensure_live()?;
        self.ensure_turn(Seat::Player)?;
        self.ensure_no_protocol()?;
        if self.round.drawn.is_some() {
            return Err(self.reject(IntentError::AlreadyDrawn));
        }
        Ok(())
    }

    fn pending_action_card(&self) -> Result<(Card, ActionKind), IntentError> {
        self.ensure_live()?;
        self.ensure_turn(Seat::Player)?;
        self.ensure_no_protocol()?;
        match self.round.drawn {
            None => Err(self.reject(IntentError::NothingDrawn)),
            Some(Drawn { source: DrawSource::Discard, .. }) => {
                Err(self.reject(IntentError::MustReplace))
            }
            Some(Drawn { card, source: DrawSource::Deck }) => match card.action() {
                Some(kind) => Ok((card, kind)),
                None => Err(self.reject(IntentError::NotAnActionCard)),
            },
        }
    }
}

fn check_slot(slot: usize) -> Result<(), IntentError> {
    if slot < HAND_SIZE {
        Ok(())
    } else {
        Err(IntentError::SlotOutOfRange(slot))
    }
}
