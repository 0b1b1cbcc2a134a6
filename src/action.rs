//! Action card protocol: the selection steps of Peek, Spy, Swap and Spy Swap.
//!
//! The protocol only decides what a selection means; the turn engine owns the
//! hands and applies the resulting [`Step`].

use crate::cards::ActionKind;
use crate::hand::{Seat, HAND_SIZE};

/// One in-flight action card, with the selections made so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionProtocol {
    /// Look at one own slot, then continue.
    Peek { revealed: Option<usize> },
    /// Look at one opponent slot, then continue.
    Spy { revealed: Option<usize> },
    /// Pick an own slot, then an opponent slot; exchanged blind.
    Swap { own: Option<usize> },
    /// Look at an opponent slot, then pick an own slot to exchange it with.
    SpySwap { spied: Option<usize> },
}

/// What a selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The selection does not fit the current step.
    Ignored,
    /// Remembered a slot; waiting for the second selection.
    Selected { owner: Seat, slot: usize },
    /// Show `owner`'s `slot` to the actor.
    Reveal { owner: Seat, slot: usize },
    /// Exchange the actor's slot with the opponent's slot. The protocol is finished.
    Exchange { actor_slot: usize, opponent_slot: usize },
}

impl ActionProtocol {
    pub fn start(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Peek => ActionProtocol::Peek { revealed: None },
            ActionKind::Spy => ActionProtocol::Spy { revealed: None },
            ActionKind::Swap => ActionProtocol::Swap { own: None },
            ActionKind::SpySwap => ActionProtocol::SpySwap { spied: None },
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionProtocol::Peek { .. } => ActionKind::Peek,
            ActionProtocol::Spy { .. } => ActionKind::Spy,
            ActionProtocol::Swap { .. } => ActionKind::Swap,
            ActionProtocol::SpySwap { .. } => ActionKind::SpySwap,
        }
    }

    /// Zero-based index of the selection step the protocol is waiting on.
    pub fn step(&self) -> u8 {
        match self {
            ActionProtocol::Peek { revealed } | ActionProtocol::Spy { revealed } => {
                u8::from(revealed.is_some())
            }
            ActionProtocol::Swap { own } => u8::from(own.is_some()),
            ActionProtocol::SpySwap { spied } => u8::from(spied.is_some()),
        }
    }

    /// Peek and Spy finish with an explicit continue once their card is shown.
    pub fn awaiting_continue(&self) -> bool {
        matches!(
            self,
            ActionProtocol::Peek { revealed: Some(_) } | ActionProtocol::Spy { revealed: Some(_) }
        )
    }

    /// Whose hand the next valid selection must target, relative to `actor`.
    pub fn expected_owner(&self, actor: Seat) -> Option<Seat> {
        match self {
            ActionProtocol::Peek { revealed: None } => Some(actor),
            ActionProtocol::Spy { revealed: None } => Some(actor.other()),
            ActionProtocol::Swap { own: None } => Some(actor),
            ActionProtocol::Swap { own: Some(_) } => Some(actor.other()),
            ActionProtocol::SpySwap { spied: None } => Some(actor.other()),
            ActionProtocol::SpySwap { spied: Some(_) } => Some(actor),
            ActionProtocol::Peek { revealed: Some(_) } | ActionProtocol::Spy { revealed: Some(_) } => {
                None
            }
        }
    }

    /// The slot remembered by the first step, if any, with its owner.
    pub fn selection(&self, actor: Seat) -> Option<(Seat, usize)> {
        match *self {
            ActionProtocol::Swap { own: Some(slot) } => Some((actor, slot)),
            ActionProtocol::SpySwap { spied: Some(slot) } => Some((actor.other(), slot)),
            _ => None,
        }
    }

    /// Feed one `(owner, slot)` selection made by `actor`.
    pub fn select(&mut self, actor: Seat, owner: Seat, slot: usize) -> Step {
        if slot >= HAND_SIZE || self.expected_owner(actor) != Some(owner) {
            return Step::Ignored;
        }
        match self {
            ActionProtocol::Peek { revealed } | ActionProtocol::Spy { revealed } => {
                *revealed = Some(slot);
                Step::Reveal { owner, slot }
            }
            ActionProtocol::Swap { own } => match *own {
                None => {
                    *own = Some(slot);
                    Step::Selected { owner, slot }
                }
                Some(actor_slot) => Step::Exchange { actor_slot, opponent_slot: slot },
            },
            ActionProtocol::SpySwap { spied } => match *spied {
                None => {
                    *spied = Some(slot);
                    Step::Reveal { owner, slot }
                }
                Some(opponent_slot) => Step::Exchange { actor_slot: slot, opponent_slot },
            },
        }
    }
}
