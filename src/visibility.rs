//! Who knows which hand slot.
//!
//! Every slot carries one tagged state, so a slot can never be both hidden and
//! revealed, and at most one transient reveal exists at a time.

use crate::hand::{Seat, HAND_SIZE};

/// Knowledge state of a single hand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotVisibility {
    /// Nobody knows this card.
    Hidden,
    /// The owner knows this card.
    KnownToOwner,
    /// Shown to `viewer` for the duration of an action card.
    /// `owner_knew` restores the owner's knowledge once the reveal ends.
    TransientlyRevealed { viewer: Seat, owner_knew: bool },
    /// Face up for everyone; only used once the round is over.
    Exposed,
}

/// The single card momentarily shown during an action card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientReveal {
    pub owner: Seat,
    pub slot: usize,
    pub viewer: Seat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    slots: [[SlotVisibility; HAND_SIZE]; 2],
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new()
    }
}

impl Visibility {
    /// Every slot of both hands hidden.
    pub fn new() -> Self {
        Self { slots: [[SlotVisibility::Hidden; HAND_SIZE]; 2] }
    }

    pub fn state(&self, owner: Seat, slot: usize) -> SlotVisibility {
        self.slots[owner.index()].get(slot).copied().unwrap_or(SlotVisibility::Hidden)
    }

    /// Whether `viewer` can currently see the card at `owner`'s `slot`.
    pub fn is_visible_to(&self, viewer: Seat, owner: Seat, slot: usize) -> bool {
        match self.state(owner, slot) {
            SlotVisibility::Hidden => false,
            SlotVisibility::KnownToOwner => viewer == owner,
            SlotVisibility::TransientlyRevealed { viewer: v, owner_knew } => {
                v == viewer || (owner_knew && viewer == owner)
            }
            SlotVisibility::Exposed => true,
        }
    }

    /// Number of slots the owner persistently knows.
    pub fn known_count(&self, owner: Seat) -> usize {
        self.slots[owner.index()]
            .iter()
            .filter(|s| {
                matches!(
                    s,
                    SlotVisibility::KnownToOwner
                        | SlotVisibility::TransientlyRevealed { owner_knew: true, .. }
                )
            })
            .count()
    }

    /// Mark a hidden slot as known to its owner. Returns false if it was not hidden.
    pub fn reveal_to_owner(&mut self, owner: Seat, slot: usize) -> bool {
        match self.slots[owner.index()].get_mut(slot) {
            Some(s) if *s == SlotVisibility::Hidden => {
                *s = SlotVisibility::KnownToOwner;
                true
            }
            _ => false,
        }
    }

    /// The card in this slot changed: nobody knows it any more.
    pub fn forget(&mut self, owner: Seat, slot: usize) {
        if let Some(s) = self.slots[owner.index()].get_mut(slot) {
            *s = SlotVisibility::Hidden;
        }
    }

    /// Show one slot to `viewer`, replacing any previous transient reveal.
    pub fn reveal_transient(&mut self, viewer: Seat, owner: Seat, slot: usize) {
        self.clear_transient();
        if let Some(s) = self.slots[owner.index()].get_mut(slot) {
            let owner_knew = *s == SlotVisibility::KnownToOwner;
            *s = SlotVisibility::TransientlyRevealed { viewer, owner_knew };
        }
    }

    pub fn transient(&self) -> Option<TransientReveal> {
        for owner in Seat::BOTH {
            for (slot, s) in self.slots[owner.index()].iter().enumerate() {
                if let SlotVisibility::TransientlyRevealed { viewer, .. } = *s {
                    return Some(TransientReveal { owner, slot, viewer });
                }
            }
        }
        None
    }

    pub fn clear_transient(&mut self) {
        for hand in &mut self.slots {
            for s in hand.iter_mut() {
                if let SlotVisibility::TransientlyRevealed { owner_knew, .. } = *s {
                    *s = if owner_knew {
                        SlotVisibility::KnownToOwner
                    } else {
                        SlotVisibility::Hidden
                    };
                }
            }
        }
    }

    /// Round over: every slot of both hands face up.
    pub fn expose_all(&mut self) {
        self.slots = [[SlotVisibility::Exposed; HAND_SIZE]; 2];
    }
}
