//! Backing storage for per-session token slots.
//!
//! The ledger keeps two small integers per touched token: its signed
//! delta and its position in the touch-order list. Historically this
//! state has lived in two kinds of substrate — a persistent mapping that
//! must be manually reset when the session closes, and a store that is
//! inherently scoped to one session and simply expires. Both are valid
//! backings for the same ledger contract, so they sit behind one
//! interface and the substrate decides whether "clear on close" is
//! explicit or implicit.

use std::collections::HashMap;

use crate::domain::TokenAddress;

/// Read/write access to the per-token delta and slot values of one
/// session.
///
/// A freshly defaulted store must answer `0` for every token. The two
/// implementations must be observationally identical; only their reset
/// mechanics differ.
pub trait SlotStore: Default {
    /// The signed delta recorded for `token`, `0` when absent.
    fn delta(&self, token: TokenAddress) -> i128;

    /// Records the signed delta for `token`.
    fn set_delta(&mut self, token: TokenAddress, value: i128);

    /// The recorded touch-order slot for `token`, `0` when absent.
    ///
    /// Slot `0` is ambiguous between "never touched" and "first touched
    /// token"; the ledger disambiguates against the token actually
    /// stored at position 0.
    fn slot_of(&self, token: TokenAddress) -> u8;

    /// Records the touch-order slot for `token`.
    fn set_slot_of(&mut self, token: TokenAddress, slot: u8);

    /// Resets the store to its empty state.
    fn clear(&mut self);
}

/// Persistent-mapping strategy: entries survive until explicitly
/// drained at session close.
#[derive(Debug, Clone, Default)]
pub struct PersistentStore {
    deltas: HashMap<TokenAddress, i128>,
    slots: HashMap<TokenAddress, u8>,
}

impl SlotStore for PersistentStore {
    fn delta(&self, token: TokenAddress) -> i128 {
        self.deltas.get(&token).copied().unwrap_or(0)
    }

    fn set_delta(&mut self, token: TokenAddress, value: i128) {
        self.deltas.insert(token, value);
    }

    fn slot_of(&self, token: TokenAddress) -> u8 {
        self.slots.get(&token).copied().unwrap_or(0)
    }

    fn set_slot_of(&mut self, token: TokenAddress, slot: u8) {
        self.slots.insert(token, slot);
    }

    fn clear(&mut self) {
        // Manual reset keeps the allocations for the next session.
        self.deltas.clear();
        self.slots.clear();
    }
}

/// Session-scoped strategy: the whole store is dropped and replaced, as
/// if it expired with the session.
#[derive(Debug, Clone, Default)]
pub struct TransientStore {
    deltas: HashMap<TokenAddress, i128>,
    slots: HashMap<TokenAddress, u8>,
}

impl SlotStore for TransientStore {
    fn delta(&self, token: TokenAddress) -> i128 {
        self.deltas.get(&token).copied().unwrap_or(0)
    }

    fn set_delta(&mut self, token: TokenAddress, value: i128) {
        self.deltas.insert(token, value);
    }

    fn slot_of(&self, token: TokenAddress) -> u8 {
        self.slots.get(&token).copied().unwrap_or(0)
    }

    fn set_slot_of(&mut self, token: TokenAddress, slot: u8) {
        self.slots.insert(token, slot);
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
