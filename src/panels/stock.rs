//! Stock ledger
//!
//! Last fetched stock snapshot plus the optimistic quantity patches that the
//! server has not reflected yet.

use crate::models::StockItem;

/// Identifies one optimistic patch until the server answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatchToken(u64);

#[derive(Debug, Clone, PartialEq)]
struct Patch {
    token: PatchToken,
    id: String,
    delta: i64,
    confirmed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockLedger {
    snapshot: Vec<StockItem>,
    patches: Vec<Patch>,
    next_token: u64,
}

impl StockLedger {
    pub fn new(snapshot: Vec<StockItem>) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    /// Replace the snapshot with a fresh fetch.
    ///
    /// Confirmed patches are already part of the new snapshot and are dropped,
    /// as are patches for items that no longer exist.
    pub fn rebase(&mut self, snapshot: Vec<StockItem>) {
        self.patches
            .retain(|patch| !patch.confirmed && snapshot.iter().any(|item| item.id == patch.id));
        self.snapshot = snapshot;
    }

    /// Quantity shown for `id`, never below zero
    pub fn display_quantity(&self, id: &str) -> Option<u32> {
        let base = self.snapshot.iter().find(|item| item.id == id)?.quantity;
        let folded = self
            .patches
            .iter()
            .filter(|patch| patch.id == id)
            .fold(i64::from(base), |qty, patch| (qty + patch.delta).max(0));
        Some(u32::try_from(folded).unwrap_or(u32::MAX))
    }

    /// Record an optimistic change.
    ///
    /// Returns the token and the change to send, or `None` when the shown
    /// quantity cannot move (unknown item or decrement at zero).
    pub fn apply(&mut self, id: &str, delta: i32) -> Option<(PatchToken, i32)> {
        let current = i64::from(self.display_quantity(id)?);
        let next = (current + i64::from(delta)).clamp(0, i64::from(u32::MAX));
        if next == current {
            return None;
        }

        self.next_token += 1;
        let token = PatchToken(self.next_token);
        let effective = next - current;
        self.patches.push(Patch {
            token,
            id: id.to_string(),
            delta: effective,
            confirmed: false,
        });
        Some((token, i32::try_from(effective).unwrap_or(delta)))
    }

    /// Server accepted the change; keep it until the refetch lands
    pub fn confirm(&mut self, token: PatchToken) {
        if let Some(patch) = self.patches.iter_mut().find(|patch| patch.token == token) {
            patch.confirmed = true;
        }
    }

    /// Server rejected the change
    pub fn rollback(&mut self, token: PatchToken) -> bool {
        let before = self.patches.len();
        self.patches.retain(|patch| patch.token != token);
        self.patches.len() != before
    }

    /// Whether `id` has a change the server has not answered yet
    pub fn is_pending(&self, id: &str) -> bool {
        self.patches
            .iter()
            .any(|patch| patch.id == id && !patch.confirmed)
    }

    /// Snapshot with displayed quantities
    pub fn rows(&self) -> Vec<StockItem> {
        self.snapshot
            .iter()
            .map(|item| StockItem {
                quantity: self.display_quantity(&item.id).unwrap_or(item.quantity),
                ..item.clone()
            })
            .collect()
    }
}
