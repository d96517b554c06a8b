// Multiset difference between a cart's previous and next book lists.
//
// The diff is computed before any storage is touched, so the reservation and
// release plan of a cart update can be checked in isolation.

use crate::modules::carts::core::cart::count_units;
use crate::shared::core::primitives::BookId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockChange {
    /// Units newly added to the cart; each one must be taken from stock.
    Reserve(u32),
    /// Units dropped from the cart; each one goes back to stock.
    Release(u32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartDiff {
    changes: BTreeMap<BookId, StockChange>,
}

impl CartDiff {
    pub fn between(previous: &[BookId], next: &[BookId]) -> Self {
        let before = count_units(previous);
        let after = count_units(next);

        let mut changes = BTreeMap::new();
        for book_id in before.keys().chain(after.keys()) {
            let old = before.get(book_id).copied().unwrap_or(0);
            let new = after.get(book_id).copied().unwrap_or(0);
            if new > old {
                changes.insert(*book_id, StockChange::Reserve(new - old));
            } else if old > new {
                changes.insert(*book_id, StockChange::Release(old - new));
            }
        }
        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changes in ascending book id order.
    pub fn changes(&self) -> impl Iterator<Item = (BookId, StockChange)> + '_ {
        self.changes.iter().map(|(book_id, change)| (*book_id, *change))
    }

    pub fn reserved_units(&self) -> u32 {
        self.changes()
            .map(|(_, change)| match change {
                StockChange::Reserve(units) => units,
                StockChange::Release(_) => 0,
            })
            .sum()
    }

    pub fn released_units(&self) -> u32 {
        self.changes()
            .map(|(_, change)| match change {
                StockChange::Release(units) => units,
                StockChange::Reserve(_) => 0,
            })
            .sum()
    }
}
