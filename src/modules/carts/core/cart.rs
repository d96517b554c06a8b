use crate::shared::core::primitives::{BookId, UserId};
use serde::Serialize;
use std::collections::BTreeMap;

/// A user's cart. Repetition of a book identifier encodes quantity, so
/// `[3, 3, 5]` is two copies of book 3 and one of book 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    user_id: UserId,
    book_ids: Vec<BookId>,
}

impl Cart {
    pub fn new(user_id: UserId, book_ids: Vec<BookId>) -> Self {
        Self { user_id, book_ids }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn book_ids(&self) -> &[BookId] {
        &self.book_ids
    }

    /// An empty cart is equivalent to having no cart at all.
    pub fn is_empty(&self) -> bool {
        self.book_ids.is_empty()
    }

    pub fn units(&self) -> usize {
        self.book_ids.len()
    }

    /// Requested count per distinct book, ascending by book id.
    pub fn quantities(&self) -> BTreeMap<BookId, u32> {
        count_units(&self.book_ids)
    }
}

pub(crate) fn count_units(book_ids: &[BookId]) -> BTreeMap<BookId, u32> {
    let mut counts = BTreeMap::new();
    for book_id in book_ids {
        *counts.entry(*book_id).or_insert(0) += 1;
    }
    counts
}
