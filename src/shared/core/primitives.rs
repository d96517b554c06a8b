use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidId {
    #[error("user id must be positive, got {0}")]
    User(i64),

    #[error("book id must be positive, got {0}")]
    Book(i64),

    #[error("category id must be positive, got {0}")]
    Category(i64),
}

/// Identifier of the user owning a cart. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(raw: i64) -> Result<Self, InvalidId> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(InvalidId::User(raw))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a book in the catalog. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(raw: i64) -> Result<Self, InvalidId> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(InvalidId::Book(raw))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a catalog category. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    pub fn new(raw: i64) -> Result<Self, InvalidId> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(InvalidId::Category(raw))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a raw list of book identifiers, keeping order and duplicates.
pub fn book_ids_from_raw(raw: &[i64]) -> Result<Vec<BookId>, InvalidId> {
    raw.iter().copied().map(BookId::new).collect()
}
