use crate::shared::core::primitives::BookId;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("author must not be empty")]
    EmptyAuthor,
}

/// Catalog entry with its live stock counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub year: i32,
    pub author: String,
    pub price: u64,
    pub stock: u32,
    pub category_id: i64,
}

/// Book data before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub year: i32,
    pub author: String,
    pub price: u64,
    pub stock: u32,
    pub category_id: i64,
}

fn check_names(title: &str, author: &str) -> Result<(), BookError> {
    if title.trim().is_empty() {
        return Err(BookError::EmptyTitle);
    }
    if author.trim().is_empty() {
        return Err(BookError::EmptyAuthor);
    }
    Ok(())
}

impl NewBook {
    pub fn validate(self) -> Result<Self, BookError> {
        check_names(&self.title, &self.author)?;
        Ok(self)
    }

    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            year: self.year,
            author: self.author,
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
        }
    }
}

/// Replacement catalog fields for an existing book. Stock is owned by the
/// cart engine and is never part of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub year: i32,
    pub author: String,
    pub price: u64,
    pub category_id: i64,
}

impl BookChanges {
    pub fn validate(self) -> Result<Self, BookError> {
        check_names(&self.title, &self.author)?;
        Ok(self)
    }

    pub fn apply_to(self, book: &mut Book) {
        book.title = self.title;
        book.year = self.year;
        book.author = self.author;
        book.price = self.price;
        book.category_id = self.category_id;
    }
}

#[cfg(test)]
mod book_tests {
    use super::*;
    use crate::tests::fixtures::books::NewBookBuilder;
    use rstest::rstest;

    #[rstest]
    fn it_should_accept_a_complete_book() {
        let book = NewBookBuilder::new().build().validate();
        assert!(book.is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn it_should_reject_an_empty_title(#[case] title: &str) {
        let result = NewBookBuilder::new().title(title).build().validate();
        assert_eq!(result, Err(BookError::EmptyTitle));
    }

    #[rstest]
    fn it_should_reject_an_empty_author() {
        let result = NewBookBuilder::new().author("").build().validate();
        assert_eq!(result, Err(BookError::EmptyAuthor));
    }

    #[rstest]
    fn it_should_carry_every_field_over_when_assigned_an_id() {
        let new_book = NewBookBuilder::new().stock(3).price(1500).build();
        let book = new_book.clone().with_id(BookId::new(9).unwrap());
        assert_eq!(book.id.get(), 9);
        assert_eq!(book.title, new_book.title);
        assert_eq!(book.stock, 3);
        assert_eq!(book.price, 1500);
        assert_eq!(book.category_id, new_book.category_id);
    }

    fn changes() -> BookChanges {
        BookChanges {
            title: "Homage to Catalonia".into(),
            year: 1938,
            author: "George Orwell".into(),
            price: 900,
            category_id: 4,
        }
    }

    #[rstest]
    fn it_should_reject_changes_without_an_author() {
        let result = BookChanges {
            author: " ".into(),
            ..changes()
        }
        .validate();
        assert_eq!(result, Err(BookError::EmptyAuthor));
    }

    #[rstest]
    fn it_should_replace_everything_but_the_stock() {
        let mut book = NewBookBuilder::new()
            .stock(7)
            .build()
            .with_id(BookId::new(1).unwrap());

        changes().apply_to(&mut book);

        assert_eq!(book.title, "Homage to Catalonia");
        assert_eq!(book.year, 1938);
        assert_eq!(book.price, 900);
        assert_eq!(book.category_id, 4);
        assert_eq!(book.stock, 7);
    }
}
