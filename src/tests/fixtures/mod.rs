pub mod books;
pub mod state;
