//! # Storage Module
//!
//! Handles all data persistence for the expense tracker.
//!
//! The store owns the authoritative in-memory list of expenses and mirrors it
//! into a single JSON document. The domain layer only sees the
//! [`ExpenseStorage`] trait, so the backing format can change without
//! touching business logic.
//!
//! ## Key Responsibilities
//!
//! - **Loading**: Reading the document once at startup, with date backfill
//! - **Saving**: Rewriting the whole document after every mutation
//! - **Ordering**: Preserving insertion order of expenses
//!
//! ## Current Implementation
//!
//! - **Format**: One pretty-printed JSON array (`Expenses.json`)
//! - **Writes**: Full rewrite through a temporary file renamed into place
//! - **Concurrency**: None; one process owns the document

pub mod error;
pub mod json;
pub mod traits;

pub use error::PersistenceError;
pub use json::{JsonConnection, JsonExpenseStore};
pub use traits::ExpenseStorage;
