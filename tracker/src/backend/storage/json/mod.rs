//! # JSON Storage
//!
//! File-based expense storage using a single JSON document.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── expense_tracker.yaml   ← optional configuration
//! ├── expense_charts.svg     ← last rendered charts
//! └── Expenses.json          ← this module manages this file
//! ```
//!
//! ## Document Format
//!
//! ```json
//! [
//!     {
//!         "name": "Coffee",
//!         "amount": 3.5,
//!         "category": "Food",
//!         "date": "2024-06-01"
//!     }
//! ]
//! ```
//!
//! Entries without `date` are accepted on load and receive the load-time date.

pub mod connection;
pub mod expense_store;

#[cfg(test)]
pub mod test_utils;

pub use connection::{JsonConnection, StoredExpense};
pub use expense_store::JsonExpenseStore;
