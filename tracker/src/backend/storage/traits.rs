//! # Storage Traits
//!
//! This module defines the storage abstraction that lets the domain layer
//! work with the expense list without knowing how it is persisted.

use shared::Expense;

use super::error::PersistenceError;

/// Trait defining the interface of the expense store
///
/// An implementation owns the authoritative in-memory list of expenses and
/// keeps it in sync with a persisted document. The list preserves insertion
/// order.
pub trait ExpenseStorage {
    /// Read the persisted document and make its contents the current list
    ///
    /// A missing document yields an empty list without error.
    fn load(&mut self) -> Result<Vec<Expense>, PersistenceError>;

    /// Overwrite the persisted document with the full current list
    fn save(&mut self) -> Result<(), PersistenceError>;

    /// Add an expense at the end of the list, then save
    ///
    /// The expense stays in memory even when the save fails.
    fn append(&mut self, expense: Expense) -> Result<(), PersistenceError>;

    /// The current list, in insertion order
    fn expenses(&self) -> &[Expense];

    /// Whether the in-memory list holds changes that have not reached disk
    fn has_unsaved_changes(&self) -> bool;

    /// Save only if a previous save left changes behind
    fn flush(&mut self) -> Result<(), PersistenceError> {
        if self.has_unsaved_changes() {
            self.save()
        } else {
            Ok(())
        }
    }
}
