/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use std::path::PathBuf;

use anyhow::Result;
use shared::{parse_expense_date, Amount, Expense};
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::expense_store::JsonExpenseStore;

pub const TEST_FILE_NAME: &str = "Expenses.json";

/// RAII Test Environment that automatically cleans up on drop
pub struct TestEnvironment {
    /// The temporary directory - kept alive to prevent auto-cleanup until drop
    _temp_dir: TempDir,
    /// The JSON connection for the test
    pub connection: JsonConnection,
}

impl TestEnvironment {
    /// Create a new test environment with automatic cleanup
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path(), TEST_FILE_NAME)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
        })
    }

    /// Path of the expense document inside this environment
    pub fn document_path(&self) -> PathBuf {
        self.connection.expenses_file_path()
    }

    /// A fresh, unloaded store over this environment's document
    pub fn create_store(&self) -> JsonExpenseStore {
        JsonExpenseStore::new(self.connection.clone())
    }

    /// Replace the document with arbitrary text
    pub fn write_raw_document(&self, contents: &str) {
        std::fs::write(self.document_path(), contents).expect("failed to write test document");
    }

    /// Current document text
    pub fn read_raw_document(&self) -> String {
        std::fs::read_to_string(self.document_path()).expect("failed to read test document")
    }
}

/// Build an expense from literal test data
pub fn sample_expense(name: &str, cents: i64, category: &str, date: &str) -> Expense {
    Expense::new(
        name,
        Amount::from_cents(cents),
        category,
        parse_expense_date(date).expect("test date must be a real day"),
    )
}
