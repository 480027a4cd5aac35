use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{Amount, Expense};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::backend::storage::error::PersistenceError;

/// One entry of the persisted document as it appears on disk
///
/// `date` is optional because documents written by older versions of the
/// tracker did not record it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredExpense {
    pub name: String,
    pub amount: Amount,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl From<&Expense> for StoredExpense {
    fn from(expense: &Expense) -> Self {
        Self {
            name: expense.name.clone(),
            amount: expense.amount,
            category: expense.category.clone(),
            date: Some(expense.formatted_date()),
        }
    }
}

/// JsonConnection manages the location of the expense document and raw reads/writes
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
    file_name: String,
}

impl JsonConnection {
    /// Create a new JSON connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P, file_name: impl Into<String>) -> Result<Self, PersistenceError> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| PersistenceError::io(&base_path, e))?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            file_name: file_name.into(),
        })
    }

    /// Full path of the expense document
    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory.join(&self.file_name)
    }

    /// Read and decode the document, `None` when it does not exist
    pub fn read_document(&self) -> Result<Option<Vec<StoredExpense>>, PersistenceError> {
        let file_path = self.expenses_file_path();

        let contents = match fs::read_to_string(&file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(file_path, e)),
        };

        let entries: Vec<StoredExpense> = serde_json::from_str(&contents)
            .map_err(|source| PersistenceError::Malformed {
                path: file_path.clone(),
                source,
            })?;

        debug!("Read {} entries from {}", entries.len(), file_path.display());
        Ok(Some(entries))
    }

    /// Overwrite the document with the given list
    ///
    /// The list is written to a sibling temporary file first and then moved
    /// over the document.
    pub fn write_document(&self, expenses: &[Expense]) -> Result<(), PersistenceError> {
        let file_path = self.expenses_file_path();
        let entries: Vec<StoredExpense> = expenses.iter().map(StoredExpense::from).collect();

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        entries
            .serialize(&mut serializer)
            .map_err(|source| PersistenceError::Encode {
                path: file_path.clone(),
                source,
            })?;

        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, &buffer).map_err(|e| PersistenceError::io(&temp_path, e))?;
        fs::rename(&temp_path, &file_path).map_err(|e| PersistenceError::io(&file_path, e))?;

        debug!("Wrote {} entries to {}", entries.len(), file_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let connection = JsonConnection::new(&nested, "Expenses.json").unwrap();

        assert!(nested.is_dir());
        assert_eq!(connection.expenses_file_path(), nested.join("Expenses.json"));
    }

    #[test]
    fn test_read_missing_document_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path(), "Expenses.json").unwrap();

        assert!(connection.read_document().unwrap().is_none());
    }

    #[test]
    fn test_write_uses_four_space_indent_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path(), "Expenses.json").unwrap();
        let expense = Expense::new(
            "Coffee",
            Amount::from_cents(350),
            "Food",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );

        connection.write_document(&[expense]).unwrap();

        let raw = fs::read_to_string(connection.expenses_file_path()).unwrap();
        assert!(raw.contains("\n        \"name\": \"Coffee\""));
        assert!(raw.contains("\"date\": \"2024-06-01\""));
        assert!(!connection.expenses_file_path().with_extension("tmp").exists());
    }

    #[test]
    fn test_read_malformed_document_fails() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path(), "Expenses.json").unwrap();
        fs::write(connection.expenses_file_path(), "{ not json").unwrap();

        let err = connection.read_document().unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed { .. }));
    }

    #[test]
    fn test_read_entry_without_date() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path(), "Expenses.json").unwrap();
        fs::write(
            connection.expenses_file_path(),
            r#"[{"name": "Tea", "amount": 2, "category": "Drinks"}]"#,
        )
        .unwrap();

        let entries = connection.read_document().unwrap().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, Amount::from_cents(200));
        assert!(entries[0].date.is_none());
    }
}
