use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use shared::{parse_expense_date, Expense};

use super::connection::{JsonConnection, StoredExpense};
use crate::backend::storage::{error::PersistenceError, traits::ExpenseStorage};

/// JSON-backed expense store
///
/// Holds the in-memory list and rewrites the whole document on every save.
#[derive(Debug)]
pub struct JsonExpenseStore {
    connection: JsonConnection,
    expenses: Vec<Expense>,
    unsaved_changes: bool,
}

impl JsonExpenseStore {
    /// Create an empty store; call `load` to read the document
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            connection,
            expenses: Vec::new(),
            unsaved_changes: false,
        }
    }

    /// Load the document, backfilling missing dates with `today`
    ///
    /// Entries that are not valid expenses are skipped with a warning. On
    /// failure the current list is left as it was.
    pub fn load_as_of(&mut self, today: NaiveDate) -> Result<Vec<Expense>, PersistenceError> {
        let file_path = self.connection.expenses_file_path();

        let entries = match self.connection.read_document()? {
            Some(entries) => entries,
            None => {
                info!(
                    "Expenses file {} not found; starting with an empty list.",
                    file_path.display()
                );
                self.expenses.clear();
                self.unsaved_changes = false;
                return Ok(Vec::new());
            }
        };

        let mut backfilled = 0;
        let mut expenses = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let undated = entry.date.is_none();
            match Self::decode_entry(entry, today) {
                Ok(expense) => {
                    if undated {
                        backfilled += 1;
                    }
                    expenses.push(expense);
                }
                Err(reason) => {
                    warn!(
                        "Skipping expense #{} in {}: {}",
                        index,
                        file_path.display(),
                        reason
                    );
                }
            }
        }

        if backfilled > 0 {
            info!("Assigned today's date ({}) to {} undated expenses", today, backfilled);
        }
        info!("Successfully loaded {} expenses.", expenses.len());

        self.expenses = expenses.clone();
        self.unsaved_changes = false;
        Ok(expenses)
    }

    /// Turn one stored entry into a validated expense
    fn decode_entry(entry: StoredExpense, today: NaiveDate) -> Result<Expense, String> {
        if entry.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        if !entry.amount.is_positive() {
            return Err(format!("amount {} is not positive", entry.amount));
        }
        let date = match entry.date {
            Some(text) => parse_expense_date(&text).ok_or_else(|| format!("date '{}' is not a valid YYYY-MM-DD date", text))?,
            None => today,
        };

        Ok(Expense {
            name: entry.name,
            amount: entry.amount,
            category: entry.category,
            date,
        })
    }
}

impl ExpenseStorage for JsonExpenseStore {
    fn load(&mut self) -> Result<Vec<Expense>, PersistenceError> {
        self.load_as_of(Local::now().date_naive())
    }

    fn save(&mut self) -> Result<(), PersistenceError> {
        match self.connection.write_document(&self.expenses) {
            Ok(()) => {
                self.unsaved_changes = false;
                info!("Expenses saved successfully.");
                Ok(())
            }
            Err(e) => {
                error!("Error writing to file: {}", e);
                Err(e)
            }
        }
    }

    fn append(&mut self, expense: Expense) -> Result<(), PersistenceError> {
        self.expenses.push(expense);
        self.unsaved_changes = true;
        self.save()
    }

    fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::test_utils::{sample_expense, TestEnvironment};
    use shared::Amount;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_missing_document_is_empty() {
        let env = TestEnvironment::new().unwrap();
        let mut store = env.create_store();

        let loaded = store.load().unwrap();

        assert!(loaded.is_empty());
        assert!(store.expenses().is_empty());
        assert!(!env.document_path().exists());
    }

    #[test]
    fn test_append_preserves_order_and_persists() {
        let env = TestEnvironment::new().unwrap();
        let mut store = env.create_store();

        store.append(sample_expense("Rent", 120000, "Home", "2024-01-01")).unwrap();
        store.append(sample_expense("Coffee", 350, "Food", "2023-12-31")).unwrap();

        let names: Vec<&str> = store.expenses().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Coffee"]);
        assert!(!store.has_unsaved_changes());

        let mut reloaded = env.create_store();
        assert_eq!(reloaded.load().unwrap(), store.expenses().to_vec());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let env = TestEnvironment::new().unwrap();
        let mut store = env.create_store();
        let expenses = vec![
            sample_expense("Coffee", 350, "Food", "2024-06-01"),
            sample_expense("Bus", 275, "Transport", "2024-05-30"),
            sample_expense("Decof", 1999, "food", "2024-06-01"),
        ];
        for expense in &expenses {
            store.append(expense.clone()).unwrap();
        }

        store.save().unwrap();
        let mut reloaded = env.create_store();
        let loaded = reloaded.load().unwrap();

        assert_eq!(loaded, expenses);
        assert_eq!(reloaded.expenses(), expenses.as_slice());
    }

    #[test]
    fn test_missing_date_is_backfilled_on_first_load_only() {
        let env = TestEnvironment::new().unwrap();
        env.write_raw_document(
            r#"[
                {"name": "Tea", "amount": 2.5, "category": "Drinks"},
                {"name": "Cake", "amount": 4, "category": "Food", "date": "2024-03-02"}
            ]"#,
        );

        let mut store = env.create_store();
        let first = store.load_as_of(date(2024, 6, 1)).unwrap();
        assert_eq!(first[0].date, date(2024, 6, 1));
        assert_eq!(first[1].date, date(2024, 3, 2));
        assert_eq!(first[0].amount, Amount::from_cents(250));

        store.save().unwrap();

        let mut later = env.create_store();
        let second = later.load_as_of(date(2025, 1, 1)).unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn test_malformed_document_fails_without_touching_state() {
        let env = TestEnvironment::new().unwrap();
        env.write_raw_document("[{\"name\": \"Tea\"");

        let mut store = env.create_store();
        let err = store.load().unwrap_err();

        assert!(matches!(err, PersistenceError::Malformed { .. }));
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let env = TestEnvironment::new().unwrap();
        env.write_raw_document(
            r#"[
                {"name": "Rent", "amount": 900, "category": "Home", "date": "2024-05-01"},
                {"name": "Refund", "amount": -5, "category": "Home", "date": "2024-05-02"},
                {"name": "Nothing", "amount": 0, "category": "Misc", "date": "2024-05-02"},
                {"name": "Tea", "amount": 2, "category": "Drinks", "date": "2024-13-40"},
                {"name": "", "amount": 2, "category": "Drinks", "date": "2024-05-03"},
                {"name": "Bus", "amount": 2.25, "category": "Transport", "date": "2024-05-04"}
            ]"#,
        );
        let mut store = env.create_store();

        let loaded = store.load().unwrap();

        let names: Vec<&str> = loaded.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Bus"]);
        assert_eq!(store.expenses(), loaded.as_slice());
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_unpadded_stored_date_is_normalised() {
        let env = TestEnvironment::new().unwrap();
        env.write_raw_document(r#"[{"name": "Tea", "amount": 2, "category": "Drinks", "date": "2024-6-1"}]"#);
        let mut store = env.create_store();

        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].date, date(2024, 6, 1));

        store.save().unwrap();
        assert!(env.read_raw_document().contains("\"date\": \"2024-06-01\""));
    }

    #[test]
    fn test_failed_save_keeps_expense_in_memory() {
        let env = TestEnvironment::new().unwrap();
        let mut store = env.create_store();
        // A directory where the document should be makes the final rename fail
        std::fs::create_dir(env.document_path()).unwrap();

        let result = store.append(sample_expense("Coffee", 350, "Food", "2024-06-01"));

        assert!(result.is_err());
        assert_eq!(store.expenses().len(), 1);
        assert!(store.has_unsaved_changes());
        assert!(store.flush().is_err());

        std::fs::remove_dir(env.document_path()).unwrap();
        store.flush().unwrap();
        assert!(!store.has_unsaved_changes());
        assert_eq!(env.create_store().load().unwrap().len(), 1);
    }

    #[test]
    fn test_flush_without_changes_does_not_write() {
        let env = TestEnvironment::new().unwrap();
        let mut store = env.create_store();
        store.load().unwrap();

        store.flush().unwrap();

        assert!(!env.document_path().exists());
    }
}
