//! Expense table domain logic for the expense tracker.
//!
//! This module turns expenses into the rows and total label shown by the list
//! view. It handles formatting only; which expenses are shown is decided by
//! the caller through [`crate::backend::domain::expense_query`].
//!
//! ## Key Responsibilities
//!
//! - **Row Formatting**: Serial numbers, 2-decimal amounts, canonical dates
//! - **Total Label**: `Total Expenses: $X.XX` over the whole store
//! - **Configuration Management**: Currency symbol used in labels

use serde::{Deserialize, Serialize};
use shared::{Amount, Expense, ExpenseTableResponse, FormattedExpense};

use crate::backend::domain::expense_query;

/// Configuration for expense table display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseTableConfig {
    pub currency_symbol: String,
}

impl Default for ExpenseTableConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

/// Expense table service that handles all table-related formatting
#[derive(Debug, Clone)]
pub struct ExpenseTableService {
    config: ExpenseTableConfig,
}

impl ExpenseTableService {
    /// Create a new ExpenseTableService with default configuration
    pub fn new() -> Self {
        Self {
            config: ExpenseTableConfig::default(),
        }
    }

    /// Create a new ExpenseTableService with custom configuration
    pub fn with_config(config: ExpenseTableConfig) -> Self {
        Self { config }
    }

    /// Build the list view: rows for `visible`, total over `all`
    ///
    /// The total is taken over `all`, never over the filtered rows.
    pub fn build_table(&self, visible: &[Expense], all: &[Expense]) -> ExpenseTableResponse {
        ExpenseTableResponse {
            rows: self.format_expenses_for_table(visible),
            total_label: self.format_total_label(expense_query::total(all)),
        }
    }

    /// Format a list of expenses, numbering rows from 1
    pub fn format_expenses_for_table(&self, expenses: &[Expense]) -> Vec<FormattedExpense> {
        expenses
            .iter()
            .enumerate()
            .map(|(idx, expense)| self.format_single_expense(idx + 1, expense))
            .collect()
    }

    /// Format a single expense for display
    pub fn format_single_expense(&self, serial_number: usize, expense: &Expense) -> FormattedExpense {
        FormattedExpense {
            serial_number,
            name: expense.name.clone(),
            formatted_amount: expense.amount.to_string(),
            category: expense.category.clone(),
            formatted_date: expense.formatted_date(),
            raw_amount: expense.amount,
        }
    }

    /// Format an amount with the configured currency symbol
    pub fn format_amount(&self, amount: Amount) -> String {
        format!("{}{}", self.config.currency_symbol, amount)
    }

    pub fn format_total_label(&self, total: Amount) -> String {
        format!("Total Expenses: {}", self.format_amount(total))
    }
}

impl Default for ExpenseTableService {
    fn default() -> Self {
        Self::new()
    }
}
