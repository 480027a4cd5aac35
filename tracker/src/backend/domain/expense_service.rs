//! Expense service domain logic for the expense tracker.
//!
//! This is the validated entry point for creating expenses. It owns the store,
//! runs the validate → append → persist pipeline, and exposes the read-side
//! operations the front end re-renders from.
use log::{error, info, warn};
use shared::{parse_expense_date, AddExpenseRequest, Amount, Expense, ExpenseFilter};

use crate::backend::{
    domain::{
        expense_query,
        models::{ExpenseField, ValidationError},
    },
    storage::ExpenseStorage,
};

pub struct ExpenseService<S: ExpenseStorage> {
    store: S,
}

impl<S: ExpenseStorage> ExpenseService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the persisted expenses at startup
    ///
    /// A persistence failure is logged and the session starts with an empty list.
    pub fn load_expenses(&mut self) -> usize {
        match self.store.load() {
            Ok(expenses) => expenses.len(),
            Err(e) => {
                error!("An error occurred while loading expenses: {}", e);
                0
            }
        }
    }

    /// Check the raw form input and build the expense it describes
    ///
    /// Required fields are checked first, then the amount, then the date.
    pub fn validate(request: &AddExpenseRequest) -> Result<Expense, ValidationError> {
        let required = [
            (ExpenseField::Name, &request.name),
            (ExpenseField::Amount, &request.amount),
            (ExpenseField::Category, &request.category),
            (ExpenseField::Date, &request.date),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }

        let amount_text = request.amount.trim();
        let amount = amount_text
            .parse::<Amount>()
            .map_err(|_| ValidationError::InvalidAmount(amount_text.to_string()))?;
        if !amount.is_positive() {
            return Err(ValidationError::AmountNotPositive(amount_text.to_string()));
        }

        let date_text = request.date.trim();
        let date = parse_expense_date(date_text)
            .ok_or_else(|| ValidationError::InvalidDate(date_text.to_string()))?;

        Ok(Expense::new(request.name.trim(), amount, request.category.trim(), date))
    }

    /// Validate, append and persist a new expense
    ///
    /// A failed save is logged; the expense is still part of the session and
    /// is returned as added.
    pub fn add_expense(&mut self, request: AddExpenseRequest) -> Result<Expense, ValidationError> {
        let expense = match Self::validate(&request) {
            Ok(expense) => expense,
            Err(e) => {
                warn!("Rejected expense input: {}", e);
                return Err(e);
            }
        };

        if let Err(e) = self.store.append(expense.clone()) {
            error!("Expense kept in memory but not saved: {}", e);
        }

        info!(
            "Added expense: {}, Amount: {}, Category: {}, Date: {}.",
            expense.name,
            expense.amount,
            expense.category,
            expense.formatted_date()
        );
        Ok(expense)
    }

    /// All expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        self.store.expenses()
    }

    /// Expenses matching the list view's filter inputs
    pub fn filtered(&self, expense_filter: &ExpenseFilter) -> Vec<Expense> {
        expense_query::apply_filter(self.store.expenses(), expense_filter)
    }

    /// Total over every expense, regardless of any active filter
    pub fn total(&self) -> Amount {
        expense_query::total(self.store.expenses())
    }

    pub fn category_choices(&self) -> Vec<String> {
        expense_query::category_choices(self.store.expenses())
    }

    /// Final save before exit, only when earlier saves failed
    pub fn shutdown(&mut self) {
        if let Err(e) = self.store.flush() {
            error!("Final save failed, last changes are lost: {}", e);
        }
    }
}
