use std::fmt;

/// Form fields that must be filled before an expense can be added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Name,
    Amount,
    Category,
    Date,
}

impl fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseField::Name => "name",
            ExpenseField::Amount => "amount",
            ExpenseField::Category => "category",
            ExpenseField::Date => "date",
        };
        write!(f, "{}", label)
    }
}

/// Reasons a new expense is rejected; nothing is stored when one occurs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill all fields: {0} is missing")]
    MissingField(ExpenseField),
    #[error("Invalid amount '{0}': enter a number like 5 or 5.00")]
    InvalidAmount(String),
    #[error("Invalid amount '{0}': amount must be greater than 0")]
    AmountNotPositive(String),
    #[error("Invalid date '{0}': use a real calendar date in YYYY-MM-DD form")]
    InvalidDate(String),
}
