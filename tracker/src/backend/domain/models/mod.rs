pub mod expense;

pub use expense::{ExpenseField, ValidationError};
