//! # Domain Module
//!
//! Contains all business logic for the expense tracker application.
//!
//! This module holds the rules for what counts as a valid expense and how the
//! list is filtered, totalled and summarized. It operates independently of the
//! command line front end and of the on-disk document format.
//!
//! ## Module Organization
//!
//! - **expense_service**: Validated add pipeline and read-side façade over the store
//! - **expense_query**: Pure filtering, totals, grouping and date ordering
//! - **expense_table**: Row and total label formatting for the list view
//! - **chart_service**: Data sets behind the category, distribution and trend charts
//! - **models**: Validation errors and form field names
//!
//! ## Business Rules
//!
//! - Name, amount, category and date are all required
//! - Amounts are strictly positive and kept to whole cents
//! - Dates are real calendar days written as `YYYY-MM-DD`
//! - Filtering compares case-insensitively; grouping does not
//! - The displayed total always covers every stored expense

pub mod chart_service;
pub mod expense_query;
pub mod expense_service;
pub mod expense_table;
pub mod models;

pub use chart_service::ChartService;
pub use expense_service::ExpenseService;
pub use expense_table::{ExpenseTableConfig, ExpenseTableService};
pub use models::{ExpenseField, ValidationError};
