//! # Command Line Front End
//!
//! Each invocation performs one action against the loaded expenses and prints
//! whatever that action displays, re-derived from the current state.
//!
//! ## Commands
//!
//! - `add`: validate and store a new expense, then refresh the charts
//! - `list`: filtered table plus the overall total
//! - `total`, `categories`, `summary`: read-only views
//! - `charts`: render the three charts on demand

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use shared::{AddExpenseRequest, ExpenseFilter, FormattedExpense, ALL_CATEGORIES, DATE_FORMAT};
use std::io::Write;
use std::path::PathBuf;

use crate::backend::domain::expense_query;
use crate::backend::AppState;

#[derive(Parser, Debug)]
#[command(name = "expense-tracker", version, about = "Track personal expenses in a local JSON file")]
pub struct Cli {
    /// Directory holding the expense list, charts and config
    #[arg(long, env = "EXPENSE_TRACKER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new expense
    Add {
        #[arg(long)]
        name: String,
        /// Positive amount, e.g. 3.50
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long)]
        category: String,
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show expenses, optionally filtered
    List {
        /// Case-insensitive substring of the name
        #[arg(long, default_value = "")]
        name: String,
        /// Category to show, or "All"
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
    },
    /// Show the total of all expenses
    Total,
    /// Show the category choices
    Categories,
    /// Show totals per category
    Summary,
    /// Render the category, distribution and trend charts
    Charts {
        /// Output SVG file (defaults to the configured charts file)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Run one command against the application state, printing to `out`
pub fn run_command(command: Commands, state: &mut AppState, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Add {
            name,
            amount,
            category,
            date,
        } => {
            let request = AddExpenseRequest {
                name,
                amount,
                category,
                date: date.unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string()),
            };
            let expense = state.expense_service.add_expense(request)?;

            let row = state.expense_table_service.format_single_expense(
                state.expense_service.expenses().len(),
                &expense,
            );
            writeln!(out, "Added expense:")?;
            write_rows(out, &[row])?;
            writeln!(
                out,
                "{}",
                state
                    .expense_table_service
                    .format_total_label(state.expense_service.total())
            )?;
            writeln!(out, "Categories: {}", state.expense_service.category_choices().join(", "))?;
            if let Some(path) = state.refresh_charts() {
                writeln!(out, "Charts updated: {}", path.display())?;
            }
        }
        Commands::List { name, category } => {
            let visible = state.expense_service.filtered(&ExpenseFilter::new(name, category));
            let table = state
                .expense_table_service
                .build_table(&visible, state.expense_service.expenses());
            write_rows(out, &table.rows)?;
            writeln!(out, "{}", table.total_label)?;
        }
        Commands::Total => {
            writeln!(
                out,
                "{}",
                state
                    .expense_table_service
                    .format_total_label(state.expense_service.total())
            )?;
        }
        Commands::Categories => {
            for category in state.expense_service.category_choices() {
                writeln!(out, "{}", category)?;
            }
        }
        Commands::Summary => {
            let totals = expense_query::totals_by_category(state.expense_service.expenses());
            for (category, amount) in totals {
                writeln!(
                    out,
                    "{:<20} {:>12}",
                    category,
                    state.expense_table_service.format_amount(amount)
                )?;
            }
            writeln!(
                out,
                "{}",
                state
                    .expense_table_service
                    .format_total_label(state.expense_service.total())
            )?;
        }
        Commands::Charts { output } => {
            match state.render_charts(output.as_deref())? {
                Some(path) => writeln!(out, "Charts written to {}", path.display())?,
                None => writeln!(out, "No expenses to chart")?,
            }
        }
    }
    Ok(())
}

fn write_rows(out: &mut impl Write, rows: &[FormattedExpense]) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:<20}  {:>12}  {:<15}  {}",
        "No.", "Name", "Amount", "Category", "Date"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>4}  {:<20}  {:>12}  {:<15}  {}",
            row.serial_number, row.name, row.formatted_amount, row.category, row.formatted_date
        )?;
    }
    Ok(())
}
