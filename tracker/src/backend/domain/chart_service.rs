//! # Chart Service
//!
//! Derives the data behind the three expense charts from the current list.
//!
//! ## Key Functions:
//! - `prepare_chart_data()` - Build the bar, pie and trend data sets
//!
//! ## Purpose:
//! Charts are a pure function of the current expenses. The renderer draws
//! whatever this module returns and replaces its previous output, so there is
//! no chart state to keep in sync.

use log::debug;
use shared::{CategorySlice, CategoryTotal, ChartData, Expense, TrendPoint};

use crate::backend::domain::expense_query;

#[derive(Debug, Clone, Default)]
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Chart data for the given expenses, `None` when there is nothing to plot
    pub fn prepare_chart_data(&self, expenses: &[Expense]) -> Option<ChartData> {
        if expenses.is_empty() {
            return None;
        }

        let by_category: Vec<CategoryTotal> = expense_query::totals_by_category(expenses)
            .into_iter()
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect();

        let grand_total = expense_query::total(expenses).to_f64();
        let distribution = by_category
            .iter()
            .map(|entry| CategorySlice {
                category: entry.category.clone(),
                amount: entry.amount,
                percentage: round_to_tenth(entry.amount.to_f64() / grand_total * 100.0),
            })
            .collect();

        let trend = expense_query::sorted_by_date(expenses)
            .into_iter()
            .map(|expense| TrendPoint {
                date: expense.date,
                amount: expense.amount,
            })
            .collect::<Vec<_>>();

        debug!(
            "Prepared chart data: {} categories, {} trend points",
            by_category.len(),
            trend.len()
        );

        Some(ChartData {
            by_category,
            distribution,
            trend,
        })
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
