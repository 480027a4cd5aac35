//! Stateless filtering and aggregation over a list of expenses.
//!
//! Every function here is a pure function of its input slice. Callers decide
//! whether they pass the whole store or a filtered view; the displayed total
//! is always computed over the whole store.
//!
//! Filtering compares categories case-insensitively while grouping keeps
//! categories apart by exact spelling, so `"Food"` and `"food"` both pass a
//! `"Food"` filter but show up as two bars in the category chart.

use shared::{Amount, Expense, ExpenseFilter, ALL_CATEGORIES};
use std::collections::{BTreeMap, BTreeSet};

/// Keep expenses matching the category (or `"All"`) and containing `name_substring`
pub fn filter(expenses: &[Expense], name_substring: &str, category: &str) -> Vec<Expense> {
    let category_wanted = category.to_lowercase();
    let name_wanted = name_substring.to_lowercase();

    expenses
        .iter()
        .filter(|e| category == ALL_CATEGORIES || e.category.to_lowercase() == category_wanted)
        .filter(|e| name_wanted.is_empty() || e.name.to_lowercase().contains(&name_wanted))
        .cloned()
        .collect()
}

/// Same as [`filter`], driven by the list view's filter inputs
pub fn apply_filter(expenses: &[Expense], expense_filter: &ExpenseFilter) -> Vec<Expense> {
    filter(expenses, &expense_filter.name, &expense_filter.category)
}

/// Sum of all amounts
pub fn total(expenses: &[Expense]) -> Amount {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of amounts per exact category string, ordered by category
pub fn totals_by_category(expenses: &[Expense]) -> BTreeMap<String, Amount> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(Amount::ZERO) += expense.amount;
    }
    totals
}

/// Stable ascending sort by date
pub fn sorted_by_date(expenses: &[Expense]) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
}

/// Values for the category filter: `"All"` then each distinct category in order
pub fn category_choices(expenses: &[Expense]) -> Vec<String> {
    let distinct: BTreeSet<&str> = expenses.iter().map(|e| e.category.as_str()).collect();
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::test_utils::sample_expense;

    fn names(expenses: &[Expense]) -> Vec<&str> {
        expenses.iter().map(|e| e.name.as_str()).collect()
    }

    fn fixture() -> Vec<Expense> {
        vec![
            sample_expense("Coffee", 350, "Food", "2024-06-03"),
            sample_expense("Apples", 420, "Groceries", "2024-06-01"),
            sample_expense("Decof", 500, "food", "2024-06-02"),
            sample_expense("Tea", 200, "Drinks", "2024-06-01"),
        ]
    }

    #[test]
    fn test_filter_category_is_case_insensitive() {
        let expenses = fixture();

        let result = filter(&expenses, "", "food");

        assert_eq!(names(&result), vec!["Coffee", "Decof"]);
    }

    #[test]
    fn test_filter_category_excludes_other_categories() {
        let expenses = fixture();

        let result = filter(&expenses, "", "Food");

        assert!(!result.iter().any(|e| e.category == "Groceries"));
    }

    #[test]
    fn test_filter_name_substring_is_case_insensitive() {
        let expenses = fixture();

        let result = filter(&expenses, "cof", ALL_CATEGORIES);

        assert_eq!(names(&result), vec!["Coffee", "Decof"]);
    }

    #[test]
    fn test_filter_combines_name_and_category() {
        let expenses = fixture();

        assert_eq!(names(&filter(&expenses, "DEC", "FOOD")), vec!["Decof"]);
        assert!(filter(&expenses, "tea", "Food").is_empty());
    }

    #[test]
    fn test_default_filter_keeps_everything_in_order() {
        let expenses = fixture();

        let result = apply_filter(&expenses, &ExpenseFilter::default());

        assert_eq!(result, expenses);
    }

    #[test]
    fn test_all_is_matched_literally() {
        let mut expenses = fixture();
        expenses.push(sample_expense("Misc", 100, "all", "2024-06-04"));

        assert_eq!(filter(&expenses, "", "All").len(), 5);
        assert_eq!(names(&filter(&expenses, "", "ALL")), vec!["Misc"]);
    }

    #[test]
    fn test_grouping_is_case_sensitive_while_filtering_is_not() {
        let expenses = vec![
            sample_expense("Lunch", 1000, "Food", "2024-06-01"),
            sample_expense("Snack", 500, "food", "2024-06-01"),
        ];

        let totals = totals_by_category(&expenses);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Food"], Amount::from_cents(1000));
        assert_eq!(totals["food"], Amount::from_cents(500));

        assert_eq!(filter(&expenses, "", "Food").len(), 2);
    }

    #[test]
    fn test_totals_by_category_iterates_lexicographically() {
        let totals = totals_by_category(&fixture());

        let keys: Vec<&str> = totals.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Drinks", "Food", "Groceries", "food"]);
    }

    #[test]
    fn test_total_is_permutation_invariant() {
        let expenses = fixture();
        let mut reversed = expenses.clone();
        reversed.reverse();
        let mut rotated = expenses.clone();
        rotated.rotate_left(2);

        assert_eq!(total(&expenses), Amount::from_cents(1470));
        assert_eq!(total(&reversed), total(&expenses));
        assert_eq!(total(&rotated), total(&expenses));
        assert_eq!(total(&[]), Amount::ZERO);
    }

    #[test]
    fn test_sorted_by_date_is_stable_and_idempotent() {
        let expenses = fixture();

        let sorted = sorted_by_date(&expenses);
        // Apples and Tea share a date and keep their original relative order
        assert_eq!(names(&sorted), vec!["Apples", "Tea", "Decof", "Coffee"]);
        assert_eq!(sorted_by_date(&sorted), sorted);
    }

    #[test]
    fn test_category_choices() {
        assert_eq!(
            category_choices(&fixture()),
            vec!["All", "Drinks", "Food", "Groceries", "food"]
        );
        assert_eq!(category_choices(&[]), vec!["All"]);
    }
}
