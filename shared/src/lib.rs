use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Canonical textual form of an expense date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category filter value that matches every expense
pub const ALL_CATEGORIES: &str = "All";

/// Largest amount accepted, in cents
const MAX_CENTS: i64 = 100_000_000_000_000;

/// One expense entry, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// What the money was spent on
    pub name: String,
    /// Positive amount with currency precision
    pub amount: Amount,
    /// Free-text label (case-insensitive for filtering, exact for grouping)
    pub category: String,
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: Amount, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            amount,
            category: category.into(),
            date,
        }
    }

    /// Date in its canonical `YYYY-MM-DD` form
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Parse a year-month-day date such as `2024-06-01` or `2024-6-1`
///
/// The result always formats back as zero-padded `YYYY-MM-DD`.
pub fn parse_expense_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Monetary amount held as a whole number of cents
///
/// Parsed once on ingestion and never re-parsed. On the wire it is a plain
/// JSON number (`3.5`), which keeps the document compatible with files
/// written by other tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Round a floating point value to the nearest cent
    ///
    /// Returns `None` for NaN, infinities and values beyond the supported range.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > MAX_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Lossy conversion used for charting and serialization
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountParseError::Empty);
        }
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| AmountParseError::NotANumber)?;
        Self::from_f64(value).ok_or(AmountParseError::OutOfRange)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("amount {} is out of range", value)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AmountParseError {
    Empty,
    NotANumber,
    OutOfRange,
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Amount is empty"),
            AmountParseError::NotANumber => write!(f, "Amount is not a number"),
            AmountParseError::OutOfRange => write!(f, "Amount is not a finite value in the supported range"),
        }
    }
}

impl std::error::Error for AmountParseError {}

/// Raw form input for a new expense, exactly as typed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpenseRequest {
    pub name: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

/// Filter inputs of the expense list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the name; empty matches everything
    pub name: String,
    /// Case-insensitive category, or `"All"`
    pub category: String,
}

impl Default for ExpenseFilter {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl ExpenseFilter {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Represents a formatted expense row for display purposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedExpense {
    /// 1-based position within the displayed list
    pub serial_number: usize,
    pub name: String,
    pub formatted_amount: String,
    pub category: String,
    pub formatted_date: String,
    pub raw_amount: Amount,
}

/// Everything the list view shows: rows of the filtered list and the total label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTableResponse {
    pub rows: Vec<FormattedExpense>,
    pub total_label: String,
}

/// Summed amount of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Amount,
}

/// One pie slice: a category total and its share of the whole in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: Amount,
    pub percentage: f64,
}

/// One point of the trend-over-time chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub amount: Amount,
}

/// Snapshot of the three chart data sets derived from the current expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Bar chart, lexicographic by category
    pub by_category: Vec<CategoryTotal>,
    /// Pie chart, same order as `by_category`
    pub distribution: Vec<CategorySlice>,
    /// Line chart, ascending by date
    pub trend: Vec<TrendPoint>,
}
