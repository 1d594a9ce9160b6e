//! Transaction data aggregation for the dashboard.
//!
//! Provides pure functions to total income and expenses, group expenses by
//! category and tag, and bucket activity by calendar month for trend charts.
//! None of these functions mutate their input or perform I/O, so they are
//! safe to call concurrently with any other read-only operation.
//!
//! All functions expect transactions that belong to a single owner; filtering
//! by owner is the caller's responsibility (see
//! [transactions_for_owner](crate::transactions_for_owner)).

use std::collections::HashMap;

use serde::Serialize;
use time::{Date, Month};

use crate::transaction::{Transaction, TransactionKind};

/// The label that groups expenses without a tag in [tag_breakdown].
pub const UNTAGGED_LABEL: &str = "untagged";

/// The fixed color palette for category chart segments.
///
/// Categories are assigned colors in first-seen order, wrapping around when
/// there are more categories than colors.
pub const CATEGORY_COLORS: [&str; 7] = [
    "#10B981", "#3B82F6", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#6366F1",
];

/// Totals and the per-category expense breakdown for a set of transactions.
///
/// A summary is recomputed on demand and never persisted; it is a pure
/// function of the transaction set at the time of the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
    /// Expense totals per category, in first-seen order.
    pub category_breakdown: Vec<CategorySlice>,
}

/// One category bucket of the expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    /// The category label.
    pub name: String,
    /// The summed expense amount for the category.
    pub value: f64,
    /// The chart color assigned to the category.
    pub color: &'static str,
}

/// One tag bucket of a category drill-down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagSlice {
    /// The tag label, or [UNTAGGED_LABEL] for expenses without a tag.
    pub name: String,
    /// The summed expense amount for the tag.
    pub value: f64,
}

/// One month of the income/expense trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// The first day of the month this point covers.
    pub month: Date,
    /// The three-letter month name used as the chart label.
    pub name: String,
    /// The sum of income amounts in the month.
    pub income: f64,
    /// The sum of expense amounts in the month.
    pub expenses: f64,
}

/// Computes the dashboard summary for a set of transactions.
///
/// A single pass accumulates the income and expense totals and adds each
/// expense amount into its category bucket. Buckets appear in the order their
/// category is first seen, which also fixes the color assignment: colors are
/// taken from [CATEGORY_COLORS] in first-seen order, cycling when there are
/// more categories than palette entries.
///
/// # Returns
/// A [Summary] where `balance == income - expenses` exactly and every expense
/// amount is accounted in exactly one category bucket. An empty input yields
/// all-zero totals and an empty breakdown.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income = 0.0;
    let mut expenses = 0.0;
    let mut bucket_indices: HashMap<&str, usize> = HashMap::new();
    let mut category_breakdown: Vec<CategorySlice> = Vec::new();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => income += transaction.amount,
            TransactionKind::Expense => {
                expenses += transaction.amount;

                match bucket_indices.get(transaction.category.as_str()) {
                    Some(&index) => category_breakdown[index].value += transaction.amount,
                    None => {
                        bucket_indices.insert(&transaction.category, category_breakdown.len());
                        category_breakdown.push(CategorySlice {
                            name: transaction.category.clone(),
                            value: transaction.amount,
                            color: CATEGORY_COLORS
                                [category_breakdown.len() % CATEGORY_COLORS.len()],
                        });
                    }
                }
            }
        }
    }

    Summary {
        income,
        expenses,
        balance: income - expenses,
        category_breakdown,
    }
}

/// Breaks down one category's expenses by tag.
///
/// Only expense-kind transactions whose category matches `category` exactly
/// (case-sensitive) are counted. Expenses without a tag are grouped under
/// [UNTAGGED_LABEL].
///
/// # Returns
/// Tag buckets sorted by summed amount in descending order. Ties are broken
/// by tag label in ascending order, so repeated calls with the same input
/// produce the same output.
pub fn tag_breakdown(transactions: &[Transaction], category: &str) -> Vec<TagSlice> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && t.category == category)
    {
        let tag = transaction.tag.as_deref().unwrap_or(UNTAGGED_LABEL);
        *totals.entry(tag).or_insert(0.0) += transaction.amount;
    }

    let mut slices: Vec<TagSlice> = totals
        .into_iter()
        .map(|(name, value)| TagSlice {
            name: name.to_owned(),
            value,
        })
        .collect();

    slices.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));

    slices
}

/// Buckets transactions into the most recent `month_count` calendar months.
///
/// The window is anchored at the month of the latest transaction date and
/// returned in chronological order (oldest first). The calendar range is
/// contiguous: months without any transactions still appear with zero sums.
///
/// # Returns
/// One [TrendPoint] per month. Empty when `transactions` is empty or
/// `month_count` is zero.
pub fn monthly_trend(transactions: &[Transaction], month_count: usize) -> Vec<TrendPoint> {
    let latest_month = match transactions.iter().map(|t| t.date).max() {
        Some(date) => date.replace_day(1).unwrap(),
        None => return Vec::new(),
    };

    let mut months = Vec::with_capacity(month_count);
    let mut month = latest_month;
    for _ in 0..month_count {
        months.push(month);
        month = previous_month(month);
    }
    months.reverse();

    let mut income_by_month: HashMap<Date, f64> = HashMap::new();
    let mut expenses_by_month: HashMap<Date, f64> = HashMap::new();

    for transaction in transactions {
        let month = transaction.date.replace_day(1).unwrap();
        let totals = match transaction.kind {
            TransactionKind::Income => &mut income_by_month,
            TransactionKind::Expense => &mut expenses_by_month,
        };
        *totals.entry(month).or_insert(0.0) += transaction.amount;
    }

    months
        .into_iter()
        .map(|month| TrendPoint {
            month,
            name: month_label(month).to_owned(),
            income: income_by_month.get(&month).copied().unwrap_or(0.0),
            expenses: expenses_by_month.get(&month).copied().unwrap_or(0.0),
        })
        .collect()
}

/// The first day of the month before `month`.
fn previous_month(month: Date) -> Date {
    let year = match month.month() {
        Month::January => month.year() - 1,
        _ => month.year(),
    };

    Date::from_calendar_date(year, month.month().previous(), 1).unwrap()
}

/// Formats a month as its three-letter abbreviation (e.g., "Jan", "Feb").
fn month_label(month: Date) -> &'static str {
    match month.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
