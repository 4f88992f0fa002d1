//! Transaction data aggregation for the monthly chart.
//!
//! Transactions are bucketed by calendar month. Buckets are keyed by year and
//! month, so March 2023 and March 2024 are kept apart.

use std::collections::BTreeMap;

use time::{Date, Month};

use crate::transaction::Transaction;

/// The sum of transaction amounts for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthlyTotal {
    /// The first day of the month.
    pub month: Date,
    /// The sum of the amounts of all transactions in the month.
    pub total: f64,
}

/// Sums transaction amounts by month.
///
/// # Returns
/// One [MonthlyTotal] per month that has at least one transaction, in
/// chronological order.
pub(super) fn aggregate_by_month(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(first_of_month(transaction.date)).or_insert(0.0) += transaction.amount;
    }

    totals
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

fn first_of_month(date: Date) -> Date {
    // Every month has a first day, so this cannot fail.
    date.replace_day(1).unwrap_or(date)
}

/// Formats a month as a three-letter abbreviation and the year, e.g. "Mar 2024".
pub(super) fn format_month_label(month: Date) -> String {
    let name = match month.month() {
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
    };

    format!("{name} {}", month.year())
}

/// Converts monthly totals into labels and values for charting.
///
/// # Returns
/// Tuple of (month labels, corresponding totals), both in chronological order.
pub(super) fn get_monthly_label_and_value_pairs(
    monthly_totals: &[MonthlyTotal],
) -> (Vec<String>, Vec<f64>) {
    monthly_totals
        .iter()
        .map(|monthly_total| {
            (
                format_month_label(monthly_total.month),
                monthly_total.total,
            )
        })
        .unzip()
}
