//! Group-by aggregates over the filtered rows, used to drive the charts.

use std::collections::{BTreeMap, HashMap};

use time::Date;

use crate::transaction::Transaction;

/// Sums the total price of the rows in each category.
///
/// # Returns
/// Pairs of (category, total sales) sorted by category name.
pub(super) fn sales_by_category(transactions: &[&Transaction]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.total_price;
    }

    totals
        .into_iter()
        .map(|(category, total)| (category.to_owned(), total))
        .collect()
}

/// Sums the total price of the rows on each date.
///
/// # Returns
/// Pairs of (date, total sales) in chronological order.
pub(super) fn sales_by_date(transactions: &[&Transaction]) -> Vec<(Date, f64)> {
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(transaction.date).or_insert(0.0) += transaction.total_price;
    }

    totals.into_iter().collect()
}

/// Counts the rows for each payment method.
///
/// # Returns
/// Pairs of (payment method, row count), most used first. Ties are broken
/// by payment method name.
pub(super) fn payment_method_counts(transactions: &[&Transaction]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        *counts.entry(transaction.payment_method.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(payment_method, count)| (payment_method.to_owned(), count))
        .collect();
    counts.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });

    counts
}
