//! Exact set-membership filtering over the Date, Category and Payment_Method columns.

use std::collections::HashSet;

use serde::Deserialize;
use time::Date;

use crate::transaction::Transaction;

/// The unique values of each filterable column, in the order they first
/// appear in the dataset.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct FilterOptions {
    pub dates: Vec<Date>,
    pub categories: Vec<String>,
    pub payment_methods: Vec<String>,
}

impl FilterOptions {
    pub(super) fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut options = Self::default();

        for transaction in transactions {
            if !options.dates.contains(&transaction.date) {
                options.dates.push(transaction.date);
            }

            push_unique(&mut options.categories, &transaction.category);
            push_unique(&mut options.payment_methods, &transaction.payment_method);
        }

        options
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_owned());
    }
}

/// The body of the filter form.
///
/// Each checkbox submits its own key, so a column with several selected values
/// repeats its key. Unchecking every box of a column removes the key entirely,
/// which is read as an empty selection.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterForm {
    #[serde(default)]
    pub dates: Vec<Date>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub payment_methods: Vec<String>,
}

/// The selected values for each filterable column.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct TransactionFilter {
    pub dates: HashSet<Date>,
    pub categories: HashSet<String>,
    pub payment_methods: HashSet<String>,
}

impl TransactionFilter {
    /// A filter that selects every option, i.e. keeps every row of the dataset
    /// the options were taken from.
    pub(super) fn select_all(options: &FilterOptions) -> Self {
        Self {
            dates: options.dates.iter().copied().collect(),
            categories: options.categories.iter().cloned().collect(),
            payment_methods: options.payment_methods.iter().cloned().collect(),
        }
    }

    /// Keep the rows whose date, category and payment method are all selected.
    ///
    /// An empty selection for any column yields no rows.
    pub(super) fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|transaction| self.matches(transaction))
            .collect()
    }

    fn matches(&self, transaction: &Transaction) -> bool {
        self.dates.contains(&transaction.date)
            && self.categories.contains(&transaction.category)
            && self.payment_methods.contains(&transaction.payment_method)
    }
}

impl From<FilterForm> for TransactionFilter {
    fn from(form: FilterForm) -> Self {
        Self {
            dates: form.dates.into_iter().collect(),
            categories: form.categories.into_iter().collect(),
            payment_methods: form.payment_methods.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Transaction, test_utils::transaction_with};

    use super::{FilterForm, FilterOptions, TransactionFilter};

    fn sample_dataset() -> Vec<Transaction> {
        vec![
            transaction_with(1, date!(2025 - 01 - 02), "Dairy", "Cash", 3.0),
            transaction_with(2, date!(2025 - 01 - 01), "Bakery", "Credit Card", 5.5),
            transaction_with(3, date!(2025 - 01 - 02), "Dairy", "Mobile Payment", 2.25),
            transaction_with(4, date!(2025 - 01 - 03), "Fruits", "Cash", 8.0),
        ]
    }

    #[test]
    fn options_are_unique_in_first_seen_order() {
        let options = FilterOptions::from_transactions(&sample_dataset());

        assert_eq!(
            options.dates,
            vec![
                date!(2025 - 01 - 02),
                date!(2025 - 01 - 01),
                date!(2025 - 01 - 03)
            ]
        );
        assert_eq!(options.categories, vec!["Dairy", "Bakery", "Fruits"]);
        assert_eq!(
            options.payment_methods,
            vec!["Cash", "Credit Card", "Mobile Payment"]
        );
    }

    #[test]
    fn options_for_empty_dataset_are_empty() {
        assert_eq!(FilterOptions::from_transactions(&[]), FilterOptions::default());
    }

    #[test]
    fn selecting_all_options_keeps_every_row() {
        let transactions = sample_dataset();
        let filter = TransactionFilter::select_all(&FilterOptions::from_transactions(&transactions));

        let got = filter.apply(&transactions);

        assert_eq!(got.len(), transactions.len());
    }

    #[test]
    fn empty_selection_keeps_no_rows() {
        let transactions = sample_dataset();
        let options = FilterOptions::from_transactions(&transactions);

        let mut no_dates = TransactionFilter::select_all(&options);
        no_dates.dates.clear();
        let mut no_categories = TransactionFilter::select_all(&options);
        no_categories.categories.clear();
        let mut no_payment_methods = TransactionFilter::select_all(&options);
        no_payment_methods.payment_methods.clear();

        for filter in [no_dates, no_categories, no_payment_methods] {
            assert!(
                filter.apply(&transactions).is_empty(),
                "want no rows for {filter:?}"
            );
        }
    }

    #[test]
    fn keeps_rows_matching_all_three_columns() {
        let transactions = sample_dataset();
        let filter = TransactionFilter::from(FilterForm {
            dates: vec![date!(2025 - 01 - 02), date!(2025 - 01 - 03)],
            categories: vec!["Dairy".to_owned(), "Fruits".to_owned()],
            payment_methods: vec!["Cash".to_owned()],
        });

        let got_ids = filter
            .apply(&transactions)
            .iter()
            .map(|transaction| transaction.transaction_id)
            .collect::<Vec<_>>();

        assert_eq!(got_ids, vec![1, 4]);
    }

    #[test]
    fn unknown_values_match_nothing() {
        let transactions = sample_dataset();
        let filter = TransactionFilter::from(FilterForm {
            dates: vec![date!(2025 - 01 - 02)],
            categories: vec!["dairy".to_owned()],
            payment_methods: vec!["Cash".to_owned()],
        });

        assert!(filter.apply(&transactions).is_empty());
    }

    #[test]
    fn filter_form_handles_repeated_keys() {
        let form: FilterForm = serde_html_form::from_str(
            "dates=2025-01-01&dates=2025-01-02&categories=Dairy\
            &payment_methods=Credit+Card&payment_methods=Cash",
        )
        .unwrap();

        assert_eq!(form.dates, vec![date!(2025 - 01 - 01), date!(2025 - 01 - 02)]);
        assert_eq!(form.categories, vec!["Dairy"]);
        assert_eq!(form.payment_methods, vec!["Credit Card", "Cash"]);
    }

    #[test]
    fn filter_form_treats_missing_keys_as_empty_selection() {
        let form: FilterForm = serde_html_form::from_str("categories=Dairy").unwrap();

        assert!(form.dates.is_empty());
        assert_eq!(form.categories, vec!["Dairy"]);
        assert!(form.payment_methods.is_empty());
    }
}
