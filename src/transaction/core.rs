//! Defines the core data model for transactions and the validation of new transactions.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// CANDIDATE SETS
// ============================================================================

/// The product categories offered when adding a transaction.
pub const CATEGORIES: [&str; 7] = [
    "Bakery",
    "Beverages",
    "Dairy",
    "Fruits",
    "Meat",
    "Snacks",
    "Vegetables",
];

/// The payment methods offered when adding a transaction.
pub const PAYMENT_METHODS: [&str; 4] = ["Cash", "Credit Card", "Debit Card", "Mobile Payment"];

/// The store locations offered when adding a transaction.
pub const STORE_LOCATIONS: [&str; 4] = ["Store A", "Store B", "Store C", "Store D"];

/// Stored totals within half a cent of `quantity * unit_price` are treated as consistent.
const TOTAL_TOLERANCE: f64 = 0.005;

/// How far, in cents, a unit price may be from a whole number of cents.
const CENT_TOLERANCE: f64 = 1e-6;

// ============================================================================
// MODELS
// ============================================================================

/// A single sale, i.e. one row of the dataset.
///
/// The serde field names match the column headers of the CSV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The unique ID of the transaction.
    #[serde(rename = "Transaction_ID")]
    pub transaction_id: i64,
    /// When the sale happened.
    #[serde(rename = "Date")]
    pub date: Date,
    /// The ID of the customer who made the purchase.
    #[serde(rename = "Customer_ID")]
    pub customer_id: String,
    /// The ID of the product that was sold.
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    /// The display name of the product that was sold.
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    /// The product category, e.g. "Dairy".
    #[serde(rename = "Category")]
    pub category: String,
    /// How many units were sold.
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    /// The price of a single unit in dollars.
    #[serde(rename = "Unit_Price")]
    pub unit_price: f64,
    /// The price of the whole sale in dollars.
    ///
    /// This should equal `quantity * unit_price`, but this is only guaranteed
    /// for rows written by this application. Rows edited by hand may be stale,
    /// see [Transaction::has_consistent_total].
    #[serde(rename = "Total_Price")]
    pub total_price: f64,
    /// How the customer paid, e.g. "Cash".
    #[serde(rename = "Payment_Method")]
    pub payment_method: String,
    /// The store where the sale happened.
    #[serde(rename = "Store_Location")]
    pub store_location: String,
}

impl Transaction {
    /// The total price derived from the quantity and unit price.
    pub fn expected_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    /// Whether the stored total price agrees with `quantity * unit_price`.
    pub fn has_consistent_total(&self) -> bool {
        (self.total_price - self.expected_total()).abs() <= TOTAL_TOLERANCE
    }
}

/// The raw, unvalidated fields for a new transaction, as submitted by the
/// add-data form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransactionFields {
    /// When the sale happened.
    pub date: Date,
    /// The ID of the customer who made the purchase.
    pub customer_id: String,
    /// The ID of the product that was sold.
    pub product_id: String,
    /// The display name of the product that was sold.
    pub product_name: String,
    /// The product category, must be one of the candidate categories.
    pub category: String,
    /// How many units were sold, must be at least one.
    pub quantity: i64,
    /// The price of a single unit in dollars, must be positive.
    pub unit_price: f64,
    /// How the customer paid, must be one of the candidate payment methods.
    pub payment_method: String,
    /// The store where the sale happened, must be one of the candidate store locations.
    pub store_location: String,
}

/// The values that may be chosen for the enum-like columns of a new transaction.
///
/// The built-in candidates come first, followed by any other values found in
/// the dataset in the order they first appear.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSets {
    /// Allowed values for the `Category` column.
    pub categories: Vec<String>,
    /// Allowed values for the `Payment_Method` column.
    pub payment_methods: Vec<String>,
    /// Allowed values for the `Store_Location` column.
    pub store_locations: Vec<String>,
}

impl CandidateSets {
    /// The candidate sets extended with the values found in `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        Self {
            categories: extend_candidates(&CATEGORIES, transactions, |t| &t.category),
            payment_methods: extend_candidates(&PAYMENT_METHODS, transactions, |t| {
                &t.payment_method
            }),
            store_locations: extend_candidates(&STORE_LOCATIONS, transactions, |t| {
                &t.store_location
            }),
        }
    }
}

fn extend_candidates(
    builtin: &[&str],
    transactions: &[Transaction],
    column: impl Fn(&Transaction) -> &String,
) -> Vec<String> {
    let mut candidates: Vec<String> = builtin.iter().map(|value| (*value).to_owned()).collect();

    for transaction in transactions {
        let value = column(transaction);

        if !candidates.contains(value) {
            candidates.push(value.clone());
        }
    }

    candidates
}

/// A validated transaction that has not been written to the dataset yet.
///
/// It does not have an ID, the ID is assigned when the transaction is
/// appended to the dataset. Use [NewTransaction::with_id] to finalize it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    date: Date,
    customer_id: String,
    product_id: String,
    product_name: String,
    category: String,
    quantity: u32,
    unit_price: f64,
    payment_method: String,
    store_location: String,
}

impl NewTransaction {
    /// Validate `fields` and create a new transaction.
    ///
    /// `today` is the current date in the local timezone, sales cannot be
    /// recorded for dates after it.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the customer ID, product ID or product name is empty,
    /// - the quantity is less than one,
    /// - the unit price is not a positive, finite number,
    /// - the unit price has more than two decimal places,
    /// - the category, payment method or store location is not in `candidates`,
    /// - the date is after `today`.
    pub fn new(
        fields: NewTransactionFields,
        candidates: &CandidateSets,
        today: Date,
    ) -> Result<Self, Error> {
        let customer_id = non_empty(fields.customer_id, "Customer ID")?;
        let product_id = non_empty(fields.product_id, "Product ID")?;
        let product_name = non_empty(fields.product_name, "Product Name")?;

        let quantity = u32::try_from(fields.quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or(Error::InvalidQuantity(fields.quantity))?;

        if !fields.unit_price.is_finite() || fields.unit_price <= 0.0 {
            return Err(Error::InvalidUnitPrice(fields.unit_price));
        }

        if !is_whole_cents(fields.unit_price) {
            return Err(Error::FractionalCentUnitPrice(fields.unit_price));
        }

        if !candidates.categories.contains(&fields.category) {
            return Err(Error::UnknownCategory(fields.category));
        }

        if !candidates.payment_methods.contains(&fields.payment_method) {
            return Err(Error::UnknownPaymentMethod(fields.payment_method));
        }

        if !candidates.store_locations.contains(&fields.store_location) {
            return Err(Error::UnknownStoreLocation(fields.store_location));
        }

        if fields.date > today {
            return Err(Error::FutureDate(fields.date));
        }

        Ok(Self {
            date: fields.date,
            customer_id,
            product_id,
            product_name,
            category: fields.category,
            quantity,
            unit_price: fields.unit_price,
            payment_method: fields.payment_method,
            store_location: fields.store_location,
        })
    }

    /// The total price of the sale, `quantity * unit_price` rounded to the nearest cent.
    pub fn total_price(&self) -> f64 {
        (self.quantity as f64 * self.unit_price * 100.0).round() / 100.0
    }

    /// Create the dataset row for this transaction with the ID `transaction_id`.
    pub fn with_id(self, transaction_id: i64) -> Transaction {
        let total_price = self.total_price();

        Transaction {
            transaction_id,
            date: self.date,
            customer_id: self.customer_id,
            product_id: self.product_id,
            product_name: self.product_name,
            category: self.category,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price,
            payment_method: self.payment_method,
            store_location: self.store_location,
        }
    }
}

/// Whether `amount` is a whole number of cents, allowing for the error of
/// the decimal to binary conversion.
fn is_whole_cents(amount: f64) -> bool {
    let cents = amount * 100.0;

    (cents - cents.round()).abs() < CENT_TOLERANCE
}

fn non_empty(value: String, field_name: &'static str) -> Result<String, Error> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        Err(Error::EmptyField(field_name))
    } else {
        Ok(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        transaction::{
            CandidateSets, NewTransaction, NewTransactionFields,
            test_utils::{sample_fields, sample_transaction},
        },
    };

    fn default_candidates() -> CandidateSets {
        CandidateSets::from_transactions(&[])
    }

    #[test]
    fn total_price_is_quantity_times_unit_price() {
        let cases = [(1, 2.5, 2.5), (3, 2.5, 7.5), (2, 1.99, 3.98), (10, 0.35, 3.5)];

        for (quantity, unit_price, want_total) in cases {
            let fields = NewTransactionFields {
                quantity,
                unit_price,
                ..sample_fields()
            };

            let transaction = NewTransaction::new(fields, &default_candidates(), date!(2025 - 01 - 31))
                .unwrap()
                .with_id(1);

            assert_eq!(
                transaction.total_price, want_total,
                "want total {want_total} for {quantity} x {unit_price}, got {}",
                transaction.total_price
            );
            assert!(transaction.has_consistent_total());
        }
    }

    #[test]
    fn trims_text_fields() {
        let fields = NewTransactionFields {
            customer_id: "  C042 ".to_owned(),
            product_name: "\tMilk\n".to_owned(),
            ..sample_fields()
        };

        let transaction = NewTransaction::new(fields, &default_candidates(), date!(2025 - 01 - 31))
            .unwrap()
            .with_id(7);

        assert_eq!(transaction.transaction_id, 7);
        assert_eq!(transaction.customer_id, "C042");
        assert_eq!(transaction.product_name, "Milk");
    }

    #[test]
    fn rejects_empty_text_fields() {
        let cases = [
            (
                NewTransactionFields {
                    customer_id: " ".to_owned(),
                    ..sample_fields()
                },
                "Customer ID",
            ),
            (
                NewTransactionFields {
                    product_id: "".to_owned(),
                    ..sample_fields()
                },
                "Product ID",
            ),
            (
                NewTransactionFields {
                    product_name: "".to_owned(),
                    ..sample_fields()
                },
                "Product Name",
            ),
        ];

        for (fields, field_name) in cases {
            let result = NewTransaction::new(fields, &default_candidates(), date!(2025 - 01 - 31));

            assert_eq!(result, Err(Error::EmptyField(field_name)));
        }
    }

    #[test]
    fn rejects_non_positive_quantity() {
        for quantity in [0, -1, i64::from(u32::MAX) + 1] {
            let fields = NewTransactionFields {
                quantity,
                ..sample_fields()
            };

            let result = NewTransaction::new(fields, &default_candidates(), date!(2025 - 01 - 31));

            assert_eq!(result, Err(Error::InvalidQuantity(quantity)));
        }
    }

    #[test]
    fn rejects_invalid_unit_price() {
        for unit_price in [0.0, -2.0, f64::INFINITY] {
            let fields = NewTransactionFields {
                unit_price,
                ..sample_fields()
            };

            let result = NewTransaction::new(fields, &default_candidates(), date!(2025 - 01 - 31));

            assert_eq!(result, Err(Error::InvalidUnitPrice(unit_price)));
        }
    }

    #[test]
    fn rejects_unit_price_with_fractional_cents() {
        for unit_price in [0.333, 1.999, 0.005] {
            let fields = NewTransactionFields {
                quantity: 3,
                unit_price,
                ..sample_fields()
            };

            let result = NewTransaction::new(fields, &default_candidates(), date!(2025 - 01 - 31));

            assert_eq!(result, Err(Error::FractionalCentUnitPrice(unit_price)));
        }
    }

    #[test]
    fn total_price_matches_exact_product_for_cent_prices() {
        for (quantity, unit_price) in [(3, 0.33), (7, 0.1), (12, 19.99), (5, 0.01)] {
            let fields = NewTransactionFields {
                quantity,
                unit_price,
                ..sample_fields()
            };

            let transaction = NewTransaction::new(fields, &default_candidates(), date!(2025 - 01 - 31))
                .unwrap()
                .with_id(1);

            let want_cents = (quantity as f64 * unit_price * 100.0).round() as i64;
            assert_eq!(
                (transaction.total_price * 100.0).round() as i64,
                want_cents,
                "{quantity} x {unit_price}"
            );
            assert!(
                (transaction.total_price - quantity as f64 * unit_price).abs() < 1e-9,
                "want stored total {} to equal {quantity} x {unit_price}",
                transaction.total_price
            );
        }
    }

    #[test]
    fn rejects_values_outside_candidate_sets() {
        let today = date!(2025 - 01 - 31);

        let result = NewTransaction::new(
            NewTransactionFields {
                category: "Hardware".to_owned(),
                ..sample_fields()
            },
            &default_candidates(),
            today,
        );
        assert_eq!(result, Err(Error::UnknownCategory("Hardware".to_owned())));

        let result = NewTransaction::new(
            NewTransactionFields {
                payment_method: "Barter".to_owned(),
                ..sample_fields()
            },
            &default_candidates(),
            today,
        );
        assert_eq!(result, Err(Error::UnknownPaymentMethod("Barter".to_owned())));

        let result = NewTransaction::new(
            NewTransactionFields {
                store_location: "Moon Base".to_owned(),
                ..sample_fields()
            },
            &default_candidates(),
            today,
        );
        assert_eq!(
            result,
            Err(Error::UnknownStoreLocation("Moon Base".to_owned()))
        );
    }

    #[test]
    fn accepts_categories_found_in_dataset() {
        let mut existing = sample_transaction(1, date!(2025 - 01 - 01));
        existing.category = "Frozen".to_owned();
        let candidates = CandidateSets::from_transactions(&[existing]);

        let result = NewTransaction::new(
            NewTransactionFields {
                category: "Frozen".to_owned(),
                ..sample_fields()
            },
            &candidates,
            date!(2025 - 01 - 31),
        );

        assert!(result.is_ok(), "got {result:?}");
        assert_eq!(candidates.categories.last().map(String::as_str), Some("Frozen"));
    }

    #[test]
    fn rejects_future_date() {
        let fields = NewTransactionFields {
            date: date!(2025 - 02 - 01),
            ..sample_fields()
        };

        let result = NewTransaction::new(fields, &default_candidates(), date!(2025 - 01 - 31));

        assert_eq!(result, Err(Error::FutureDate(date!(2025 - 02 - 01))));
    }

    #[test]
    fn detects_stale_total() {
        let mut transaction = sample_transaction(1, date!(2025 - 01 - 01));
        assert!(transaction.has_consistent_total());

        transaction.total_price += 1.0;

        assert!(!transaction.has_consistent_total());
    }
}
