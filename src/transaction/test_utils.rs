use time::Date;

use crate::transaction::{NewTransactionFields, Transaction};

/// Fields for a valid new transaction dated 2025-01-15.
pub fn sample_fields() -> NewTransactionFields {
    NewTransactionFields {
        date: Date::from_calendar_date(2025, time::Month::January, 15).unwrap(),
        customer_id: "C001".to_owned(),
        product_id: "P100".to_owned(),
        product_name: "Whole Milk".to_owned(),
        category: "Dairy".to_owned(),
        quantity: 2,
        unit_price: 1.5,
        payment_method: "Cash".to_owned(),
        store_location: "Store A".to_owned(),
    }
}

/// A transaction with a consistent total price.
pub fn sample_transaction(transaction_id: i64, date: Date) -> Transaction {
    Transaction {
        transaction_id,
        date,
        customer_id: format!("C{transaction_id:03}"),
        product_id: "P100".to_owned(),
        product_name: "Whole Milk".to_owned(),
        category: "Dairy".to_owned(),
        quantity: 2,
        unit_price: 1.5,
        total_price: 3.0,
        payment_method: "Cash".to_owned(),
        store_location: "Store A".to_owned(),
    }
}

/// A transaction with the given category, payment method and total price.
pub fn transaction_with(
    transaction_id: i64,
    date: Date,
    category: &str,
    payment_method: &str,
    total_price: f64,
) -> Transaction {
    Transaction {
        category: category.to_owned(),
        payment_method: payment_method.to_owned(),
        quantity: 1,
        unit_price: total_price,
        total_price,
        ..sample_transaction(transaction_id, date)
    }
}

/// CSV text for `transactions`, including the header row.
pub fn to_csv(transactions: &[Transaction]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for transaction in transactions {
        writer.serialize(transaction).unwrap();
    }

    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}
