//! Transaction management for the dashboard.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated `NewTransaction`
//! - The candidate sets for the enum-like columns
//! - The page and endpoint for appending a transaction to the dataset

mod core;
mod create_endpoint;
mod create_page;
mod form;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{
    CATEGORIES, CandidateSets, NewTransaction, NewTransactionFields, PAYMENT_METHODS,
    STORE_LOCATIONS, Transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
