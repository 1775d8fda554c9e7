//! Database module
//!
//! Provides the page for exploring the dataset: an overview table, filters
//! over date, category and payment method, and charts of the filtered rows.

mod aggregation;
mod charts;
mod filters;
mod handlers;
mod tables;

pub use handlers::{DatabaseState, dataset_not_found_view, filter_database, get_database_page};
