//! The API endpoints URIs.

/// The home page.
pub const ROOT: &str = "/";
/// The page for exploring the dataset with filters and charts.
pub const DATABASE_VIEW: &str = "/database";
/// The page for adding a new transaction to the dataset.
pub const NEW_TRANSACTION_VIEW: &str = "/database/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route that re-renders the filtered table and charts for the database page.
pub const DATABASE_FILTER: &str = "/api/database/filter";
/// The route to append transactions to the dataset.
pub const TRANSACTIONS_API: &str = "/api/transactions";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DATABASE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);

        assert_endpoint_is_valid_uri(endpoints::COFFEE);
        assert_endpoint_is_valid_uri(endpoints::DATABASE_FILTER);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
    }
}
