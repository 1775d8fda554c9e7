//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{
    alert::Alert, database::dataset_not_found_view, internal_server_error::InternalServerError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The dataset CSV file does not exist.
    ///
    /// This is the only error that is shown to the user as a page of its own.
    /// There is no recovery, the user must put the file in place and reload.
    #[error("the dataset file {0:?} was not found")]
    DatasetNotFound(PathBuf),

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// An unexpected I/O error occurred while reading or writing the dataset.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("an I/O error occurred: {0}")]
    Io(String),

    /// The submitted form could not be parsed, e.g. a number field held text.
    #[error("the form could not be read: {0}")]
    InvalidForm(String),

    /// A required text field of a new transaction was empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// The quantity of a new transaction was less than one.
    #[error("{0} is not a valid quantity, the quantity must be at least one")]
    InvalidQuantity(i64),

    /// The unit price of a new transaction was zero, negative or not a number.
    #[error("{0} is not a valid unit price, the unit price must be greater than zero")]
    InvalidUnitPrice(f64),

    /// The unit price of a new transaction has more than two decimal places.
    #[error("{0} is not a valid unit price, the unit price cannot have more than two decimal places")]
    FractionalCentUnitPrice(f64),

    /// The category of a new transaction is not one of the candidate categories.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// The payment method of a new transaction is not one of the candidate payment methods.
    #[error("\"{0}\" is not a known payment method")]
    UnknownPaymentMethod(String),

    /// The store location of a new transaction is not one of the candidate store locations.
    #[error("\"{0}\" is not a known store location")]
    UnknownStoreLocation(String),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record sales that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the dataset lock
    #[error("could not acquire the dataset lock")]
    DatasetLockError,
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an unhandled I/O error occurred: {}", value);
        Error::Io(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        if value.is_io_error() {
            return match value.into_kind() {
                csv::ErrorKind::Io(error) => error.into(),
                kind => Error::InvalidCSV(format!("{kind:?}")),
            };
        }

        let message = match value.position() {
            Some(position) => format!("line {}: {value}", position.line()),
            None => value.to_string(),
        };

        Error::InvalidCSV(message)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::DatasetNotFound(path) => {
                (StatusCode::NOT_FOUND, dataset_not_found_view(&path)).into_response()
            }
            Error::InvalidCSV(message) => InternalServerError {
                description: "Invalid Dataset",
                fix: &format!(
                    "The dataset could not be read: {message}. Check that the file has a header \
                    row and all eleven columns."
                ),
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatasetLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::DatasetNotFound(path) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Dataset not found".to_owned(),
                    details: format!(
                        "File '{}' not found. Please ensure it exists.",
                        path.display()
                    ),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::FutureDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transaction date".to_owned(),
                    details: format!(
                        "{date} is a date in the future, which is not allowed. \
                        Change the date to today or earlier."
                    ),
                },
            ),
            error @ (Error::InvalidForm(_)
            | Error::EmptyField(_)
            | Error::InvalidQuantity(_)
            | Error::InvalidUnitPrice(_)
            | Error::FractionalCentUnitPrice(_)
            | Error::UnknownCategory(_)
            | Error::UnknownPaymentMethod(_)
            | Error::UnknownStoreLocation(_)) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transaction".to_owned(),
                    details: capitalize_first(&error.to_string()),
                },
            ),
            // Failures while writing are shown as-is so the user knows the row was not saved.
            error => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not add transaction".to_owned(),
                    details: capitalize_first(&error.to_string()),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
