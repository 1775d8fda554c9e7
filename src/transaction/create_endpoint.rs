//! Defines the endpoint for appending a new transaction to the dataset.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection};

use crate::{
    AppState,
    Error,
    alert::Alert,
    dataset::DatasetStore,
    html::format_currency,
    timezone::local_today,
    transaction::{CandidateSets, NewTransaction, NewTransactionFields},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The dataset the new transaction is appended to.
    pub dataset: DatasetStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            dataset: state.dataset.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for appending a new transaction to the dataset.
///
/// Responds with a success alert naming the assigned ID and total price, or
/// an error alert explaining why the transaction was not saved. Bodies that
/// cannot be parsed, e.g. a quantity of "abc", are also answered with an alert.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    form: Result<Form<NewTransactionFields>, FormRejection>,
) -> Response {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            tracing::error!("could not parse transaction form: {rejection}");
            return Error::InvalidForm(rejection.to_string()).into_alert_response();
        }
    };

    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let candidates = match state.dataset.load() {
        Ok(transactions) => CandidateSets::from_transactions(&transactions),
        Err(error) => {
            tracing::error!("could not load dataset: {error}");
            return error.into_alert_response();
        }
    };

    let new_transaction = match NewTransaction::new(fields, &candidates, today) {
        Ok(new_transaction) => new_transaction,
        Err(error) => {
            tracing::error!("invalid transaction: {error}");
            return error.into_alert_response();
        }
    };

    match state.dataset.append(new_transaction) {
        Ok(transaction) => created_alert(transaction.transaction_id, transaction.total_price),
        Err(error) => {
            tracing::error!("could not append transaction: {error}");
            error.into_alert_response()
        }
    }
}

fn created_alert(transaction_id: i64, total_price: f64) -> Response {
    let alert = Alert::Success {
        message: "Transaction added".to_owned(),
        details: format!(
            "Added transaction {transaction_id} with a total price of {}.",
            format_currency(total_price)
        ),
    };

    (StatusCode::CREATED, alert.into_html()).into_response()
}
