//! Defines the route handler for the page for adding a new transaction to the dataset.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    AppState, Error,
    dataset::DatasetStore,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner},
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        CandidateSets,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

fn create_transaction_view(today: Date, candidates: &CandidateSets) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();
    let form_fields = transaction_form_fields(
        &TransactionFormDefaults {
            date: today,
            max_date: today,
        },
        candidates,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                id="new-transaction-form"
                hx-post=(create_transaction_route)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="w-full space-y-4 md:space-y-6 pb-24 lg:pb-0"
            {
                h2 class="text-xl font-bold" { "Add New Data" }

                (form_fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Transaction"
                }
            }

            // Clear the form after a successful request so another row can be entered.
            script
            {
                (PreEscaped(r#"
                document.body.addEventListener('htmx:afterRequest', (event) => {
                    const form = event.detail.elt;
                    if (form.id === 'new-transaction-form' && event.detail.successful) {
                        form.reset();
                    }
                });
                "#))
            }
        }
    };

    base("Add Data", &[dollar_input_styles()], &content)
}

/// The state needed for the add-data page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The dataset, read for the values already used in the enum-like columns.
    pub dataset: DatasetStore,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            dataset: state.dataset.clone(),
        }
    }
}

/// Renders the page for adding a transaction.
///
/// A missing dataset does not stop the form from being shown, the built-in
/// candidates are offered and the error is reported when the form is submitted.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let candidates = match state.dataset.load() {
        Ok(transactions) => CandidateSets::from_transactions(&transactions),
        Err(Error::DatasetNotFound(path)) => {
            tracing::warn!(
                "dataset {} not found, offering the built-in candidates",
                path.display()
            );
            CandidateSets::from_transactions(&[])
        }
        Err(error) => {
            tracing::error!("Failed to load dataset for new transaction page: {error}");
            return Err(error);
        }
    };

    let today = local_today(&state.local_timezone)?;

    Ok(create_transaction_view(today, &candidates).into_response())
}
