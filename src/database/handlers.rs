//! Database page HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the database page and re-rendering the
//!   filtered rows
//! - HTML view functions for the page, the filter form and the missing
//!   dataset page

use std::path::Path;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    database::{
        charts::{ECHARTS_SCRIPT_URL, build_charts, charts_view},
        filters::{FilterForm, FilterOptions, TransactionFilter},
        tables::transactions_table,
    },
    dataset::DatasetStore,
    endpoints,
    html::{BADGE_STYLE, FORM_CHECKBOX_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    transaction::Transaction,
};

/// The state needed for displaying the database page.
#[derive(Debug, Clone)]
pub struct DatabaseState {
    /// The dataset CSV file and its cached contents.
    pub dataset: DatasetStore,
}

impl FromRef<AppState> for DatabaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            dataset: state.dataset.clone(),
        }
    }
}

/// Display the dataset, the filter form and the filtered rows with their charts.
///
/// Every filter option starts selected, so the filtered rows initially match
/// the whole dataset.
pub async fn get_database_page(State(state): State<DatabaseState>) -> Result<Response, Error> {
    let transactions = state
        .dataset
        .load()
        .inspect_err(|error| tracing::error!("could not load dataset: {error}"))?;

    let options = FilterOptions::from_transactions(&transactions);
    let filter = TransactionFilter::select_all(&options);
    let filtered = filter.apply(&transactions);
    let overview = transactions.iter().collect::<Vec<_>>();

    Ok(database_view(&overview, &options, &filtered).into_response())
}

/// HTMX endpoint that re-renders the filtered rows and charts for the
/// submitted filter form.
pub async fn filter_database(
    State(state): State<DatabaseState>,
    Form(form): Form<FilterForm>,
) -> Response {
    let transactions = match state.dataset.load() {
        Ok(transactions) => transactions,
        Err(Error::DatasetNotFound(path)) => {
            tracing::error!("dataset {} disappeared while filtering", path.display());
            // The full page explains how to fix a missing dataset.
            return (
                HxRedirect(endpoints::DATABASE_VIEW.to_owned()),
                StatusCode::NOT_FOUND,
            )
                .into_response();
        }
        Err(error) => {
            tracing::error!("could not load dataset: {error}");
            return error.into_alert_response();
        }
    };

    let filter = TransactionFilter::from(form);
    let filtered = filter.apply(&transactions);
    tracing::debug!(
        "filter kept {} of {} transactions",
        filtered.len(),
        transactions.len()
    );

    filtered_content(&filtered).into_response()
}

/// Renders the page shown when the dataset file does not exist.
///
/// Only the navigation bar and the error message are shown.
pub fn dataset_not_found_view(path: &Path) -> Markup {
    let nav_bar = NavBar::new(endpoints::DATABASE_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-2" { "Dataset not found" }

            p
                id="dataset-error"
                role="alert"
                class="p-4 rounded-lg text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
            {
                "File '" (path.display()) "' not found. Please ensure it exists."
            }
        }
    );

    base("Database", &[], &content)
}

fn database_view(
    overview: &[&Transaction],
    options: &FilterOptions,
    filtered: &[&Transaction],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DATABASE_VIEW).into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "add a transaction");

    let content = html!(
        (nav_bar)

        div
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white gap-8"
        {
            section id="dataset-overview" class="w-full"
            {
                h2 class="text-xl font-semibold mb-4" { "Dataset Overview" }

                @if overview.is_empty() {
                    p
                    {
                        "The dataset has no transactions yet. You can "
                        (new_transaction_link) "."
                    }
                } @else {
                    (transactions_table("overview-table", overview))
                }
            }

            section id="filter-data" class="w-full"
            {
                h2 class="text-xl font-semibold mb-4" { "Filter Data" }
                (filter_form(options))
            }

            section class="w-full"
            {
                h2 class="text-xl font-semibold mb-4" { "Filtered Data" }

                div id="filtered-content" class="w-full"
                {
                    (filtered_content(filtered))
                }
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())];

    base("Database", &scripts, &content)
}

fn filter_form(options: &FilterOptions) -> Markup {
    let dates = options.dates.iter().map(ToString::to_string).collect::<Vec<_>>();

    html!(
        form
            hx-post=(endpoints::DATABASE_FILTER)
            hx-target="#filtered-content"
            hx-target-error="#alert-container"
            hx-swap="innerHTML"
            hx-trigger="change"
            class="flex flex-col gap-4 bg-gray-50 dark:bg-gray-800 p-4 rounded-lg"
        {
            (filter_fieldset("Select Date(s)", "dates", &dates))
            (filter_fieldset("Select Category(s)", "categories", &options.categories))
            (filter_fieldset("Select Payment Method(s)", "payment_methods", &options.payment_methods))
        }
    )
}

fn filter_fieldset(legend: &str, name: &str, values: &[String]) -> Markup {
    html!(
        fieldset
        {
            legend class="text-sm font-semibold mb-2" { (legend) }

            div class="grid grid-cols-2 md:grid-cols-4 lg:grid-cols-6 gap-3"
            {
                @for value in values {
                    label class="flex items-center space-x-2"
                    {
                        input
                            type="checkbox"
                            name=(name)
                            value=(value)
                            checked
                            class=(FORM_CHECKBOX_STYLE);

                        span class=(BADGE_STYLE) { (value) }
                    }
                }
            }
        }
    )
}

/// The filtered rows and their charts, swapped in by the filter form.
fn filtered_content(filtered: &[&Transaction]) -> Markup {
    if filtered.is_empty() {
        return html!(
            p id="no-matches" class="text-gray-600 dark:text-gray-400"
            {
                "No transactions match the selected filters."
            }
        );
    }

    let charts = build_charts(filtered);

    html!(
        p class="text-sm text-gray-600 dark:text-gray-400 mb-2"
        {
            (filtered.len()) " matching transaction(s)"
        }

        (transactions_table("filtered-table", filtered))

        h2 class="text-xl font-semibold my-4" { "Visualizations" }

        (charts_view(&charts))
    )
}
