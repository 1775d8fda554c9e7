//! The landing page, describing what the app offers.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
};

const FEATURES: [(&str, &str); 3] = [
    (
        "Data Overview",
        "Browse every transaction in the dataset in a single table.",
    ),
    (
        "Filtering Options",
        "Narrow the data down by date, category and payment method.",
    ),
    (
        "Visualizations",
        "See sales by category and by date, and how customers pay.",
    ),
];

/// Display the welcome page.
pub async fn get_home_page() -> Response {
    home_view().into_response()
}

fn home_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let database_link = link(endpoints::DATABASE_VIEW, "Database");

    let content = html!(
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-md"}
        {
            h1 class="mb-4 text-3xl font-extrabold tracking-tight md:text-4xl"
            {
                "Welcome to the ERP Visualization App"
            }

            p class="mb-6 text-lg text-gray-600 dark:text-gray-300"
            {
                "Explore the sales of a retail grocery business and record new
                transactions as they happen."
            }

            h2 class="mb-2 text-xl font-semibold self-start" { "Features" }

            ul id="features" class="mb-6 space-y-2 list-disc list-inside self-start"
            {
                @for (name, description) in FEATURES {
                    li
                    {
                        span class="font-semibold" { (name) }
                        ": " (description)
                    }
                }
            }

            p class="self-start"
            {
                "Head to the " (database_link) " page to get started."
            }
        }
    );

    base("Home", &[], &content)
}
