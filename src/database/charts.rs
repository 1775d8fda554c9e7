//! Chart generation and rendering for the database page.
//!
//! This module creates interactive ECharts visualizations of the filtered rows:
//! - **Sales by Category**: Bar chart of total sales per product category
//! - **Sales by Date**: Line chart of total sales per day
//! - **Payment Methods**: Pie chart of the number of sales per payment method
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Orient, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    database::aggregation::{payment_method_counts, sales_by_category, sales_by_date},
    transaction::Transaction,
};

/// The ECharts build loaded by the database page.
pub(super) const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct DatabaseChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Creates the three charts for the filtered rows.
pub(super) fn build_charts(transactions: &[&Transaction]) -> [DatabaseChart; 3] {
    [
        DatabaseChart {
            id: "sales-by-category-chart",
            options: script_safe_json(sales_by_category_chart(transactions).to_string()),
        },
        DatabaseChart {
            id: "sales-by-date-chart",
            options: script_safe_json(sales_by_date_chart(transactions).to_string()),
        },
        DatabaseChart {
            id: "payment-method-chart",
            options: script_safe_json(payment_method_chart(transactions).to_string()),
        },
    ]
}

/// Stops labels taken from the dataset from closing the inline script element.
///
/// Inside JavaScript strings `<\/` still reads as `</` and `\u003C` as `<`.
fn script_safe_json(options: String) -> String {
    options.replace("</", "<\\/").replace("<!--", "\\u003C!--")
}

/// Renders the chart containers followed by the script that initializes them.
///
/// The script is placed after the containers rather than in the page head so
/// the charts are also drawn when this markup is swapped in by HTMX.
pub(super) fn charts_view(charts: &[DatabaseChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }

        script { (charts_script(charts)) }
    )
}

/// Generates JavaScript initialization code for the charts with dark mode
/// support and responsive resizing.
fn charts_script(charts: &[DatabaseChart]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', () => chart.resize());

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(script_content)
}

pub(super) fn sales_by_category_chart(transactions: &[&Transaction]) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) =
        sales_by_category(transactions).into_iter().unzip();

    Chart::new()
        .title(Title::new().text("Total Sales by Category"))
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Total Sales").data(values))
}

pub(super) fn sales_by_date_chart(transactions: &[&Transaction]) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = sales_by_date(transactions)
        .into_iter()
        .map(|(date, total)| (date.to_string(), total))
        .unzip();

    Chart::new()
        .title(Title::new().text("Total Sales by Date"))
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Total Sales").data(values))
}

pub(super) fn payment_method_chart(transactions: &[&Transaction]) -> Chart {
    let data: Vec<(f64, String)> = payment_method_counts(transactions)
        .into_iter()
        .map(|(payment_method, count)| (count as f64, payment_method))
        .collect();

    Chart::new()
        .title(Title::new().text("Payment Method Breakdown"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().orient(Orient::Vertical).left("left").top("middle"))
        .series(
            Pie::new()
                .name("Transactions")
                .radius("60%")
                .center(vec!["60%", "55%"])
                .data(data),
        )
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .contain_label(true)
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
