//! Table views for the dataset and the filtered rows.

use maud::{Markup, html};

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::Transaction,
};

const COLUMN_NAMES: [&str; 11] = [
    "Transaction_ID",
    "Date",
    "Customer_ID",
    "Product_ID",
    "Product_Name",
    "Category",
    "Quantity",
    "Unit_Price",
    "Total_Price",
    "Payment_Method",
    "Store_Location",
];

const STALE_TOTAL_STYLE: &str = "text-red-600 dark:text-red-400 font-semibold";

/// Renders a scrollable table with one row per transaction.
///
/// Rows whose stored total price does not match the quantity and unit price
/// are highlighted, but the stored value is shown.
pub(super) fn transactions_table(id: &str, transactions: &[&Transaction]) -> Markup {
    html! {
        div class="overflow-auto max-h-[480px] w-full rounded-lg shadow" {
            table
                id=(id)
                class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class={(TABLE_HEADER_STYLE) " sticky top-0"} {
                    tr {
                        @for column in COLUMN_NAMES {
                            th scope="col" class="px-6 py-3 whitespace-nowrap" { (column) }
                        }
                    }
                }
                tbody {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let is_consistent = transaction.has_consistent_total();

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.transaction_id) {
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_id) }
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.customer_id) }
            td class=(TABLE_CELL_STYLE) { (transaction.product_id) }
            td class=(TABLE_CELL_STYLE) { (transaction.product_name) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class={(TABLE_CELL_STYLE) " text-right"} { (transaction.quantity) }
            td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(transaction.unit_price)) }
            @if is_consistent {
                td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(transaction.total_price)) }
            } @else {
                td
                    class={(TABLE_CELL_STYLE) " text-right " (STALE_TOTAL_STYLE)}
                    title={"Expected " (format_currency(transaction.expected_total()))}
                    data-stale-total
                {
                    (format_currency(transaction.total_price))
                }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.payment_method) }
            td class=(TABLE_CELL_STYLE) { (transaction.store_location) }
        }
    }
}
