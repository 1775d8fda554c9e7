use maud::{Markup, html};
use time::Date;

use crate::{
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::CandidateSets,
};

pub struct TransactionFormDefaults {
    pub date: Date,
    pub max_date: Date,
}

pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults,
    candidates: &CandidateSets,
) -> Markup {
    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(defaults.max_date)
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        (text_field("customer_id", "Customer ID", "C001", true))
        (text_field("product_id", "Product ID", "P100", false))
        (text_field("product_name", "Product Name", "Whole Milk", false))
        (select_field("category", "Category", &candidates.categories))

        div
        {
            label
                for="quantity"
                class=(FORM_LABEL_STYLE)
            {
                "Quantity"
            }

            input
                name="quantity"
                id="quantity"
                type="number"
                step="1"
                min="1"
                value="1"
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="unit_price"
                class=(FORM_LABEL_STYLE)
            {
                "Unit Price"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="unit_price"
                    id="unit_price"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        (select_field("payment_method", "Payment Method", &candidates.payment_methods))
        (select_field("store_location", "Store Location", &candidates.store_locations))
    }
}

fn text_field(name: &str, label: &str, placeholder: &str, autofocus: bool) -> Markup {
    html! {
        div
        {
            label
                for=(name)
                class=(FORM_LABEL_STYLE)
            {
                (label)
            }

            input
                name=(name)
                id=(name)
                type="text"
                placeholder=(placeholder)
                required
                autofocus[autofocus]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn select_field(name: &str, label: &str, options: &[String]) -> Markup {
    html! {
        div
        {
            label
                for=(name)
                class=(FORM_LABEL_STYLE)
            {
                (label)
            }

            select
                name=(name)
                id=(name)
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for (index, option) in options.iter().enumerate() {
                    option value=(option) selected[index == 0] { (option) }
                }
            }
        }
    }
}
