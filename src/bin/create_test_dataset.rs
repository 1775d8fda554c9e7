use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rand::{Rng, SeedableRng, seq::IndexedRandom};
use rand_chacha::ChaCha8Rng;
use time::{Duration, OffsetDateTime, macros::date};

use erp_dashboard::{
    CandidateSets, NewTransaction, NewTransactionFields, PAYMENT_METHODS, STORE_LOCATIONS,
};

/// A utility for creating a sample dataset for the ERP dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the CSV dataset to.
    #[arg(long, short)]
    output_path: String,

    /// The number of transactions to generate.
    #[arg(long, short, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,
}

/// Product ID, name, category and unit price.
const PRODUCTS: [(&str, &str, &str, f64); 14] = [
    ("P001", "White Bread", "Bakery", 2.5),
    ("P002", "Croissant", "Bakery", 1.75),
    ("P003", "Orange Juice", "Beverages", 3.99),
    ("P004", "Sparkling Water", "Beverages", 1.2),
    ("P005", "Whole Milk", "Dairy", 1.5),
    ("P006", "Cheddar Cheese", "Dairy", 4.75),
    ("P007", "Apples", "Fruits", 0.6),
    ("P008", "Bananas", "Fruits", 0.35),
    ("P009", "Chicken Breast", "Meat", 7.99),
    ("P010", "Beef Mince", "Meat", 6.5),
    ("P011", "Potato Chips", "Snacks", 2.2),
    ("P012", "Chocolate Bar", "Snacks", 1.5),
    ("P013", "Carrots", "Vegetables", 0.9),
    ("P014", "Broccoli", "Vegetables", 1.8),
];

/// Sales are spread over this many days starting at the first day of 2024.
const DAYS_COVERED: i64 = 90;

/// Seeded with a constant so every run writes the same rows.
const SEED: u64 = 0x2545_f491_4f6c_dd1d;

/// Create a CSV dataset of fake grocery sales for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path.extension().is_none_or(|extension| extension.is_empty()) {
        eprintln!("Output path must include a file extension (e.g., 'erp.csv').");
        exit(1);
    }

    if output_path.exists() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating dataset at {output_path:#?}");
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output_path)?;
    let mut writer = csv::Writer::from_writer(file);

    let candidates = CandidateSets::from_transactions(&[]);
    let today = OffsetDateTime::now_utc().date();
    let first_day = date!(2024 - 01 - 01);
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);

    println!("Generating {} transactions...", args.rows);

    for transaction_id in 1..=i64::from(args.rows) {
        let (product_id, product_name, category, unit_price) = *PRODUCTS
            .choose(&mut rng)
            .ok_or("there are no products to choose from")?;
        let payment_method = PAYMENT_METHODS
            .choose(&mut rng)
            .ok_or("there are no payment methods to choose from")?;
        let store_location = STORE_LOCATIONS
            .choose(&mut rng)
            .ok_or("there are no store locations to choose from")?;

        let fields = NewTransactionFields {
            date: first_day + Duration::days(rng.random_range(0..DAYS_COVERED)),
            customer_id: format!("C{:03}", rng.random_range(1..=50)),
            product_id: product_id.to_owned(),
            product_name: product_name.to_owned(),
            category: category.to_owned(),
            quantity: rng.random_range(1..=5),
            unit_price,
            payment_method: (*payment_method).to_owned(),
            store_location: (*store_location).to_owned(),
        };

        let transaction = NewTransaction::new(fields, &candidates, today)?.with_id(transaction_id);
        writer.serialize(&transaction)?;
    }

    writer.flush()?;

    println!("Success!");

    Ok(())
}
