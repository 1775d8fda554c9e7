//! Reading and appending to the dataset CSV file.

use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::{
    Error,
    transaction::{NewTransaction, Transaction},
};

/// The header row of the dataset CSV file.
pub const CSV_HEADER: &str = "Transaction_ID,Date,Customer_ID,Product_ID,Product_Name,\
    Category,Quantity,Unit_Price,Total_Price,Payment_Method,Store_Location";

/// Load all transactions from the CSV file at `path`, in file order.
///
/// The file must start with a header row naming the eleven dataset columns.
/// Leading and trailing whitespace around fields is ignored.
///
/// # Errors
/// Returns:
/// - [Error::DatasetNotFound] if there is no file at `path`,
/// - [Error::InvalidCSV] if a row cannot be parsed as a transaction,
/// - [Error::Io] for any other I/O error.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>, Error> {
    let file = open_existing(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let transactions = reader
        .deserialize()
        .collect::<Result<Vec<Transaction>, csv::Error>>()?;

    tracing::debug!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );

    Ok(transactions)
}

/// Append `transaction` to the end of the CSV file at `path` and return the stored row.
///
/// The new row is assigned the ID one greater than the largest existing ID,
/// or 1 if the file has no rows. The existing bytes of the file are never
/// rewritten, the row is written after them. A zero-length file gets the
/// header row first.
///
/// # Errors
/// Returns:
/// - [Error::DatasetNotFound] if there is no file at `path`,
/// - [Error::InvalidCSV] if the existing rows cannot be parsed,
/// - [Error::Io] if the row could not be written.
pub fn append_transaction(
    path: &Path,
    transaction: NewTransaction,
) -> Result<Transaction, Error> {
    let existing = load_transactions(path)?;
    let next_id = existing
        .iter()
        .map(|transaction| transaction.transaction_id)
        .max()
        .map_or(1, |max_id| max_id + 1);
    let transaction = transaction.with_id(next_id);

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|error| map_not_found(error, path))?;

    if file.metadata()?.len() == 0 {
        writeln!(file, "{CSV_HEADER}")?;
    } else if !ends_with_newline(&mut file)? {
        file.write_all(b"\n")?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(&mut file);
    writer.serialize(&transaction)?;
    writer.flush()?;
    drop(writer);

    file.sync_data()?;

    tracing::info!(
        "Appended transaction {} to {}",
        transaction.transaction_id,
        path.display()
    );

    Ok(transaction)
}

fn open_existing(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|error| map_not_found(error, path))
}

fn map_not_found(error: io::Error, path: &Path) -> Error {
    if error.kind() == io::ErrorKind::NotFound {
        tracing::error!("Dataset file {} not found", path.display());
        Error::DatasetNotFound(path.to_owned())
    } else {
        error.into()
    }
}

/// Whether the last byte of a non-empty file is a newline.
fn ends_with_newline(file: &mut File) -> Result<bool, Error> {
    file.seek(SeekFrom::End(-1))?;
    let mut last_byte = [0u8; 1];
    file.read_exact(&mut last_byte)?;

    Ok(last_byte[0] == b'\n')
}
