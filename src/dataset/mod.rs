//! The dataset of transactions stored in a CSV file, and a cache of its
//! contents keyed by file path.

mod file;

use std::{
    collections::HashMap,
    fs,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::SystemTime,
};

pub use file::{append_transaction, load_transactions};

#[cfg(test)]
pub(crate) use file::CSV_HEADER;

use crate::{
    Error,
    transaction::{NewTransaction, Transaction},
};

/// A snapshot of the dataset file as it was when it was last read.
#[derive(Debug, Clone)]
struct CachedDataset {
    modified: Option<SystemTime>,
    length: u64,
    transactions: Arc<Vec<Transaction>>,
}

/// Shared access to the dataset CSV file.
///
/// Loaded transactions are cached by file path. A cached entry is reused
/// while the file's modification time and length are unchanged, and it is
/// dropped after every append.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
    cache: Arc<Mutex<HashMap<PathBuf, CachedDataset>>>,
    write_lock: Arc<Mutex<()>>,
}

impl DatasetStore {
    /// Create a store for the CSV file at `path`.
    ///
    /// The file is not read until the first call to [DatasetStore::load], so
    /// the file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(Mutex::new(HashMap::new())),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The path of the dataset CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the transactions in the dataset, reading the file only if it has
    /// changed since it was last read.
    ///
    /// # Errors
    /// Returns [Error::DatasetNotFound] if the file does not exist, and the
    /// errors of [load_transactions] otherwise.
    pub fn load(&self) -> Result<Arc<Vec<Transaction>>, Error> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                self.invalidate()?;
                tracing::error!("Dataset file {} not found", self.path.display());
                return Err(Error::DatasetNotFound(self.path.clone()));
            }
            Err(error) => return Err(error.into()),
        };
        let modified = metadata.modified().ok();
        let length = metadata.len();

        {
            let cache = self.lock_cache()?;

            let is_fresh = |cached: &&CachedDataset| {
                cached.modified.is_some() && cached.modified == modified && cached.length == length
            };

            if let Some(cached) = cache.get(&self.path).filter(is_fresh) {
                tracing::debug!("Using cached dataset for {}", self.path.display());
                return Ok(cached.transactions.clone());
            }
        }

        let transactions = Arc::new(load_transactions(&self.path)?);

        self.lock_cache()?.insert(
            self.path.clone(),
            CachedDataset {
                modified,
                length,
                transactions: transactions.clone(),
            },
        );

        Ok(transactions)
    }

    /// Append `transaction` to the dataset and return the stored row.
    ///
    /// Appends from this process are serialized, so each appended row gets a
    /// unique ID. Writes by other processes are not detected.
    ///
    /// # Errors
    /// Returns the errors of [append_transaction], or
    /// [Error::DatasetLockError] if a lock is poisoned.
    pub fn append(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let _write_guard = self
            .write_lock
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire dataset write lock: {error}"))
            .map_err(|_| Error::DatasetLockError)?;

        let result = append_transaction(&self.path, transaction);
        self.invalidate()?;

        result
    }

    fn invalidate(&self) -> Result<(), Error> {
        self.lock_cache()?.remove(&self.path);
        Ok(())
    }

    fn lock_cache(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<PathBuf, CachedDataset>>, Error> {
        self.cache
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire dataset cache lock: {error}"))
            .map_err(|_| Error::DatasetLockError)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc, thread};

    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        Error,
        dataset::{CSV_HEADER, DatasetStore, load_transactions},
        transaction::{
            CandidateSets, NewTransaction,
            test_utils::{sample_fields, sample_transaction, to_csv},
        },
    };

    fn new_transaction() -> NewTransaction {
        NewTransaction::new(
            sample_fields(),
            &CandidateSets::from_transactions(&[]),
            date!(2025 - 12 - 31),
        )
        .unwrap()
    }

    #[test]
    fn load_reuses_cache_for_unchanged_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("erp.csv");
        fs::write(&path, to_csv(&[sample_transaction(1, date!(2025 - 01 - 01))])).unwrap();
        let store = DatasetStore::new(&path);

        let first = store.load().unwrap();
        let second = store.load().unwrap();

        assert!(
            Arc::ptr_eq(&first, &second),
            "want the second load to return the cached transactions"
        );
    }

    #[test]
    fn load_rereads_file_after_external_change() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("erp.csv");
        fs::write(&path, to_csv(&[sample_transaction(1, date!(2025 - 01 - 01))])).unwrap();
        let store = DatasetStore::new(&path);
        assert_eq!(store.load().unwrap().len(), 1);

        fs::write(
            &path,
            to_csv(&[
                sample_transaction(1, date!(2025 - 01 - 01)),
                sample_transaction(2, date!(2025 - 01 - 02)),
            ]),
        )
        .unwrap();

        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn load_sees_appended_transaction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("erp.csv");
        fs::write(&path, format!("{CSV_HEADER}\n")).unwrap();
        let store = DatasetStore::new(&path);
        assert!(store.load().unwrap().is_empty());

        let appended = store.append(new_transaction()).unwrap();

        assert_eq!(*store.load().unwrap(), vec![appended]);
    }

    #[test]
    fn concurrent_appends_get_unique_ids() {
        const THREADS: i64 = 16;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("erp.csv");
        fs::write(&path, format!("{CSV_HEADER}\n")).unwrap();
        let store = DatasetStore::new(&path);

        let mut ids = thread::scope(|scope| {
            let handles = (0..THREADS)
                .map(|_| {
                    let store = store.clone();
                    scope.spawn(move || store.append(new_transaction()).unwrap().transaction_id)
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });
        ids.sort_unstable();

        assert_eq!(ids, (1..=THREADS).collect::<Vec<_>>());

        let mut stored_ids = load_transactions(&path)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.transaction_id)
            .collect::<Vec<_>>();
        stored_ids.sort_unstable();
        assert_eq!(stored_ids, (1..=THREADS).collect::<Vec<_>>());
    }

    #[test]
    fn load_missing_file_is_dataset_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("erp.csv");
        let store = DatasetStore::new(&path);

        let result = store.load();

        assert_eq!(result, Err(Error::DatasetNotFound(path)));
    }

    #[test]
    fn load_after_file_removed_is_dataset_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("erp.csv");
        fs::write(&path, format!("{CSV_HEADER}\n")).unwrap();
        let store = DatasetStore::new(&path);
        store.load().unwrap();

        fs::remove_file(&path).unwrap();

        assert_eq!(store.load(), Err(Error::DatasetNotFound(path)));
    }
}
