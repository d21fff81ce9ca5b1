use crate::domain::invoice::Invoice;
use crate::domain::ports::InvoiceStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing invoice states.
pub const CF_INVOICES: &str = "invoices";

/// A persistent invoice store implementation using RocksDB.
///
/// Invoices are stored in a dedicated Column Family as JSON documents keyed
/// by their reference, so a processing run can resume against the books left
/// by an earlier one.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbInvoiceStore {
    db: Arc<DB>,
}

impl RocksDbInvoiceStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "invoices" column family exists.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_invoices = ColumnFamilyDescriptor::new(CF_INVOICES, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_invoices])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf_invoices(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_INVOICES).ok_or_else(|| {
            PaymentError::StorageError(Box::new(std::io::Error::other(
                "Invoices column family not found",
            )))
        })
    }
}

#[async_trait]
impl InvoiceStore for RocksDbInvoiceStore {
    async fn get(&self, reference: &str) -> Result<Option<Invoice>> {
        let cf = self.cf_invoices()?;

        let result = self.db.get_cf(cf, reference.as_bytes())?;

        match result {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, invoice: Invoice) -> Result<()> {
        let cf = self.cf_invoices()?;

        let value = serde_json::to_vec(&invoice)?;
        self.db.put_cf(cf, invoice.reference.as_bytes(), value)?;

        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Invoice>> {
        let cf = self.cf_invoices()?;

        let mut invoices = Vec::new();
        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);

        for item in iter {
            let (_key, value) = item?;
            invoices.push(serde_json::from_slice(&value)?);
        }

        Ok(invoices)
    }
}
