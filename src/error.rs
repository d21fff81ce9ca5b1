use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("There is no invoice matching this payment")]
    InvoiceNotFound,
    #[error("The invoice is in an invalid state, it has an amount of 0 and it has payments.")]
    InvalidInvoiceState,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    StorageError(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PaymentError {
    fn from(err: rocksdb::Error) -> Self {
        Self::StorageError(Box::new(err))
    }
}
