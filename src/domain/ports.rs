use super::invoice::Invoice;
use crate::error::Result;
use async_trait::async_trait;

/// Keyed lookup and persistence of invoices.
///
/// Lookups are exact-match on the invoice reference; a miss is `Ok(None)`.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn get(&self, reference: &str) -> Result<Option<Invoice>>;
    async fn save(&self, invoice: Invoice) -> Result<()>;
    async fn get_all(&self) -> Result<Vec<Invoice>>;
}

pub type InvoiceStoreBox = Box<dyn InvoiceStore>;
