use crate::domain::invoice::Invoice;
use crate::domain::ports::InvoiceStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for invoices, keyed by reference.
///
/// Uses `Arc<RwLock<HashMap<String, Invoice>>>` to allow shared concurrent access.
/// Ideal for testing or small datasets where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
}

impl InMemoryInvoiceStore {
    /// Creates a new, empty in-memory invoice store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn get(&self, reference: &str) -> Result<Option<Invoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.get(reference).cloned())
    }

    async fn save(&self, invoice: Invoice) -> Result<()> {
        let mut invoices = self.invoices.write().await;
        invoices.insert(invoice.reference.clone(), invoice);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Invoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.values().cloned().collect())
    }
}
