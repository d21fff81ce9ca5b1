//! Storage backends implementing the domain's `InvoiceStore` port.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
