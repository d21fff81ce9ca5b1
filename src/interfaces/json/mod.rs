//! JSON input adapters.

pub mod invoice_book;
