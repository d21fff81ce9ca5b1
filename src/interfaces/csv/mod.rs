//! CSV input and output adapters.

pub mod invoice_writer;
pub mod payment_reader;
