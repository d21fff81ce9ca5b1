//! External interfaces for moving invoices and payments in and out.

pub mod csv;
pub mod json;
