//! Domain records and the storage port. No I/O happens here.

pub mod invoice;
pub mod payment;
pub mod ports;
