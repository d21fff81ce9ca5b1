//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `PaymentProcessor` which acts as the primary entry
//! point for applying payments to invoices. It runs one linear decision
//! sequence per payment on top of whichever storage backend it was given.

pub mod processor;
