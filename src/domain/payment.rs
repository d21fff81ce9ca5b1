use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tendered amount applied against the invoice identified by `reference`.
///
/// Payments are immutable inputs: once accepted they are appended by value to
/// the invoice's payment history. Entries seeded into an invoice book may
/// omit the reference, so it defaults to the empty string.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    #[serde(default)]
    pub reference: String,
    pub amount: Decimal,
}

impl Payment {
    pub fn new(reference: impl Into<String>, amount: Decimal) -> Self {
        Self {
            reference: reference.into(),
            amount,
        }
    }
}
