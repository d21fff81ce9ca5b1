use crate::domain::payment::Payment;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Flat surcharge accrued per accepted payment on commercial invoices.
pub const COMMERCIAL_TAX_RATE: Decimal = dec!(0.14);

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceKind {
    Standard,
    Commercial,
}

impl InvoiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceKind::Standard => "standard",
            InvoiceKind::Commercial => "commercial",
        }
    }
}

/// Record of an amount owed, the payments applied to it, and the tax accrued.
///
/// `amount_paid` is tracked both as a running field and as the sum of the
/// payment history; after every accepted payment the two agree. Tax is only
/// ever incremented per payment, never recalculated from `amount_paid`, so a
/// sequence of partial payments accrues exactly what a single full payment
/// would.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Invoice {
    pub reference: String,
    pub amount: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
    pub kind: InvoiceKind,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Invoice {
    /// Creates an open invoice with no payment history.
    pub fn new(reference: impl Into<String>, amount: Decimal, kind: InvoiceKind) -> Self {
        Self {
            reference: reference.into(),
            amount,
            amount_paid: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            kind,
            payments: Vec::new(),
        }
    }

    pub fn has_payments(&self) -> bool {
        !self.payments.is_empty()
    }

    /// Sum of the recorded payment history, independent of `amount_paid`.
    pub fn total_paid(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// `amount - amount_paid` as of the running field, which is what the
    /// rejection and settlement checks compare against.
    pub fn remaining_balance(&self) -> Decimal {
        self.amount - self.amount_paid
    }

    /// Records an accepted payment against the invoice, keeping the running
    /// total and the tax accrual in step with the payment history.
    ///
    /// Returns true when this payment settles the invoice. Callers are
    /// expected to have run the rejection checks first; this method applies
    /// unconditionally.
    pub fn apply_payment(&mut self, payment: Payment) -> bool {
        let has_existing_payments = self.has_payments();
        let is_full_payment = if has_existing_payments {
            payment.amount == self.remaining_balance()
        } else {
            payment.amount == self.amount
        };

        if has_existing_payments {
            self.amount_paid += payment.amount;
        } else {
            // A first recorded payment sets the running total outright; the
            // empty history is authoritative over any stale field value.
            self.amount_paid = payment.amount;
        }
        self.tax_amount = self.updated_tax(payment.amount, has_existing_payments);
        self.payments.push(payment);

        is_full_payment
    }

    fn updated_tax(&self, payment_amount: Decimal, has_existing_payments: bool) -> Decimal {
        let prior_tax = if has_existing_payments {
            self.tax_amount
        } else {
            Decimal::ZERO
        };
        match self.kind {
            InvoiceKind::Commercial => prior_tax + payment_amount * COMMERCIAL_TAX_RATE,
            InvoiceKind::Standard => prior_tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn with_history(amount: Decimal, paid: Decimal, tax: Decimal, kind: InvoiceKind) -> Invoice {
        Invoice {
            reference: "INV-001".to_string(),
            amount,
            amount_paid: paid,
            tax_amount: tax,
            kind,
            payments: vec![Payment::new("", paid)],
        }
    }

    #[test]
    fn test_new_invoice_is_unpaid() {
        let invoice = Invoice::new("INV-001", dec!(100), InvoiceKind::Standard);
        assert!(!invoice.has_payments());
        assert_eq!(invoice.amount_paid, Decimal::ZERO);
        assert_eq!(invoice.tax_amount, Decimal::ZERO);
        assert_eq!(invoice.remaining_balance(), dec!(100));
    }

    #[test]
    fn test_total_paid_sums_history() {
        let mut invoice = Invoice::new("INV-001", dec!(100), InvoiceKind::Standard);
        invoice.apply_payment(Payment::new("INV-001", dec!(30)));
        invoice.apply_payment(Payment::new("INV-001", dec!(20)));
        assert_eq!(invoice.total_paid(), dec!(50));
        assert_eq!(invoice.amount_paid, dec!(50));
    }

    #[test]
    fn test_first_full_payment_settles() {
        let mut invoice = Invoice::new("INV-001", dec!(100), InvoiceKind::Standard);
        let settled = invoice.apply_payment(Payment::new("INV-001", dec!(100)));
        assert!(settled);
        assert_eq!(invoice.amount_paid, dec!(100));
        assert_eq!(invoice.payments.len(), 1);
    }

    #[test]
    fn test_first_payment_overwrites_stale_running_total() {
        let mut invoice = Invoice::new("INV-001", dec!(10), InvoiceKind::Standard);
        invoice.amount_paid = dec!(3);

        let settled = invoice.apply_payment(Payment::new("INV-001", dec!(4)));
        assert!(!settled);
        assert_eq!(invoice.amount_paid, dec!(4));
        assert_eq!(invoice.total_paid(), dec!(4));
    }

    #[test]
    fn test_final_payment_against_remaining_balance_settles() {
        let mut invoice = with_history(dec!(10), dec!(5), Decimal::ZERO, InvoiceKind::Standard);
        let settled = invoice.apply_payment(Payment::new("INV-001", dec!(5)));
        assert!(settled);
        assert_eq!(invoice.amount_paid, dec!(10));
        assert_eq!(invoice.payments.len(), 2);
    }

    #[test]
    fn test_standard_invoice_accrues_no_tax() {
        let mut invoice = Invoice::new("INV-001", dec!(100), InvoiceKind::Standard);
        invoice.apply_payment(Payment::new("INV-001", dec!(50)));
        assert_eq!(invoice.tax_amount, Decimal::ZERO);
        invoice.apply_payment(Payment::new("INV-001", dec!(30)));
        assert_eq!(invoice.tax_amount, Decimal::ZERO);
    }

    #[test]
    fn test_commercial_tax_accrues_per_payment() {
        let mut invoice = Invoice::new("INV-001", dec!(100), InvoiceKind::Commercial);
        invoice.apply_payment(Payment::new("INV-001", dec!(50)));
        assert_eq!(invoice.tax_amount, dec!(7.0));
        invoice.apply_payment(Payment::new("INV-001", dec!(30)));
        assert_eq!(invoice.tax_amount, dec!(11.2));
        invoice.apply_payment(Payment::new("INV-001", dec!(20)));
        assert_eq!(invoice.tax_amount, dec!(14.0));
    }

    #[test]
    fn test_first_payment_resets_unbacked_tax() {
        let mut invoice = Invoice::new("INV-001", dec!(100), InvoiceKind::Commercial);
        invoice.tax_amount = dec!(9.9);

        invoice.apply_payment(Payment::new("INV-001", dec!(50)));
        assert_eq!(invoice.tax_amount, dec!(7.0));
    }

    #[test]
    fn test_kind_labels_match_serde() {
        assert_eq!(InvoiceKind::Standard.as_str(), "standard");
        assert_eq!(InvoiceKind::Commercial.as_str(), "commercial");
        assert_eq!(
            serde_json::to_string(&InvoiceKind::Commercial).unwrap(),
            "\"commercial\""
        );
    }

    #[test]
    fn test_invoice_json_roundtrip_with_defaults() {
        let json = r#"{"reference":"INV-009","amount":"25","kind":"standard"}"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.reference, "INV-009");
        assert_eq!(invoice.amount, dec!(25));
        assert_eq!(invoice.amount_paid, Decimal::ZERO);
        assert_eq!(invoice.tax_amount, Decimal::ZERO);
        assert!(invoice.payments.is_empty());
    }
}
