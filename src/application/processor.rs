use crate::domain::invoice::Invoice;
use crate::domain::payment::Payment;
use crate::domain::ports::{InvoiceStore, InvoiceStoreBox};
use crate::error::{PaymentError, Result};
use std::fmt;

/// Result of applying one payment to its invoice.
///
/// Rejections are ordinary outcomes, not errors: the invoice is left untouched
/// and nothing is persisted. `Display` renders the exact message reported to
/// callers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PaymentOutcome {
    NoPaymentNeeded,
    AlreadyFullyPaid,
    ExceedsRemainingBalance,
    ExceedsInvoiceAmount,
    PartiallyPaid,
    FullyPaid,
    AnotherPartialPayment,
    FinalPartialPayment,
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PaymentOutcome::NoPaymentNeeded => "no payment needed",
            PaymentOutcome::AlreadyFullyPaid => "invoice was already fully paid",
            PaymentOutcome::ExceedsRemainingBalance => {
                "the payment is greater than the partial amount remaining"
            }
            PaymentOutcome::ExceedsInvoiceAmount => {
                "the payment is greater than the invoice amount"
            }
            PaymentOutcome::PartiallyPaid => "invoice is now partially paid",
            PaymentOutcome::FullyPaid => "invoice is now fully paid",
            PaymentOutcome::AnotherPartialPayment => {
                "another partial payment received, still not fully paid"
            }
            PaymentOutcome::FinalPartialPayment => {
                "final partial payment received, invoice is now fully paid"
            }
        };
        f.write_str(message)
    }
}

/// The main entry point for applying payments to invoices.
///
/// `PaymentProcessor` owns the storage backend and runs one linear decision
/// sequence per payment. Rejected payments never touch the invoice; a save
/// happens only when a payment is accepted.
pub struct PaymentProcessor {
    store: InvoiceStoreBox,
}

impl PaymentProcessor {
    pub fn new(store: InvoiceStoreBox) -> Self {
        Self { store }
    }

    /// Applies `payment` to the invoice it references.
    ///
    /// Fails with [`PaymentError::InvoiceNotFound`] when no invoice matches,
    /// and with [`PaymentError::InvalidInvoiceState`] when a zero-amount
    /// invoice carries recorded payments. Every other result, including the
    /// rejections, is a [`PaymentOutcome`].
    pub async fn process(&self, payment: Payment) -> Result<PaymentOutcome> {
        let mut invoice = self
            .store
            .get(&payment.reference)
            .await?
            .ok_or(PaymentError::InvoiceNotFound)?;

        if invoice.amount.is_zero() {
            if invoice.has_payments() {
                return Err(PaymentError::InvalidInvoiceState);
            }
            return Ok(PaymentOutcome::NoPaymentNeeded);
        }

        let has_existing_payments = invoice.has_payments();
        // Both history-based rejections hinge on the recorded sum being
        // nonzero, not merely on the history being non-empty.
        let total_paid = invoice.total_paid();

        if has_existing_payments && !total_paid.is_zero() && total_paid == invoice.amount {
            return Ok(PaymentOutcome::AlreadyFullyPaid);
        }
        if has_existing_payments
            && !total_paid.is_zero()
            && payment.amount > invoice.remaining_balance()
        {
            return Ok(PaymentOutcome::ExceedsRemainingBalance);
        }
        if !has_existing_payments && payment.amount > invoice.amount {
            return Ok(PaymentOutcome::ExceedsInvoiceAmount);
        }

        let is_full_payment = invoice.apply_payment(payment);
        self.store.save(invoice).await?;

        Ok(match (has_existing_payments, is_full_payment) {
            (false, false) => PaymentOutcome::PartiallyPaid,
            (false, true) => PaymentOutcome::FullyPaid,
            (true, false) => PaymentOutcome::AnotherPartialPayment,
            (true, true) => PaymentOutcome::FinalPartialPayment,
        })
    }

    /// Consumes the processor and returns the final state of all invoices.
    pub async fn into_invoices(self) -> Result<Vec<Invoice>> {
        self.store.get_all().await
    }
}
