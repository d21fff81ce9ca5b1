use crate::domain::invoice::Invoice;
use crate::error::Result;
use std::io::Write;

/// Writes the final invoice states to a CSV destination.
///
/// Rows are sorted by invoice reference so the output is stable regardless of
/// the order the backing store returns them in. Decimal columns are normalized
/// to drop insignificant trailing zeros.
pub struct InvoiceWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> InvoiceWriter<W> {
    /// Creates a new `InvoiceWriter` targeting any `Write` destination (e.g., File, Stdout).
    pub fn new(destination: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(destination),
        }
    }

    /// Writes the header row followed by one row per invoice.
    pub fn write_invoices(&mut self, mut invoices: Vec<Invoice>) -> Result<()> {
        invoices.sort_by(|a, b| a.reference.cmp(&b.reference));

        self.writer.write_record([
            "reference",
            "kind",
            "amount",
            "amount_paid",
            "tax_amount",
            "payments",
        ])?;

        for invoice in invoices {
            self.writer.write_record([
                invoice.reference.clone(),
                invoice.kind.as_str().to_string(),
                invoice.amount.normalize().to_string(),
                invoice.amount_paid.normalize().to_string(),
                invoice.tax_amount.normalize().to_string(),
                invoice.payments.len().to_string(),
            ])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
