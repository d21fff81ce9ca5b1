use crate::domain::invoice::Invoice;
use crate::error::Result;
use std::io::Read;

/// Loads an invoice book from a JSON source.
///
/// The book is a JSON array of invoice objects. Bookkeeping fields
/// (`amount_paid`, `tax_amount`, `payments`) may be omitted for fresh
/// invoices and default to zero values.
pub fn load<R: Read>(source: R) -> Result<Vec<Invoice>> {
    Ok(serde_json::from_reader(source)?)
}
