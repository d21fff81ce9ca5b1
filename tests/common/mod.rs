use invopay::domain::invoice::Invoice;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn write_book(path: &Path, invoices: &[Invoice]) -> Result<(), Error> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, invoices)?;
    Ok(())
}

pub fn write_payments(path: &Path, rows: &[(&str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["reference", "amount"])?;
    for (reference, amount) in rows {
        wtr.write_record([*reference, *amount])?;
    }

    wtr.flush()?;
    Ok(())
}
