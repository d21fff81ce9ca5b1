use clap::Parser;
use invopay::application::processor::PaymentProcessor;
use invopay::domain::ports::{InvoiceStore, InvoiceStoreBox};
use invopay::infrastructure::in_memory::InMemoryInvoiceStore;
use invopay::interfaces::csv::invoice_writer::InvoiceWriter;
use invopay::interfaces::csv::payment_reader::PaymentReader;
use invopay::interfaces::json::invoice_book;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payments CSV file
    input: PathBuf,

    /// JSON invoice book to seed the store with before processing
    #[arg(long)]
    invoices: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Write the final state of all invoices to stdout as CSV
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = open_store(cli.db_path).into_diagnostic()?;

    if let Some(book_path) = cli.invoices {
        let book = File::open(book_path).into_diagnostic()?;
        for invoice in invoice_book::load(book).into_diagnostic()? {
            store.save(invoice).await.into_diagnostic()?;
        }
    }

    let processor = PaymentProcessor::new(store);

    // Process payments
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = PaymentReader::new(file);
    for payment_result in reader.payments() {
        match payment_result {
            Ok(payment) => {
                let reference = payment.reference.clone();
                match processor.process(payment).await {
                    Ok(outcome) => println!("{}: {}", reference, outcome),
                    Err(e) => eprintln!("Error processing payment: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Error reading payment: {}", e);
            }
        }
    }

    if cli.summary {
        let invoices = processor.into_invoices().await.into_diagnostic()?;

        let stdout = io::stdout();
        let mut writer = InvoiceWriter::new(stdout.lock());
        writer.write_invoices(invoices).into_diagnostic()?;
    }

    Ok(())
}

fn open_store(db_path: Option<PathBuf>) -> invopay::error::Result<InvoiceStoreBox> {
    match db_path {
        Some(path) => open_persistent_store(path),
        None => Ok(Box::new(InMemoryInvoiceStore::new())),
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_persistent_store(path: PathBuf) -> invopay::error::Result<InvoiceStoreBox> {
    use invopay::infrastructure::rocksdb::RocksDbInvoiceStore;

    Ok(Box::new(RocksDbInvoiceStore::open(path)?))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_persistent_store(_path: PathBuf) -> invopay::error::Result<InvoiceStoreBox> {
    eprintln!(
        "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
    );
    Ok(Box::new(InMemoryInvoiceStore::new()))
}
