//! Pipe-separated text to records and back.
//!
//! Run with: cargo run --example pipe_records
//! Set RUST_LOG=serde_dsv=debug to see the conversion events.

use serde_dsv::{to_delimited_with_options, to_records_with_options, Delimiter, DsvOptions};
use std::error::Error;
use tracing_subscriber::EnvFilter;

const PIPE_DATA: &str = r#"
"Name"|"Value"|"Note"
Alice|100|"Item A, for sales"
Bob|200|"Item B| for testing"
"Charlie ""The King"""|300|A simple note
"#;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = DsvOptions::new().with_delimiter(Delimiter::PIPE);

    let records = to_records_with_options(PIPE_DATA, &options);
    println!("Records:\n{}\n", serde_json::to_string_pretty(&records)?);

    let text = to_delimited_with_options(&records, &options);
    println!("Back to pipe-separated text:\n{}", text);

    Ok(())
}
