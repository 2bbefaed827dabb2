//! Pipe-separated text rendered as a markup document.
//!
//! Run with: cargo run --example records_to_markup

use serde_dsv::{delimited_to_markup, Delimiter, DsvOptions, MarkupOptions};
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

    let markup = delimited_to_markup(
        PIPE_DATA,
        &DsvOptions::new().with_delimiter(Delimiter::PIPE),
        &MarkupOptions::new()
            .with_root_name("Inventory")
            .with_row_name("Item"),
    )?;
    println!("{}", markup);

    Ok(())
}
