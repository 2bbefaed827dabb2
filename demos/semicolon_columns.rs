//! Records to semicolon-separated text with an explicit column order.
//!
//! Run with: cargo run --example semicolon_columns

use serde::Serialize;
use serde_dsv::{record, to_delimited_with_options, to_string_with_options, Delimiter, DsvOptions};
use std::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Person {
    id: u32,
    first: String,
    last: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // `extra_col` is in no record, so its cells stay empty.
    let options = DsvOptions::new()
        .with_delimiter(Delimiter::SEMICOLON)
        .with_columns(["id", "last", "first", "extra_col"]);

    let records = vec![
        record! { "id" => 1, "first" => "John", "last" => "Doe" },
        record! { "id" => 2, "first" => "Jane", "last" => "Smith" },
    ];
    println!("{}\n", to_delimited_with_options(&records, &options));

    // Same output from plain structs.
    let people = vec![
        Person {
            id: 1,
            first: "John".to_string(),
            last: "Doe".to_string(),
        },
        Person {
            id: 2,
            first: "Jane".to_string(),
            last: "Smith".to_string(),
        },
    ];
    println!("{}", to_string_with_options(&people, &options)?);

    Ok(())
}
