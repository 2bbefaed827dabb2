use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_dsv::{
    from_str, parse, to_delimited, to_markup, to_records, to_records_with_options, to_string,
    Delimiter, DsvOptions,
};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: if i % 3 == 0 {
                format!("Product {}, \"special\"", i)
            } else {
                format!("Product {}", i)
            },
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("records");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&products(*size)).unwrap();
        let records = to_records(&text);

        group.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            b.iter(|| to_records(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("write", size), &records, |b, records| {
            b.iter(|| to_delimited(black_box(records)))
        });
    }
    group.finish();
}

fn benchmark_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("serde");

    for size in [10, 100, 1000].iter() {
        let rows = products(*size);
        let text = to_string(&rows).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &rows, |b, rows| {
            b.iter(|| to_string(black_box(rows)))
        });
        group.bench_with_input(BenchmarkId::new("deserialize", size), &text, |b, text| {
            b.iter(|| from_str::<Product>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_markup(c: &mut Criterion) {
    let records = to_records(&to_string(&products(100)).unwrap());

    c.bench_function("render_markup", |b| {
        b.iter(|| to_markup(black_box(&records)))
    });
}

fn benchmark_delimiters(c: &mut Criterion) {
    let mut group = c.benchmark_group("delimiters");
    let rows = products(100);

    for delimiter in [Delimiter::COMMA, Delimiter::TAB, Delimiter::PIPE] {
        let options = DsvOptions::new().with_delimiter(delimiter);
        let text = serde_dsv::to_string_with_options(&rows, &options).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", delimiter.as_char())),
            &text,
            |b, text| b.iter(|| to_records_with_options(black_box(text), &options)),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_records,
    benchmark_serde,
    benchmark_markup,
    benchmark_delimiters
);
criterion_main!(benches);
