//! Benchmarks for the orders parser.
//!
//! Run with: `cargo bench --package atlantis_orders`

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use atlantis_orders::{OrderLog, OrdersParser, TokenStream};

const ORDERS: &str = r#"#atlantis 13 "secret"
unit 1710
@;Scout the northern coast
@move n ne ne in out 2
study comb
unit 468
give new 1 all unfinished wood except 13
@work ;default
form 1
  name unit "Courier of the North"
  claim 100
  advance s se p
end
unit 3286
declare 21 friendly
evict 21 453 12 faction 12 new 1
#end
"#;

// =============================================================================
// Tokenizer Benchmarks
// =============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("orders/tokenize");

    group.bench_function("bare", |b| {
        b.iter(|| black_box(TokenStream::tokenize("give 23 13 iron")))
    });

    group.bench_function("quoted_with_comment", |b| {
        b.iter(|| black_box(TokenStream::tokenize("@cast \"Earth Lore\" 27; Casting")))
    });

    group.finish();
}

// =============================================================================
// Dispatcher Benchmarks
// =============================================================================

fn bench_parse_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("orders/parse");
    group.throughput(Throughput::Bytes(ORDERS.len() as u64));

    group.bench_function("template", |b| {
        b.iter(|| {
            let mut parser = OrdersParser::new(OrderLog::new());
            for line in ORDERS.lines() {
                let _ = parser.parse_line(black_box(line));
            }
            black_box(parser.into_consumer().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse_file);
criterion_main!(benches);
