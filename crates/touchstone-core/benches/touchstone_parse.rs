//! Benchmarks for Touchstone parsing
//!
//! Parses generated 2-port bodies in each number format.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write;
use touchstone_core::Touchstone;

/// Build a 2-port body with `nfreq` points between 1 and 10 GHz
fn create_s2p_body(nfreq: usize, format: &str) -> String {
    let mut body = String::from("! generated sweep\n");
    writeln!(body, "# GHz S {} R 50", format).unwrap();
    for f in 0..nfreq {
        let freq = 1.0 + 9.0 * f as f64 / nfreq as f64;
        let phase = -360.0 * f as f64 / nfreq as f64;
        writeln!(
            body,
            "{:.9} 0.1 {:.3} 0.9 {:.3} 0.9 {:.3} 0.1 {:.3}",
            freq,
            phase,
            phase * 1.5,
            phase * 1.5,
            phase * 2.0
        )
        .unwrap();
    }
    body
}

fn bench_load_from_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_from_text");

    for format in ["RI", "MA", "DB"] {
        for nfreq in [101, 1001, 10001].iter() {
            let body = create_s2p_body(*nfreq, format);
            let id = BenchmarkId::new(format, nfreq);

            group.bench_with_input(id, &body, |b, body| {
                b.iter(|| {
                    let mut ts = Touchstone::new();
                    ts.load_from_text(black_box(body)).unwrap();
                    black_box(ts)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_load_from_text);
criterion_main!(benches);
