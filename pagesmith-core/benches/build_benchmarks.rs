//! Document build benchmarks
//!
//! Measures page drawing plus serialization for documents of increasing size,
//! and the text measurement used for alignment.
//!
//! Run with: `cargo bench build_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pagesmith::{measure_text, Document, TextAlign, TextOptions};

fn mock_jpeg() -> Vec<u8> {
    let mut data = vec![
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x01, 0x00, 0x01, 0x00, 0x03,
    ];
    data.extend(std::iter::repeat(0x55).take(16 * 1024));
    data.extend([0xFF, 0xD9]);
    data
}

fn build_document(pages: usize, image: &[u8]) -> Vec<u8> {
    let mut doc = Document::new();
    doc.set_title("Benchmark");
    for page_num in 0..pages {
        doc.add_page(|page| {
            page.text(
                &format!("Page {page_num}"),
                50.0,
                740.0,
                24.0,
                &TextOptions::new(),
            )?;
            for row in 0..20 {
                let y = 700.0 - row as f64 * 20.0;
                page.text(
                    "The quick brown fox jumps over the lazy dog",
                    50.0,
                    y,
                    11.0,
                    &TextOptions::new().align(TextAlign::Right).width(512.0),
                )?
                .line(50.0, y - 4.0, 562.0, y - 4.0, "#ccc", Some(0.5))?;
            }
            page.rect(50.0, 40.0, 512.0, 200.0, "#eef")?
                .image(image, 60.0, 50.0, 180.0, 180.0)?;
            Ok(())
        })
        .expect("page draws");
    }
    doc.build().expect("document builds")
}

fn bench_build(c: &mut Criterion) {
    let image = mock_jpeg();
    let mut group = c.benchmark_group("build");

    for pages in [1usize, 10, 100] {
        group.throughput(Throughput::Elements(pages as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pages), &pages, |b, &pages| {
            b.iter(|| build_document(black_box(pages), &image));
        });
    }

    group.finish();
}

fn bench_measure_text(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
    c.bench_function("measure_text", |b| {
        b.iter(|| measure_text(black_box(&text), black_box(12.0)));
    });
}

criterion_group!(benches, bench_build, bench_measure_text);
criterion_main!(benches);
