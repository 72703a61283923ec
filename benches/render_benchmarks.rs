// Performance benchmarks for the rendering pipeline
//
// Run benchmarks with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mdpress::canvas::FontId;
use mdpress::config::RenderConfig;
use mdpress::{blocks, inline, layout};

fn sample_document(sections: usize) -> String {
    (0..sections)
        .map(|i| {
            format!(
                "## Section {i}\n\nSome **bold** and *italic* prose with `code` for \
                 section {i}, long enough to wrap across a couple of lines on the page.\n\n\
                 - first point\n- second point\n\n```\nlet x = {i};\n```\n\n"
            )
        })
        .collect()
}

fn bench_block_parsing(c: &mut Criterion) {
    let small = sample_document(2);
    let medium = sample_document(20);
    let large = sample_document(200);

    let mut group = c.benchmark_group("block_parsing");
    group.bench_function("small", |b| {
        b.iter(|| blocks::parse_markdown(black_box(&small)))
    });
    group.bench_function("medium", |b| {
        b.iter(|| blocks::parse_markdown(black_box(&medium)))
    });
    group.bench_function("large", |b| {
        b.iter(|| blocks::parse_markdown(black_box(&large)))
    });
    group.finish();
}

fn bench_inline_tokenize(c: &mut Criterion) {
    let plain = "a plain sentence with no markers at all, just ordinary words";
    let styled = "mix of **bold**, *italic*, `code`, ~~struck~~ and [links](https://x.dev) here";

    let mut group = c.benchmark_group("inline_tokenize");
    group.bench_function("plain", |b| b.iter(|| inline::tokenize(black_box(plain))));
    group.bench_function("styled", |b| b.iter(|| inline::tokenize(black_box(styled))));
    group.finish();
}

fn bench_wrapping(c: &mut Criterion) {
    let text = "the quick brown fox jumps over the lazy dog ".repeat(40);

    c.bench_function("measure_wrap", |b| {
        b.iter(|| layout::measure_wrap(black_box(&text), 170.0, FontId::Helvetica, 11.0))
    });
}

fn bench_full_convert(c: &mut Criterion) {
    let small = sample_document(2);
    let large = sample_document(100);
    let config = RenderConfig::default();

    let mut group = c.benchmark_group("convert");
    group.bench_function("small", |b| {
        b.iter(|| mdpress::convert(black_box(&small), &config).unwrap())
    });
    group.bench_function("large", |b| {
        b.iter(|| mdpress::convert(black_box(&large), &config).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_block_parsing,
    bench_inline_tokenize,
    bench_wrapping,
    bench_full_convert
);
criterion_main!(benches);
