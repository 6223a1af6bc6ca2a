//! Benchmarks for merge and preview performance.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashSet;
use std::hint::black_box;

use hostsfilter::diff::generate_diff;
use hostsfilter::hosts::{parse_content, HostEntry, SYSTEM_SOURCE};
use hostsfilter::merger::{merge_entries, preview_stats, SourceMap};

const LABELS: [&str; 3] = ["Ads", "Malware", "Spam"];

/// Hosts-formatted text with `count` single-domain lines
fn generate_list(count: usize, offset: usize) -> String {
    (0..count)
        .map(|i| format!("0.0.0.0 host{}.example.com\n", i + offset))
        .collect()
}

/// Three sources overlapping by half
fn generate_sources(size: usize) -> SourceMap {
    LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let text = generate_list(size, i * size / 2);
            (label.to_string(), parse_content(&text, label))
        })
        .collect()
}

fn system_entries() -> Vec<HostEntry> {
    parse_content(
        "127.0.0.1 localhost\n::1 localhost ip6-localhost\n127.0.1.1 workstation\n",
        SYSTEM_SOURCE,
    )
}

fn whitelist(size: usize) -> HashSet<String> {
    (0..size)
        .step_by(100)
        .map(|i| format!("host{}.example.com", i))
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [1_000, 10_000, 100_000] {
        let text = generate_list(size, 0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(parse_content(text, "Bench")))
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let system = system_entries();

    for size in [1_000, 10_000, 100_000] {
        let sources = generate_sources(size);
        let whitelist = whitelist(size);

        group.bench_with_input(BenchmarkId::new("merge_entries", size), &sources, |b, sources| {
            b.iter(|| black_box(merge_entries(&system, &whitelist, &LABELS, sources)))
        });

        group.bench_with_input(BenchmarkId::new("preview_stats", size), &sources, |b, sources| {
            b.iter(|| black_box(preview_stats(&system, &whitelist, &LABELS, sources)))
        });
    }

    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    let system = system_entries();

    for size in [1_000, 10_000] {
        let sources = generate_sources(size);
        let old = merge_entries(&system, &HashSet::new(), &LABELS[..2], &sources).content;
        let new = merge_entries(&system, &HashSet::new(), &LABELS, &sources).content;

        group.bench_with_input(BenchmarkId::from_parameter(size), &(old, new), |b, (old, new)| {
            b.iter(|| black_box(generate_diff(old, new, "current", "new")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_merge, bench_diff);
criterion_main!(benches);
