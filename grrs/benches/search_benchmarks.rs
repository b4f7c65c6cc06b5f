use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grrs::{find_matches, search, GrepConfig, NoProgress};
use std::{fs::File, io::Write, num::NonZeroUsize};
use tempfile::tempdir;

fn create_test_files(
    dir: &tempfile::TempDir,
    file_count: usize,
    lines_per_file: usize,
) -> std::io::Result<()> {
    for i in 0..file_count {
        let file_path = dir.path().join(format!("test_{}.txt", i));
        let mut file = File::create(file_path)?;
        for j in 0..lines_per_file {
            writeln!(
                file,
                "Line {} TODO: fix bug {} FIXME: optimize line {} NOTE: important task {}",
                j, j, j, j
            )?;
        }
    }
    Ok(())
}

fn create_base_config(dir: &tempfile::TempDir, pattern: &str) -> GrepConfig {
    let mut config = GrepConfig::new(pattern, vec![dir.path().to_path_buf()]);
    config.recursive = true;
    config.thread_count = NonZeroUsize::new(1).unwrap();
    config
}

fn bench_patterns(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    create_test_files(&dir, 1, 1000).unwrap();

    let patterns = [
        ("literal", "TODO", false),
        ("regex_simple", r"TODO:.*\d+", true),
        ("regex_complex", r"FIXME:.*line \d+ NOTE", true),
    ];

    let mut group = c.benchmark_group("Patterns");
    for (name, pattern, is_regex) in patterns {
        let mut config = create_base_config(&dir, pattern);
        config.is_regex = is_regex;

        group.bench_function(name, |b| {
            b.iter(|| black_box(search(&config, &NoProgress).unwrap()));
        });
    }
    group.finish();
}

fn bench_file_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("File Scaling");
    for count in [1, 10, 100] {
        let dir = tempdir().unwrap();
        create_test_files(&dir, count, 10).unwrap();
        let config = create_base_config(&dir, "TODO");

        group.bench_function(format!("files_{}", count), |b| {
            b.iter(|| black_box(search(&config, &NoProgress).unwrap()));
        });
    }
    group.finish();
}

fn bench_find_matches(c: &mut Criterion) {
    let content: String = (0..10_000)
        .map(|i| format!("line {} {}\n", i, if i % 7 == 0 { "needle" } else { "hay" }))
        .collect();

    c.bench_function("find_matches", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64 * 1024);
            find_matches(black_box(&content), "needle", &mut out).unwrap();
            out
        });
    });
}

criterion_group!(
    benches,
    bench_patterns,
    bench_file_scaling,
    bench_find_matches
);
criterion_main!(benches);
