// benches/walk_bench.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use longwalk::normalize::{directory_name_of, normalize_from};
use longwalk::prefix::{ensure_extended_prefix, strip_extended_prefix};

fn deep_path(levels: usize) -> String {
    let mut path = String::from(r"C:\base");
    for level in 0..levels {
        path.push_str(&format!(r"\node{}\..\node{}", level, level));
    }
    path.push_str(r"\leaf.txt");
    path
}

fn bench_normalize_deep(c: &mut Criterion) {
    let path = deep_path(64);

    c.bench_function("normalize_deep", |b| {
        b.iter(|| normalize_from(black_box(&path), black_box(r"C:\work")).unwrap())
    });
}

fn bench_normalize_relative(c: &mut Criterion) {
    c.bench_function("normalize_relative", |b| {
        b.iter(|| {
            normalize_from(black_box(r"logs\..\data\current\report.txt"), black_box(r"C:\work"))
                .unwrap()
        })
    });
}

fn bench_marker_round_trip(c: &mut Criterion) {
    let unc = r"\\server\share\team\projects\deep\tree\file.bin";

    c.bench_function("marker_round_trip", |b| {
        b.iter(|| strip_extended_prefix(&ensure_extended_prefix(black_box(unc))))
    });
}

fn bench_directory_name_chain(c: &mut Criterion) {
    let path = deep_path(16);
    let normalized = normalize_from(&path, r"C:\work").unwrap();

    c.bench_function("directory_name_chain", |b| {
        b.iter(|| {
            let mut cursor = normalized.display_form();
            let mut depth = 0usize;
            while let Some(parent) = directory_name_of(black_box(&cursor)) {
                cursor = parent;
                depth += 1;
            }
            depth
        })
    });
}

criterion_group!(
    benches,
    bench_normalize_deep,
    bench_normalize_relative,
    bench_marker_round_trip,
    bench_directory_name_chain
);
criterion_main!(benches);
