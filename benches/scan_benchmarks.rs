use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spacesweep::cleaner::folder_size;
use spacesweep::discovery::{DuplicateScanner, LargeFileScanner};
use spacesweep::scanner::{hash_file, ExclusionFilter, FileWalker};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Helper to create a test directory with a specific structure
fn setup_test_dir(depth: usize, files_per_dir: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    create_dir_recursive(temp_dir.path().to_path_buf(), depth, files_per_dir);
    temp_dir
}

fn create_dir_recursive(path: PathBuf, depth: usize, files_per_dir: usize) {
    if depth == 0 {
        return;
    }

    if !path.exists() {
        fs::create_dir_all(&path).expect("Failed to create dir");
    }

    for i in 0..files_per_dir {
        let file_path = path.join(format!("file_{i}.txt"));
        fs::write(file_path, "some content to make it a real file").expect("Failed to write file");
    }

    if depth > 1 {
        for i in 0..2 {
            // 2 subdirectories per level
            let sub_dir = path.join(format!("dir_{i}"));
            create_dir_recursive(sub_dir, depth - 1, files_per_dir);
        }
    }
}

// 1. Directory Walking Benchmarks
fn bench_walker(c: &mut Criterion) {
    let temp_dir = setup_test_dir(4, 10); // depth 4, 10 files per dir -> roughly 150 files

    c.bench_function("walker_150_files", |b| {
        b.iter(|| {
            let walker = FileWalker::new(temp_dir.path(), ExclusionFilter::new());
            let files: Vec<_> = walker.collect();
            black_box(files);
        })
    });
}

// 2. Hashing Benchmarks
fn bench_hasher(c: &mut Criterion) {
    let mut group = c.benchmark_group("hasher");

    for size_kb in [1, 1024, 10240] {
        // 1KB, 1MB, 10MB
        let data = vec![b'a'; size_kb * 1024];
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bench_file.dat");
        fs::write(&file_path, &data).expect("Failed to write bench file");

        group.bench_with_input(format!("blake3_{size_kb}KB"), &file_path, |b, path| {
            b.iter(|| {
                let hash = hash_file(path).unwrap();
                black_box(hash);
            });
        });
    }
    group.finish();
}

// 3. Duplicate Scan Benchmark
fn bench_duplicate_scan(c: &mut Criterion) {
    let temp_dir = setup_test_dir(3, 10); // ~70 files
                                          // Create some duplicates
    let src = temp_dir.path().join("file_0.txt");
    if src.exists() {
        for i in 1..10 {
            let dst = temp_dir.path().join(format!("dup_{i}.txt"));
            fs::copy(&src, &dst).expect("Failed to copy duplicate");
        }
    }

    let scanner = DuplicateScanner::new().with_min_size(1);

    c.bench_function("duplicate_scan_approx_80_files", |b| {
        b.iter(|| {
            let results = scanner.scan(temp_dir.path()).unwrap();
            black_box(results);
        })
    });
}

// 4. Large File Scan Benchmark
fn bench_large_file_scan(c: &mut Criterion) {
    let temp_dir = setup_test_dir(3, 10);
    // A few files above the bench threshold
    for i in 0..5 {
        let path = temp_dir.path().join(format!("big_{i}.bin"));
        fs::write(&path, vec![0u8; 64 * 1024]).expect("Failed to write big file");
    }

    let scanner = LargeFileScanner::new().with_threshold(16 * 1024);

    c.bench_function("large_file_scan_approx_75_files", |b| {
        b.iter(|| {
            let results = scanner.scan(temp_dir.path()).unwrap();
            black_box(results);
        })
    });
}

// 5. Tree Size Measurement Benchmark
fn bench_folder_size(c: &mut Criterion) {
    let temp_dir = setup_test_dir(4, 10);

    c.bench_function("folder_size_150_files", |b| {
        b.iter(|| {
            let total = folder_size(temp_dir.path());
            black_box(total);
        })
    });
}

criterion_group!(
    benches,
    bench_walker,
    bench_hasher,
    bench_duplicate_scan,
    bench_large_file_scan,
    bench_folder_size
);
criterion_main!(benches);
