use ext_fs::{NormalizedPath, io};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_parent_and_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("nested/dir/cache.json"));

    io::write_atomic(&path, b"{}").unwrap();

    assert_eq!(fs::read_to_string(path.to_native()).unwrap(), "{}");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("cache.json");
    fs::write(&file_path, "original").unwrap();

    io::write_text(&NormalizedPath::new(&file_path), "updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("cache.json"));

    io::write_text(&path, "a").unwrap();
    io::write_text(&path, "b").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_read_text_nonexistent_file() {
    let result = io::read_text(&NormalizedPath::new("/nonexistent/cache.json"));
    assert!(matches!(result, Err(ext_fs::Error::Io { .. })));
}

#[test]
fn test_concurrent_writes_produce_a_complete_file() {
    let temp = TempDir::new().unwrap();
    let path = Arc::new(NormalizedPath::new(temp.path().join("cache.json")));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|id| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..10 {
                    io::write_text(&path, &format!("writer{id}:{i}")).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread should not panic");
    }

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert!(content.starts_with("writer"), "unexpected content: {content}");
    assert_eq!(content.matches(':').count(), 1);
}
