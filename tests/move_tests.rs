use std::fs;

use spacesweep::cleaner::{move_file, MoveError};
use tempfile::TempDir;

#[test]
fn test_move_keeps_name_and_content() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("holiday.mp4");
    fs::write(&source, b"frames and frames").unwrap();
    let dest_dir = dir.path().join("videos").join("2024");

    let result = move_file(&source, &dest_dir).unwrap();

    assert!(!source.exists());
    assert_eq!(result.source, source);
    assert_eq!(result.destination, dest_dir.join("holiday.mp4"));
    assert_eq!(fs::read(&result.destination).unwrap(), b"frames and frames");
}

#[test]
fn test_move_into_populated_directory() {
    let dir = TempDir::new().unwrap();
    let dest_dir = dir.path().join("library");
    fs::create_dir(&dest_dir).unwrap();
    fs::write(dest_dir.join("existing.txt"), b"stay put").unwrap();

    let source = dir.path().join("incoming.txt");
    fs::write(&source, b"new arrival").unwrap();

    move_file(&source, &dest_dir).unwrap();

    // Neighbours are untouched.
    assert_eq!(fs::read(dest_dir.join("existing.txt")).unwrap(), b"stay put");
    assert_eq!(fs::read(dest_dir.join("incoming.txt")).unwrap(), b"new arrival");
}

#[test]
fn test_move_two_files_into_same_directory() {
    let dir = TempDir::new().unwrap();
    let dest_dir = dir.path().join("sorted");
    let first = dir.path().join("one.bin");
    let second = dir.path().join("two.bin");
    fs::write(&first, b"1").unwrap();
    fs::write(&second, b"2").unwrap();

    move_file(&first, &dest_dir).unwrap();
    move_file(&second, &dest_dir).unwrap();

    assert!(dest_dir.join("one.bin").exists());
    assert!(dest_dir.join("two.bin").exists());
}

#[test]
fn test_move_back_and_forth() {
    let dir = TempDir::new().unwrap();
    let here = dir.path().join("here");
    let there = dir.path().join("there");
    fs::create_dir(&here).unwrap();
    let original = here.join("wander.dat");
    fs::write(&original, b"round trip").unwrap();

    let moved = move_file(&original, &there).unwrap();
    let returned = move_file(&moved.destination, &here).unwrap();

    assert_eq!(returned.destination, original);
    assert_eq!(fs::read(&original).unwrap(), b"round trip");
}

#[test]
fn test_move_refuses_same_named_directory_at_destination() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("report");
    fs::write(&source, b"a file named like a folder").unwrap();
    let dest_dir = dir.path().join("out");
    // A directory with the source's name occupies the slot.
    fs::create_dir_all(dest_dir.join("report")).unwrap();

    let err = move_file(&source, &dest_dir).unwrap_err();

    assert!(matches!(err, MoveError::DestinationExists(_)));
    assert!(source.exists());
    assert!(dest_dir.join("report").is_dir());
}

#[test]
fn test_failed_move_reports_which_path_collided() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("clash.txt");
    fs::write(&source, b"mine").unwrap();
    let dest_dir = dir.path().join("busy");
    fs::create_dir(&dest_dir).unwrap();
    fs::write(dest_dir.join("clash.txt"), b"theirs").unwrap();

    let err = move_file(&source, &dest_dir).unwrap_err();

    match err {
        MoveError::DestinationExists(path) => {
            assert_eq!(path, dest_dir.join("clash.txt"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read(&source).unwrap(), b"mine");
    assert_eq!(fs::read(dest_dir.join("clash.txt")).unwrap(), b"theirs");
}
