use std::fs::{self, File};
use std::time::{Duration, UNIX_EPOCH};

use tempfile::TempDir;
use timegaps_scan::{
    CollectConfig, ItemCollector, ScanError, Separator, TimeSource, split_items,
};

fn touch(path: &std::path::Path, secs: u64) {
    let file = File::create(path).unwrap();
    file.set_modified(UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

#[test]
fn test_collect_modification_times() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.tar");
    let b = temp.path().join("b.tar");
    touch(&a, 1_000_000);
    touch(&b, 2_000_000);

    let items = ItemCollector::new().collect_paths(&[&a, &b]).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item.modified, 1_000_000);
    assert_eq!(items[1].item.modified, 2_000_000);
    assert_eq!(items[0].path.as_deref(), Some(a.as_path()));
    assert_eq!(items[1].item.id, b.to_string_lossy().as_ref());
}

#[test]
fn test_collect_directories() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("snapshot");
    fs::create_dir(&dir).unwrap();

    let items = ItemCollector::new().collect_paths(&[&dir]).unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].item.modified > 0);
}

#[test]
fn test_first_missing_path_fails() {
    let temp = TempDir::new().unwrap();
    let present = temp.path().join("present");
    touch(&present, 10);
    let missing = temp.path().join("nofile");

    let err = ItemCollector::new()
        .collect_paths(&[&present, &missing])
        .unwrap_err();
    assert!(matches!(err, ScanError::NotFound { ref path } if path == &missing));
    assert!(err.to_string().contains("Cannot access"));
}

#[test]
fn test_time_from_basename() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("backup-20240301.tar");
    touch(&path, 5);

    let config = CollectConfig::builder()
        .time_source(TimeSource::Basename {
            format: "backup-%Y%m%d.tar".into(),
        })
        .build()
        .unwrap();
    let items = ItemCollector::with_config(config)
        .collect_paths(&[&path])
        .unwrap();

    assert_eq!(items[0].item.modified, 1_709_251_200);
}

#[test]
fn test_time_from_basename_still_requires_existence() {
    let config = CollectConfig::builder()
        .time_source(TimeSource::Basename {
            format: "%Y%m%d".into(),
        })
        .build()
        .unwrap();
    let err = ItemCollector::with_config(config)
        .collect_paths(&["/no/such/dir/20240301"])
        .unwrap_err();
    assert!(matches!(err, ScanError::NotFound { .. }));
}

#[test]
fn test_stdin_paths_are_statted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("line item");
    touch(&path, 42);

    let input = format!("{}\n", path.display());
    let entries = split_items(input.as_bytes(), Separator::Newline).unwrap();
    let items = ItemCollector::new().collect_strings(&entries).unwrap();

    assert_eq!(items[0].item.modified, 42);
}

#[cfg(unix)]
#[test]
fn test_symlink_handling() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("target");
    touch(&target, 1_234);
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let follow = CollectConfig::builder()
        .follow_symlinks(true)
        .build()
        .unwrap();
    let followed = ItemCollector::with_config(follow)
        .collect_paths(&[&link])
        .unwrap();
    assert_eq!(followed[0].item.modified, 1_234);

    // Without following, the link's own mtime (just created) is used.
    let own = ItemCollector::new().collect_paths(&[&link]).unwrap();
    assert!(own[0].item.modified > 1_234);

    // A dangling link is only accessible when not following.
    fs::remove_file(&target).unwrap();
    assert!(ItemCollector::new().collect_paths(&[&link]).is_ok());
    let follow = CollectConfig::builder()
        .follow_symlinks(true)
        .build()
        .unwrap();
    assert!(
        ItemCollector::with_config(follow)
            .collect_paths(&[&link])
            .is_err()
    );
}

#[cfg(unix)]
#[test]
fn test_non_utf8_path_kept_exactly() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join(OsStr::from_bytes(b"snap-\xff"));
    touch(&path, 5_000);

    let items = ItemCollector::new().collect_paths(&[&path]).unwrap();

    assert_eq!(items[0].path.as_deref(), Some(path.as_path()));
    assert_eq!(items[0].item.modified, 5_000);
    assert!(items[0].item.id.ends_with("snap-\u{fffd}"));
}
