//! End-to-end batch transfers against a directory-backed bucket.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use nordata_store::{LocalObjectStore, ObjectStore, TransferConfig};
use nordata_transfer::{Bucket, PathSpec, TransferError};

fn dir_string(path: &Path) -> String {
    format!("{}/", path.display())
}

fn open_bucket(root: &Path) -> (Arc<LocalObjectStore>, Bucket) {
    let store = Arc::new(LocalObjectStore::create(root).unwrap());
    let config = TransferConfig {
        multipart_threshold: 4,
        multipart_chunksize: 2,
    };
    let bucket = Bucket::open(store.clone(), config).unwrap();
    (store, bucket)
}

#[test]
fn upload_glob_download_delete_roundtrip() {
    let work = tempfile::tempdir().unwrap();
    let local = work.path().join("local");
    fs::create_dir_all(local.join("skip.csv")).unwrap();
    fs::write(local.join("jan.csv"), b"1,2,3").unwrap();
    fs::write(local.join("feb.csv"), b"4,5,6").unwrap();
    fs::write(local.join("readme.txt"), b"hi").unwrap();

    let (store, bucket) = open_bucket(&work.path().join("bucket"));

    // Upload every csv into tmp/.
    let uploaded = bucket
        .upload(
            &PathSpec::single(format!("{}*.csv", dir_string(&local))),
            &PathSpec::single("tmp"),
        )
        .unwrap();
    assert_eq!(uploaded.len(), 2);
    assert_eq!(store.list_keys("tmp/").unwrap(), vec!["tmp/feb.csv", "tmp/jan.csv"]);

    // The placeholder rule applies to store-side folders too.
    store.put_object("tmp/archive/", b"").unwrap();
    assert_eq!(bucket.glob("tmp/*").unwrap(), vec!["tmp/feb.csv", "tmp/jan.csv"]);

    // Download them back somewhere else.
    let out = work.path().join("out");
    let downloaded = bucket
        .download(&PathSpec::single("tmp/*.csv"), &PathSpec::single(dir_string(&out)))
        .unwrap();
    assert_eq!(downloaded.len(), 2);
    assert_eq!(fs::read(out.join("jan.csv")).unwrap(), b"1,2,3");
    assert_eq!(fs::read(out.join("feb.csv")).unwrap(), b"4,5,6");

    // Delete by pattern, then again as a no-op.
    let deleted = bucket.delete(&PathSpec::single("tmp/*.csv")).unwrap();
    assert_eq!(deleted, vec!["tmp/feb.csv", "tmp/jan.csv"]);
    assert!(bucket.delete(&PathSpec::single("tmp/*.csv")).unwrap().is_empty());
    assert_eq!(store.list_keys("").unwrap(), vec!["tmp/archive/"]);
}

#[test]
fn explicit_lists_download_in_order() {
    let work = tempfile::tempdir().unwrap();
    let (store, bucket) = open_bucket(&work.path().join("bucket"));
    store.put_object("a.txt", b"a").unwrap();
    store.put_object("b.txt", b"b").unwrap();

    let x = work.path().join("x");
    let targets = [x.join("a.txt"), x.join("b.txt")];
    let targets: Vec<String> = targets.iter().map(|p| p.display().to_string()).collect();

    let pairs = bucket
        .download(&PathSpec::many(["a.txt", "b.txt"]), &PathSpec::Many(targets.clone()))
        .unwrap();
    assert_eq!(pairs[0].source, "a.txt");
    assert_eq!(pairs[0].destination, targets[0]);
    assert_eq!(pairs[1].source, "b.txt");
    assert_eq!(fs::read(x.join("b.txt")).unwrap(), b"b");
}

#[test]
fn missing_bucket_is_reported() {
    let work = tempfile::tempdir().unwrap();
    let root = work.path().join("bucket");
    let store = Arc::new(LocalObjectStore::create(&root).unwrap());
    fs::remove_dir(&root).unwrap();

    let err = Bucket::open(store, TransferConfig::default()).unwrap_err();
    assert!(matches!(err, TransferError::NamespaceNotFound(_)));
}

#[test]
fn shape_mismatch_touches_nothing() {
    let work = tempfile::tempdir().unwrap();
    let (store, bucket) = open_bucket(&work.path().join("bucket"));
    store.put_object("a.txt", b"a").unwrap();

    let out = work.path().join("x");
    let err = bucket
        .download(&PathSpec::many(["a.txt"]), &PathSpec::single(dir_string(&out)))
        .unwrap_err();
    assert!(matches!(err, TransferError::ShapeMismatch { .. }));
    assert!(!out.exists());
}
