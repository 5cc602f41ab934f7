//! Tests for the upload storage collaborator.

use inscription_api::uploads::UploadStore;

#[tokio::test]
async fn store_writes_file_under_unique_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = UploadStore::new(dir.path());

    let stored = store.store("diplome.pdf", b"%PDF-1.4 fake").await.unwrap();

    assert!(stored.path.exists());
    assert_eq!(stored.original_name, "diplome.pdf");
    assert!(stored.stored_name.ends_with(".pdf"));
    assert_ne!(stored.stored_name, "diplome.pdf");

    let contents = tokio::fs::read(&stored.path).await.unwrap();
    assert_eq!(contents, b"%PDF-1.4 fake");
}

#[tokio::test]
async fn same_original_name_gets_distinct_stored_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = UploadStore::new(dir.path());

    let first = store.store("recu.jpg", b"a").await.unwrap();
    let second = store.store("recu.jpg", b"b").await.unwrap();

    assert_ne!(first.stored_name, second.stored_name);
    assert!(first.path.exists());
    assert!(second.path.exists());
}

#[tokio::test]
async fn ensure_root_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("public").join("uploads");
    let store = UploadStore::new(&nested);

    store.ensure_root().await.unwrap();
    assert!(nested.is_dir());

    let stored = store.store("carte", b"id").await.unwrap();
    assert!(stored.path.starts_with(&nested));
    // No extension on the original means none on the stored name.
    assert!(!stored.stored_name.contains('.'));
}
