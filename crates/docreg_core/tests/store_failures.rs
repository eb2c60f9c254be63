use docreg_core::db::open_db;
use docreg_core::{
    Catalog, Category, DocsService, DocsServiceError, Document, DocumentId, DocumentPatch,
    KvStore, MemoryKvStore, NewDocument, SqliteKvStore, StorageKeys, StoreError,
};

fn catalog() -> Catalog {
    Catalog::new(vec![Category::new(
        "Engines",
        vec![Document::new("e1", "Old", "x", "")],
    )])
    .unwrap()
}

#[test]
fn quota_failure_is_reported_and_edit_stays_in_memory() {
    let kv = MemoryKvStore::with_limit(64);
    let mut service = DocsService::new(catalog(), kv.clone(), &StorageKeys::default());

    let err = service
        .update_document(
            &DocumentId::new("e1"),
            &DocumentPatch::content("a body far too long for the configured store quota"),
        )
        .unwrap_err();
    match err {
        DocsServiceError::Persist(StoreError::QuotaExceeded { limit_bytes, .. }) => {
            assert_eq!(limit_bytes, 64)
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(service.registry()[0].items[0].content.starts_with("a body"));

    let restarted = DocsService::new(catalog(), kv, &StorageKeys::default());
    assert_eq!(restarted.registry()[0].items[0].content, "x");
}

#[test]
fn corrupt_stored_values_load_as_empty_overlays() {
    let kv = MemoryKvStore::new();
    let keys = StorageKeys::default();
    kv.set(&keys.overrides, "not json at all").unwrap();
    kv.set(&keys.added, r#"["wrong","shape"]"#).unwrap();

    let service = DocsService::new(catalog(), kv, &keys);
    assert!(service.overrides().is_empty());
    assert!(service.added_documents().is_empty());
    assert_eq!(service.registry(), catalog().categories());
}

#[test]
fn sqlite_store_round_trips_overlays_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs.db");
    let keys = StorageKeys::default();

    {
        let conn = open_db(&path).unwrap();
        let mut service = DocsService::new(catalog(), SqliteKvStore::new(&conn), &keys);
        service
            .update_document(&DocumentId::new("e1"), &DocumentPatch::title("New"))
            .unwrap();
        service
            .add_document("Playbooks", NewDocument::new("Runbook").with_id("p1"))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let kv = SqliteKvStore::new(&conn);
    assert_eq!(
        kv.keys().unwrap(),
        vec![keys.added.clone(), keys.overrides.clone()]
    );

    let service = DocsService::new(catalog(), kv, &keys);
    let registry = service.registry();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry[0].items[0].title, "New");
    assert_eq!(registry[1].name, "Playbooks");
    assert_eq!(registry[1].items[0].id.as_str(), "p1");
}

#[test]
fn failed_add_leaves_no_unreachable_copies() {
    let kv = MemoryKvStore::with_limit(40);
    let mut service = DocsService::new(catalog(), kv, &StorageKeys::default());

    for _ in 0..2 {
        let err = service
            .add_document(
                "Engines",
                NewDocument::new("a title well beyond the configured store quota"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            DocsServiceError::Persist(StoreError::QuotaExceeded { .. })
        ));
    }

    let registry = service.registry();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry[0].items.len(), 1);
    assert!(service.added_documents().is_empty());
}
