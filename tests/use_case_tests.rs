//! End-to-end tests of the use cases and the command router over the in-memory backend.

use std::sync::Arc;

use chunkwatch::{
    demo_snapshot, Chunk, Commands, Completion, Container, DomainError, FetchSnapshotUseCase,
    FileState, FileVersion, InMemorySyncBackend, ListRepositoriesUseCase, OutputFormat,
    RemoveRepositoryUseCase, RepositoryState, Router, Snapshot, SortArg, SortOrder, SyncBackend,
};

fn tracked() -> Snapshot {
    Snapshot::new(vec![
        RepositoryState::new("r1", "photos", "share", "/srv/photos").with_file(
            FileState::named("a.jpg")
                .with_version(FileVersion::new(vec![Chunk::saved(100)]))
                .with_version(FileVersion::new(vec![Chunk::saved(25), Chunk::pending(75)])),
        ),
        RepositoryState::new("r2", "archive", "static", "/srv/archive").with_file(
            FileState::named("b.tar").with_version(FileVersion::new(vec![Chunk::saved(10)])),
        ),
        RepositoryState::new("r3", "new", "share", "/srv/new"),
    ])
}

fn setup() -> (Arc<InMemorySyncBackend>, Container) {
    let backend = Arc::new(InMemorySyncBackend::new(tracked()));
    let container = Container::with_backend(backend.clone());
    (backend, container)
}

#[tokio::test]
async fn test_list_uses_latest_versions() {
    let (backend, _) = setup();
    let use_case = ListRepositoriesUseCase::new(backend);

    let views = use_case.execute(SortOrder::Snapshot).await.unwrap();

    let summary: Vec<(&str, Completion)> = views
        .iter()
        .map(|v| (v.id.as_str(), v.completion))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("r1", Completion::Percent(25)),
            ("r2", Completion::Percent(100)),
            ("r3", Completion::NoData),
        ]
    );
}

#[tokio::test]
async fn test_list_sorted_by_name() {
    let (backend, _) = setup();
    let use_case = ListRepositoriesUseCase::new(backend);

    let views = use_case.execute(SortOrder::Name).await.unwrap();

    let names: Vec<&str> = views.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["archive", "new", "photos"]);
}

#[tokio::test]
async fn test_get_by_id() {
    let (backend, _) = setup();
    let use_case = ListRepositoriesUseCase::new(backend);

    let view = use_case.get_by_id("r2").await.unwrap().expect("r2 exists");
    assert_eq!(view.files_complete, 1);
    assert!(use_case.get_by_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_removal_shows_up_on_next_fetch() {
    let (backend, _) = setup();
    let fetch = FetchSnapshotUseCase::new(backend.clone());
    let remove = RemoveRepositoryUseCase::new(backend.clone());

    let before = fetch.execute().await.unwrap();
    let reply = remove.execute("r1").await.unwrap();
    let after = fetch.execute().await.unwrap();

    assert_eq!(reply.message(), Some("Removed photos"));
    assert!(before.find("r1").is_some());
    assert!(after.find("r1").is_none());
    assert_eq!(after.repos().len(), 2);
}

#[tokio::test]
async fn test_remove_rejects_empty_id() {
    let (backend, _) = setup();
    let remove = RemoveRepositoryUseCase::new(backend.clone());

    let err = remove.execute("").await.unwrap_err();

    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert_eq!(backend.current_state().await.repos().len(), 3);
}

#[tokio::test]
async fn test_remove_passes_id_verbatim() {
    let backend = Arc::new(InMemorySyncBackend::new(Snapshot::new(vec![
        RepositoryState::new(" r1 ", "padded", "share", "/srv/padded"),
        RepositoryState::new("r1", "plain", "share", "/srv/plain"),
    ])));
    let remove = RemoveRepositoryUseCase::new(backend.clone());

    let reply = remove.execute(" r1 ").await.unwrap();

    assert_eq!(reply.message(), Some("Removed padded"));
    let remaining = backend.current_state().await;
    assert!(remaining.find(" r1 ").is_none());
    assert!(remaining.find("r1").is_some());

    let err = remove.execute("   ").await.unwrap_err();
    assert!(err.is_remove_error());
}

#[tokio::test]
async fn test_fetch_failure_is_reported() {
    let (backend, _) = setup();
    backend.fail_fetches(Some("connection refused")).await;

    let err = FetchSnapshotUseCase::new(backend.clone())
        .execute()
        .await
        .unwrap_err();
    assert!(err.is_fetch_error());

    backend.fail_fetches(None).await;
    assert!(FetchSnapshotUseCase::new(backend).execute().await.is_ok());
}

#[tokio::test]
async fn test_router_text_listing() {
    let (_, container) = setup();

    let output = Router::new(&container)
        .route(Commands::List {
            format: OutputFormat::Text,
            sort: SortArg::Snapshot,
        })
        .await
        .unwrap();

    assert!(output.starts_with("Tracked repositories:"));
    assert!(output.contains("photos (share)"));
    assert!(output.contains("Id:       r1"));
    assert!(output.contains("Progress: 25%"));
    assert!(output.contains("Progress: no data"));
    assert!(output.contains("Files:    0/1 complete"));
}

#[tokio::test]
async fn test_router_empty_listing() {
    let container = Container::with_backend(Arc::new(InMemorySyncBackend::default()));

    let output = Router::new(&container)
        .route(Commands::List {
            format: OutputFormat::Text,
            sort: SortArg::Snapshot,
        })
        .await
        .unwrap();

    assert_eq!(output, "No repositories tracked.");
}

#[tokio::test]
async fn test_router_remove() {
    let (backend, container) = setup();
    let router = Router::new(&container);

    let output = router
        .route(Commands::Remove {
            uuid: "r2".to_string(),
        })
        .await
        .unwrap();
    assert!(output.starts_with("remove: ok (Removed archive)"));
    assert!(backend.current_state().await.find("r2").is_none());

    let err = router
        .route(Commands::Remove {
            uuid: "r2".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "remove: error (Can't find that repo)");
}

#[tokio::test]
async fn test_demo_backend_makes_progress() {
    let backend = InMemorySyncBackend::new(demo_snapshot(7)).with_progress(7);

    let first = chunkwatch::aggregate(&backend.fetch_state().await.unwrap());
    for _ in 0..19 {
        backend.fetch_state().await.unwrap();
    }
    let later = chunkwatch::aggregate(&backend.fetch_state().await.unwrap());

    let done = |views: &[chunkwatch::RepoView]| views.iter().map(|v| v.done_bytes).sum::<u64>();
    assert!(done(&later) >= done(&first));
    assert_eq!(backend.describe(), "in-memory");
}
