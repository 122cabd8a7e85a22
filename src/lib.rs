pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    FetchSnapshotUseCase, ListRepositoriesUseCase, RefreshScheduler, RemoveRepositoryUseCase,
    RepoTable, SortOrder, SyncBackend, REFRESH_INTERVAL,
};

pub use cli::{Commands, OutputFormat, SortArg};

pub use connector::{
    demo_snapshot, Container, ContainerConfig, HttpSyncBackend, InMemorySyncBackend, Router,
};

pub use domain::{
    aggregate, ApiReply, ByteTally, Chunk, Completion, DomainError, FileState, FileVersion,
    FileView, RepoView, RepositoryState, Snapshot, StatusLine,
};
