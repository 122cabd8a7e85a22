mod fetch_snapshot;
mod list_repositories;
mod remove_repository;

pub use fetch_snapshot::*;
pub use list_repositories::*;
pub use remove_repository::*;
