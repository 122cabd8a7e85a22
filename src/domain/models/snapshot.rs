use serde::{Deserialize, Serialize};

use super::lenient::{self, Keyed};
use super::STATE_ENDPOINT;
use crate::domain::DomainError;

/// Status tag the backend uses for a successful request.
pub const STATUS_OK: &str = "ok";

/// One content chunk of a file version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(default, deserialize_with = "lenient::length")]
    length: u64,
    #[serde(default, deserialize_with = "lenient::flag")]
    saved: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    hash_type: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    hash: Option<String>,
}

impl Chunk {
    pub fn new(length: u64, saved: bool) -> Self {
        Self {
            length,
            saved,
            hash_type: None,
            hash: None,
        }
    }

    pub fn saved(length: u64) -> Self {
        Self::new(length, true)
    }

    pub fn pending(length: u64) -> Self {
        Self::new(length, false)
    }

    pub fn with_hash(mut self, hash_type: impl Into<String>, hash: impl Into<String>) -> Self {
        self.hash_type = Some(hash_type.into());
        self.hash = Some(hash.into());
        self
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    #[serde(default, deserialize_with = "lenient::seq")]
    chunks: Vec<Chunk>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_timestamp"
    )]
    timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    deleted: bool,
}

impl FileVersion {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks,
            timestamp: None,
            deleted: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunks_mut(&mut self) -> &mut [Chunk] {
        &mut self.chunks
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileState {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    path: Option<String>,
    /// Oldest first; only the last entry describes the file as it is now.
    #[serde(default, deserialize_with = "lenient::seq")]
    versions: Vec<FileVersion>,
}

impl FileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            versions: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: FileVersion) -> Self {
        self.versions.push(version);
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn versions(&self) -> &[FileVersion] {
        &self.versions
    }

    pub fn latest_version(&self) -> Option<&FileVersion> {
        self.versions.last()
    }

    pub fn latest_version_mut(&mut self) -> Option<&mut FileVersion> {
        self.versions.last_mut()
    }
}

impl Keyed for FileState {
    fn adopt_key(&mut self, key: &str) {
        if self.path.is_none() {
            self.path = Some(key.to_string());
        }
    }
}

/// A tracked repository as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    #[serde(default, deserialize_with = "lenient::string")]
    uuid: String,
    #[serde(default, deserialize_with = "lenient::string")]
    name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    kind: String,
    #[serde(default, deserialize_with = "lenient::string")]
    root: String,
    #[serde(default, deserialize_with = "lenient::keyed_seq")]
    files: Vec<FileState>,
}

impl RepositoryState {
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            kind: kind.into(),
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: FileState) -> Self {
        self.files.push(file);
        self
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn files(&self) -> &[FileState] {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut [FileState] {
        &mut self.files
    }
}

impl Keyed for RepositoryState {
    fn adopt_key(&mut self, key: &str) {
        if self.uuid.is_empty() {
            self.uuid = key.to_string();
        }
    }
}

/// One full point-in-time answer of the `state` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    status: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient::keyed_seq")]
    repos: Vec<RepositoryState>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    status: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_keyed_seq")]
    repos: Option<Vec<RepositoryState>>,
}

impl Snapshot {
    pub fn new(repos: Vec<RepositoryState>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            message: None,
            repos,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Decodes a `state` response body.
    ///
    /// A body that is not an object with a `status`, a non-`ok` status, and an `ok`
    /// answer without `repos` are all fetch errors. Malformed entities inside an
    /// otherwise valid body are tolerated.
    pub fn decode(body: &str) -> Result<Self, DomainError> {
        let raw: RawSnapshot = serde_json::from_str(body)
            .map_err(|e| DomainError::fetch(format!("failed to decode state response: {e}")))?;

        if raw.status != STATUS_OK {
            return Err(DomainError::rejected(
                STATE_ENDPOINT,
                raw.status,
                raw.message,
            ));
        }

        let repos = raw
            .repos
            .ok_or_else(|| DomainError::fetch("state response has no repos"))?;

        Ok(Self {
            status: raw.status,
            message: raw.message,
            repos,
        })
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn repos(&self) -> &[RepositoryState] {
        &self.repos
    }

    pub fn repos_mut(&mut self) -> &mut Vec<RepositoryState> {
        &mut self.repos
    }

    pub fn find(&self, uuid: &str) -> Option<&RepositoryState> {
        self.repos.iter().find(|r| r.uuid == uuid)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
