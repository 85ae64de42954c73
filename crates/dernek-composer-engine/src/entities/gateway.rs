use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::field::FieldKey;
use super::record::EntityRecord;
use crate::mention::normalize::fold_turkish;

/// Default maximum number of candidates returned per search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Transport or backend failure during a lookup.
///
/// "Not found" is never an error; gateways return an empty list for it.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup backend unavailable: {0}")]
    Unavailable(String),
    #[error("Lookup failed: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Keyword search over the record store.
///
/// Implementations match case-insensitively on a small set of indexed
/// fields and must tolerate empty results.
pub trait EntityGateway {
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Arc<EntityRecord>>, LookupError>> + Send;
}

#[derive(Debug, Error)]
pub enum MembersError {
    #[error("Failed to read members file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse members file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Deserialize)]
struct MembersFile {
    #[serde(default)]
    member: Vec<EntityRecord>,
}

/// In-memory record store, used by the terminal front end and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    records: Vec<Arc<EntityRecord>>,
}

impl MemoryGateway {
    /// Fields the search matches against.
    pub const INDEXED_FIELDS: [FieldKey; 4] = [
        FieldKey::MemberNo,
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::NationalId,
    ];

    pub fn new(records: impl IntoIterator<Item = EntityRecord>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Loads `[[member]]` tables from a TOML file.
    pub fn load(path: &Path) -> Result<Self, MembersError> {
        let content = std::fs::read_to_string(path).map_err(|source| MembersError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: MembersFile = toml::from_str(&content).map_err(|source| MembersError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded {} members from {}", file.member.len(), path.display());
        Ok(Self::new(file.member))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Synchronous matching used by `search`.
    pub fn find(&self, query: &str, limit: usize) -> Vec<Arc<EntityRecord>> {
        let needle = fold_turkish(query.trim());
        self.records
            .iter()
            .filter(|record| needle.is_empty() || matches_record(record, &needle))
            .take(limit)
            .cloned()
            .collect()
    }
}

fn matches_record(record: &EntityRecord, needle: &str) -> bool {
    MemoryGateway::INDEXED_FIELDS
        .into_iter()
        .filter_map(|key| record.value(key))
        .any(|value| fold_turkish(value).contains(needle))
        || fold_turkish(&record.display_name()).contains(needle)
}

impl EntityGateway for MemoryGateway {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Arc<EntityRecord>>, LookupError> {
        Ok(self.find(query, limit))
    }
}
