//! Data Provider - the persisted credential fixture
//!
//! The fixture is a two-column UTF-8 table (`username,password`) holding
//! the credential records a run is parameterized over. It is rewritten
//! deterministically at the start of every run so reruns never pick up
//! stale or drifted state; the write is destructive on purpose.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Header row every fixture must carry.
pub const FIXTURE_HEADER: &str = "username,password";

const CANONICAL_IDENTIFIER: &str = "jane smith";
const CANONICAL_SECRET: &str = "jane123";

// Staging names carry the process id plus this counter, so writers that
// regenerate the same fixture concurrently never share a staging file.
static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// One (identifier, secret) pair exercising the signup flow.
///
/// Identifiers are non-empty; duplicates across records are valid and
/// deliberately exercise the backend's already-exists rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub identifier: String,
    pub secret: String,
}

impl CredentialRecord {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

/// Owns the fixture file: deterministic regeneration plus parsing.
#[derive(Debug, Clone)]
pub struct DataProvider {
    path: PathBuf,
}

impl DataProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Fixture location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deterministically (re)writes the fixture and returns its path.
    ///
    /// Creates the containing directory if absent, then replaces the file
    /// with the canonical header-plus-one-row content. The content is
    /// staged in a uniquely named sibling temp file and renamed into
    /// place, so a reader in a concurrently sharded run observes either
    /// the previous or the new fixture, never a torn one, and simultaneous
    /// writers never collide on the staging file. Runs once per suite, in
    /// the setup phase - never per test case.
    pub async fn ensure_fixture(&self) -> Result<&Path> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| Error::Fixture {
                        path: self.path.clone(),
                        source,
                    })?;
            }
        }

        let staged = self.staging_path()?;
        tokio::fs::write(&staged, canonical_content())
            .await
            .map_err(|source| Error::Fixture {
                path: self.path.clone(),
                source,
            })?;
        tokio::fs::rename(&staged, &self.path)
            .await
            .map_err(|source| Error::Fixture {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), "fixture rewritten");
        Ok(&self.path)
    }

    /// Regenerates the fixture, then parses it back into records.
    ///
    /// Any failure here is fatal to the whole suite: without a readable
    /// fixture there are no valid inputs.
    pub async fn load_records(&self) -> Result<Vec<CredentialRecord>> {
        self.ensure_fixture().await?;

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::Fixture {
                path: self.path.clone(),
                source,
            })?;
        let records = parse_records(&self.path, &raw)?;

        tracing::info!(
            count = records.len(),
            path = %self.path.display(),
            "loaded signup records"
        );
        Ok(records)
    }

    fn staging_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::Config(format!(
                    "fixture path '{}' has no usable file name",
                    self.path.display()
                ))
            })?;
        let sequence = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        Ok(self.path.with_file_name(format!(
            "{file_name}.{}.{sequence}.tmp",
            std::process::id()
        )))
    }
}

fn canonical_content() -> String {
    format!("{FIXTURE_HEADER}\n{CANONICAL_IDENTIFIER},{CANONICAL_SECRET}\n")
}

fn parse_records(path: &Path, raw: &str) -> Result<Vec<CredentialRecord>> {
    let malformed = |reason: String| Error::FixtureFormat {
        path: path.to_path_buf(),
        reason,
    };

    let mut lines = raw.lines().map(|line| line.trim_end_matches('\r'));

    let header = lines
        .next()
        .ok_or_else(|| malformed("file is empty".to_string()))?;
    if header != FIXTURE_HEADER {
        return Err(malformed(format!(
            "expected header '{FIXTURE_HEADER}', found '{header}'"
        )));
    }

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        // First comma splits the columns; secrets may contain commas.
        let (identifier, secret) = line.split_once(',').ok_or_else(|| {
            malformed(format!("row {} is not a two-column record", index + 1))
        })?;
        if identifier.is_empty() {
            return Err(malformed(format!("row {} has an empty identifier", index + 1)));
        }
        records.push(CredentialRecord::new(identifier, secret));
    }

    Ok(records)
}
