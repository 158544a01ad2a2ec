//! Screenshot artifact naming and persistence
//!
//! Artifact names are a pure function of the credential identifier so
//! reruns land on the same file and overwrite it (no versioning).

use std::path::{Path, PathBuf};

use crate::error::Result;

const ARTIFACT_PREFIX: &str = "signup_";
const ARTIFACT_EXT: &str = "png";

/// File name for the screenshot of one case, derived only from the
/// identifier: `signup_<identifier>.png` with whitespace and path
/// separators mapped to underscores.
pub fn artifact_file_name(identifier: &str) -> String {
    format!("{ARTIFACT_PREFIX}{}.{ARTIFACT_EXT}", sanitize(identifier))
}

/// Full artifact path inside the output directory.
pub fn artifact_path(dir: &Path, identifier: &str) -> PathBuf {
    dir.join(artifact_file_name(identifier))
}

/// Writes `bytes` as the case's screenshot, creating the output directory
/// if absent and overwriting any previous capture for the identifier.
pub async fn save_screenshot(dir: &Path, identifier: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = artifact_path(dir, identifier);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

fn sanitize(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}
