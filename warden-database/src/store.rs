use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::model::warnings::WarningMap;

/// JSON file holding every subject's warnings.
#[derive(Clone, Debug)]
pub struct WarningStore {
    path: PathBuf,
}

impl WarningStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the mapping from disk.
    ///
    /// A missing file is an empty mapping. A file that exists but does not
    /// parse is reported as [`LedgerError::CorruptState`] and left untouched.
    pub async fn load(&self) -> Result<WarningMap, LedgerError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "warning store not found; starting empty");
                return Ok(WarningMap::new());
            }
            Err(source) => {
                return Err(LedgerError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| LedgerError::CorruptState {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the file with `warnings`.
    ///
    /// The payload goes to a sibling temp file which is synced and then
    /// renamed over the target, so readers see either the old or the new
    /// mapping and never a partial write.
    pub async fn save(&self, warnings: &WarningMap) -> Result<(), LedgerError> {
        let payload = serde_json::to_vec_pretty(warnings)?;
        let temp_path = self.temp_path();

        if let Err(err) = self.replace_with(&temp_path, &payload).await {
            match fs::remove_file(&temp_path).await {
                Err(source) if source.kind() != ErrorKind::NotFound => {
                    warn!(?source, path = %temp_path.display(), "failed to remove temp warning store");
                }
                _ => {}
            }
            return Err(err);
        }

        Ok(())
    }

    async fn replace_with(&self, temp_path: &Path, payload: &[u8]) -> Result<(), LedgerError> {
        let mut file = fs::File::create(temp_path)
            .await
            .map_err(io_error(temp_path))?;
        file.write_all(payload)
            .await
            .map_err(io_error(temp_path))?;
        file.sync_all().await.map_err(io_error(temp_path))?;
        drop(file);

        fs::rename(temp_path, &self.path)
            .await
            .map_err(io_error(&self.path))?;

        // The rename has committed the new mapping.
        let dir = parent_dir(&self.path);
        if let Err(source) = sync_dir(dir).await {
            warn!(?source, dir = %dir.display(), "failed to sync warning store directory");
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "warnings.json".into());
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Flush the directory entry so the rename survives a power loss.
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LedgerError {
    let path = path.to_path_buf();
    move |source| LedgerError::Io { path, source }
}
