//! JSON-file backed profile store.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use s3profile_core::{Error, ErrorKind, ProfileStore, Result, S3Config, S3Profile};
use tokio::sync::Mutex;

use crate::TRACING_TARGET_STORE;

/// Profile store persisting user-created profiles as a JSON array.
///
/// The snapshot handed out by [`ProfileStore::profiles`] only changes after
/// a successful write.
#[derive(Debug)]
pub struct FileProfileStore {
    path: PathBuf,
    profiles: RwLock<Arc<[S3Profile]>>,
    write_lock: Mutex<()>,
}

impl FileProfileStore {
    /// Loads the store from `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read and a
    /// serialization error if it is not a JSON array of profiles.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let configs: Vec<S3Config> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::from_source(ErrorKind::Serialization, e)
                    .with_message(format!("malformed profiles file {}", path.display()))
            })?,
            Err(e) if e.kind() == IoErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(Error::from_source(ErrorKind::Storage, e)
                    .with_message(format!("cannot read profiles file {}", path.display())));
            }
        };

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            path = %path.display(),
            profiles = configs.len(),
            "Profile store loaded"
        );

        Ok(Self {
            path,
            profiles: RwLock::new(configs.into_iter().map(S3Profile::created_by_user).collect()),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, profiles: &[S3Profile]) -> Result<()> {
        let configs: Vec<&S3Config> = profiles.iter().map(|p| &p.config).collect();
        let json = serde_json::to_vec_pretty(&configs).map_err(|e| {
            Error::from_source(ErrorKind::Serialization, e).with_message("cannot encode profiles")
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        tokio::fs::write(&staging, json).await?;

        if let Err(error) = tokio::fs::rename(&staging, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
                tracing::warn!(
                    target: TRACING_TARGET_STORE,
                    path = %Path::new(&staging).display(),
                    error = %cleanup,
                    "Cannot remove staging file"
                );
            }
            return Err(error.into());
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ProfileStore for FileProfileStore {
    fn profiles(&self) -> Arc<[S3Profile]> {
        self.profiles.read().clone()
    }

    async fn create_or_update_profile(&self, config: S3Config) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let creation_time = config.creation_time;
        let mut next: Vec<S3Profile> = self.profiles().to_vec();
        let created = match next.iter_mut().find(|p| p.id() == creation_time) {
            Some(existing) => {
                existing.config = config;
                false
            }
            None => {
                next.push(S3Profile::created_by_user(config));
                true
            }
        };

        self.persist(&next).await?;
        *self.profiles.write() = next.into();

        tracing::info!(
            target: TRACING_TARGET_STORE,
            path = %self.path.display(),
            creation_time = %creation_time,
            created,
            "Profile written"
        );

        Ok(())
    }
}
