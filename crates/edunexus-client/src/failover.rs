use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, warn};

use edunexus_db::{LocalStore, read_or, write_json};
use edunexus_types::{DEFAULT_NAMESPACE, Record};

use crate::error::{RemoteError, StoreError};
use crate::remote::RemoteStore;

/// Which store answered a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    LocalFallback,
}

/// A collection read together with the store it came from.
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub records: Vec<T>,
    pub source: Source,
}

/// Remote-first access to every collection, with the local store as fallback.
///
/// While the backend answers, it is authoritative and the local store is left
/// untouched. Once a call fails, the same logical operation is applied to the
/// local store instead. The two stores are never reconciled: after a failover
/// they hold different histories, and which one a read sees depends only on
/// whether the backend answered that particular call.
pub struct FailoverStore {
    remote: Arc<dyn RemoteStore>,
    local: Arc<dyn LocalStore>,
    namespace: String,
    seed_anchor: DateTime<Utc>,
}

impl FailoverStore {
    pub fn new(remote: Arc<dyn RemoteStore>, local: Arc<dyn LocalStore>) -> Self {
        Self {
            remote,
            local,
            namespace: DEFAULT_NAMESPACE.to_string(),
            seed_anchor: Utc::now(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Pin the instant seed timestamps are computed from.
    pub fn with_seed_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.seed_anchor = anchor;
        self
    }

    pub fn remote(&self) -> &dyn RemoteStore {
        self.remote.as_ref()
    }

    pub fn key<T: Record>(&self) -> String {
        T::COLLECTION.storage_key(&self.namespace)
    }

    /// Records served for `T` when the local store holds nothing usable.
    pub fn builtin_default<T: Record>(&self) -> Vec<T> {
        T::seed(self.seed_anchor)
    }

    /// Read a whole collection: the backend's copy if it answers, else the
    /// local copy, else the built-in default. Never fails.
    pub async fn read<T: Record>(&self) -> Sourced<T> {
        let collection = T::COLLECTION;

        let sourced = match self.fetch_remote::<T>().await {
            Ok(records) => Sourced {
                records,
                source: Source::Remote,
            },
            Err(e) => {
                warn!("Remote read of {} failed, using local store: {}", collection, e);
                Sourced {
                    records: self.read_local::<T>().await,
                    source: Source::LocalFallback,
                }
            }
        };

        debug!(
            collection = %collection,
            source = ?sourced.source,
            count = sourced.records.len(),
            "collection read"
        );
        sourced
    }

    /// Add `record` to its collection.
    ///
    /// On backend success, returns the backend's canonical copy when it sent
    /// one, else `record`. On failure, merges `record` into the local copy
    /// with [`Record::merge_append`] and returns it.
    pub async fn append<T: Record>(&self, record: T) -> Result<T, StoreError> {
        let collection = T::COLLECTION;

        match self.post_remote::<T>(&record).await {
            Ok(canonical) => {
                debug!(collection = %collection, id = record.id(), "record stored remotely");
                Ok(canonical.unwrap_or(record))
            }
            Err(e) => {
                warn!("Remote write to {} failed, writing locally: {}", collection, e);
                let incoming = record.clone();
                self.apply_local::<T, _>(move |current| Some(T::merge_append(current, incoming)))
                    .await?;
                debug!(collection = %collection, id = record.id(), "record stored locally");
                Ok(record)
            }
        }
    }

    /// Post `body` to `endpoint`; if the backend does not accept it, apply
    /// `mutate` to the local copy of `T` instead. `mutate` returning `None`
    /// means there is nothing to change and nothing is written.
    pub async fn update<T, B, F>(
        &self,
        endpoint: &str,
        body: &B,
        mutate: F,
    ) -> Result<Source, StoreError>
    where
        T: Record,
        B: Serialize + ?Sized,
        F: FnOnce(Vec<T>) -> Option<Vec<T>> + Send + 'static,
    {
        let attempt = match serde_json::to_value(body) {
            Ok(body) => self.remote.post(endpoint, body).await.map(|_| ()),
            Err(e) => Err(RemoteError::malformed(endpoint, e)),
        };

        match attempt {
            Ok(()) => Ok(Source::Remote),
            Err(e) => {
                warn!("Remote update at {} failed, updating locally: {}", endpoint, e);
                self.apply_local::<T, _>(mutate).await?;
                Ok(Source::LocalFallback)
            }
        }
    }

    /// Store the built-in default for `T` locally unless the key already
    /// exists. Returns whether anything was written.
    pub async fn seed_if_absent<T: Record>(&self) -> Result<bool, StoreError> {
        let local = self.local.clone();
        let key = self.key::<T>();
        let seed = self.builtin_default::<T>();

        let task_key = key.clone();
        tokio::task::spawn_blocking(move || {
            match local.contains(&task_key) {
                Ok(true) => return Ok(false),
                Ok(false) => {}
                Err(e) => {
                    // Cannot tell whether data exists; leave it alone.
                    warn!("Could not check local key {}, skipping seed: {:#}", task_key, e);
                    return Ok(false);
                }
            }
            write_json(local.as_ref(), &task_key, &seed)
                .map(|()| true)
                .map_err(|e| StoreError::local_write(&task_key, e))
        })
        .await
        .map_err(|e| StoreError::local_write(&key, e))?
    }

    async fn fetch_remote<T: Record>(&self) -> Result<Vec<T>, RemoteError> {
        let endpoint = T::COLLECTION.endpoint();
        let value = self.remote.get(endpoint).await?;
        serde_json::from_value(value).map_err(|e| RemoteError::malformed(endpoint, e))
    }

    async fn post_remote<T: Record>(&self, record: &T) -> Result<Option<T>, RemoteError> {
        let endpoint = T::COLLECTION.endpoint();
        let body = serde_json::to_value(record).map_err(|e| RemoteError::malformed(endpoint, e))?;

        match self.remote.post(endpoint, body).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| RemoteError::malformed(endpoint, e)),
            None => Ok(None),
        }
    }

    async fn read_local<T: Record>(&self) -> Vec<T> {
        let local = self.local.clone();
        let key = self.key::<T>();
        let default = self.builtin_default::<T>();

        match tokio::task::spawn_blocking(move || read_or(local.as_ref(), &key, default)).await {
            Ok(records) => records,
            Err(e) => {
                error!("Local read task for {} failed: {}", T::COLLECTION, e);
                self.builtin_default::<T>()
            }
        }
    }

    /// Read-modify-write of the local copy of `T`.
    ///
    /// Not atomic across calls: two fallback writes racing on one collection
    /// can lose one of them (last write wins).
    async fn apply_local<T, F>(&self, mutate: F) -> Result<bool, StoreError>
    where
        T: Record,
        F: FnOnce(Vec<T>) -> Option<Vec<T>> + Send + 'static,
    {
        let local = self.local.clone();
        let key = self.key::<T>();
        let default = self.builtin_default::<T>();

        let task_key = key.clone();
        tokio::task::spawn_blocking(move || {
            let current = read_or(local.as_ref(), &task_key, default);
            match mutate(current) {
                Some(updated) => write_json(local.as_ref(), &task_key, &updated)
                    .map(|()| true)
                    .map_err(|e| StoreError::local_write(&task_key, e)),
                None => Ok(false),
            }
        })
        .await
        .map_err(|e| StoreError::local_write(&key, e))?
    }
}
