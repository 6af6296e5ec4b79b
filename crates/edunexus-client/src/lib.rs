//! Hybrid persistence for EduNexus records.
//!
//! Every operation goes to the backend first and falls back to a durable
//! local store when the backend cannot be reached. The two stores are not
//! synchronized; see [`failover::FailoverStore`] for the exact guarantees.

pub mod accessors;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod failover;
pub mod remote;

use std::sync::Arc;

use edunexus_db::{Database, LocalStore};
use tracing::info;

pub use accessors::{Materials, Messages, Quizzes, Records, Results, StudentProgress, Users};
pub use bootstrap::{BootstrapReport, bootstrap};
pub use config::ClientConfig;
pub use error::{RemoteError, StoreError};
pub use failover::{FailoverStore, Source, Sourced};
pub use remote::{HttpRemote, RemoteStore};

/// Caller-facing handle to all five collections.
#[derive(Clone)]
pub struct EduStore {
    inner: Arc<FailoverStore>,
}

impl EduStore {
    pub fn new(store: FailoverStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Open the local database and point the remote client at the
    /// configured backend. Does not contact the backend.
    pub fn open(config: &ClientConfig) -> anyhow::Result<Self> {
        let local: Arc<dyn LocalStore> = Arc::new(Database::open(&config.data_path)?);
        let remote: Arc<dyn RemoteStore> = Arc::new(HttpRemote::new(config.api_url.clone()));

        info!("EduNexus store using backend {}", config.api_url);
        Ok(Self::new(
            FailoverStore::new(remote, local).with_namespace(config.namespace.clone()),
        ))
    }

    pub async fn bootstrap(&self) -> Result<BootstrapReport, StoreError> {
        bootstrap(&self.inner).await
    }

    pub fn failover(&self) -> &FailoverStore {
        &self.inner
    }

    pub fn users(&self) -> Users<'_> {
        Records::new(&self.inner)
    }

    pub fn quizzes(&self) -> Quizzes<'_> {
        Records::new(&self.inner)
    }

    pub fn results(&self) -> Results<'_> {
        Records::new(&self.inner)
    }

    pub fn materials(&self) -> Materials<'_> {
        Records::new(&self.inner)
    }

    pub fn messages(&self) -> Messages<'_> {
        Records::new(&self.inner)
    }
}
