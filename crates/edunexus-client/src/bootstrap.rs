use serde_json::Value;
use tracing::{info, warn};

use edunexus_types::api::INIT_ENDPOINT;
use edunexus_types::{Collection, Quiz, User};

use crate::error::StoreError;
use crate::failover::FailoverStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// The backend accepted the init call.
    pub remote_initialized: bool,
    /// Collections that received seed data locally on this run.
    pub seeded: Vec<Collection>,
}

/// Ask the backend to initialize itself, then make sure the local store has
/// demo users and quizzes. Existing local data is never overwritten, so this
/// is safe to run on every start.
pub async fn bootstrap(store: &FailoverStore) -> Result<BootstrapReport, StoreError> {
    let mut report = BootstrapReport::default();

    match store.remote().post(INIT_ENDPOINT, Value::Null).await {
        Ok(_) => {
            info!("Backend initialized");
            report.remote_initialized = true;
        }
        Err(e) => warn!("Backend init failed, continuing with local store: {}", e),
    }

    if store.seed_if_absent::<User>().await? {
        report.seeded.push(Collection::Users);
    }
    if store.seed_if_absent::<Quiz>().await? {
        report.seeded.push(Collection::Quizzes);
    }

    if !report.seeded.is_empty() {
        info!("Seeded local collections: {:?}", report.seeded);
    }
    Ok(report)
}
