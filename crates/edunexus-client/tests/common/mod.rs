#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use edunexus_client::{EduStore, FailoverStore, RemoteError, RemoteStore};
use edunexus_db::{LocalStore, MemoryStore};
use edunexus_types::api::{INIT_ENDPOINT, LOGIN_ENDPOINT};

/// In-memory backend that can be switched off and on between calls.
#[derive(Default)]
pub struct FakeRemote {
    down: AtomicBool,
    collections: Mutex<HashMap<String, Vec<Value>>>,
    pub posts: AtomicUsize,
}

impl FakeRemote {
    pub fn up() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn down() -> Arc<Self> {
        let remote = Self::default();
        remote.down.store(true, Ordering::SeqCst);
        Arc::new(remote)
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.down.store(!reachable, Ordering::SeqCst);
    }

    pub fn stored(&self, endpoint: &str) -> Vec<Value> {
        self.collections.lock().unwrap().get(endpoint).cloned().unwrap_or_default()
    }

    fn check(&self, endpoint: &str) -> Result<(), RemoteError> {
        if self.down.load(Ordering::SeqCst) {
            Err(RemoteError::unavailable(endpoint, "connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn get(&self, endpoint: &str) -> Result<Value, RemoteError> {
        self.check(endpoint)?;
        Ok(Value::Array(self.stored(endpoint)))
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<Option<Value>, RemoteError> {
        self.check(endpoint)?;
        self.posts.fetch_add(1, Ordering::SeqCst);

        let mut collections = self.collections.lock().unwrap();
        match endpoint {
            INIT_ENDPOINT => Ok(None),
            LOGIN_ENDPOINT => {
                let users = collections.entry("/users".into()).or_default();
                for user in users.iter_mut() {
                    if user["id"] == body["userId"] {
                        user["lastLogin"] = Value::String(Utc::now().to_rfc3339());
                    }
                }
                Ok(None)
            }
            _ => {
                collections.entry(endpoint.into()).or_default().push(body.clone());
                Ok(Some(body))
            }
        }
    }
}

/// Local store whose medium rejects every write.
pub struct FullDisk;

impl LocalStore for FullDisk {
    fn get_raw(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn put_raw(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Err(anyhow!("storage quota exceeded"))
    }
}

pub fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn store_with(remote: Arc<FakeRemote>, local: Arc<dyn LocalStore>) -> EduStore {
    EduStore::new(FailoverStore::new(remote, local).with_seed_anchor(anchor()))
}

pub fn memory_store(remote: Arc<FakeRemote>) -> (EduStore, Arc<MemoryStore>) {
    let local = Arc::new(MemoryStore::new());
    (store_with(remote, local.clone()), local)
}
