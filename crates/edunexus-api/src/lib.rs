//! Reference backend serving the EduNexus collection endpoints.

pub mod init;
pub mod records;
pub mod users;

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use edunexus_db::{Database, LocalStore, write_json};
use edunexus_types::{DEFAULT_NAMESPACE, Message, Quiz, QuizResult, Record, StudyMaterial, User};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Serializes read-modify-write cycles on collections.
    writes: Mutex<()>,
}

impl AppStateInner {
    pub fn new(db: Database) -> AppState {
        Arc::new(Self {
            db,
            writes: Mutex::new(()),
        })
    }

    /// Run `f` while holding the write lock.
    pub fn exclusive<R>(&self, f: impl FnOnce(&Database) -> Result<R>) -> Result<R> {
        let _guard = self
            .writes
            .lock()
            .map_err(|e| anyhow::anyhow!("Write lock poisoned: {}", e))?;
        f(&self.db)
    }
}

/// Storage key for `T` on the server side.
pub fn key<T: Record>() -> String {
    T::COLLECTION.storage_key(DEFAULT_NAMESPACE)
}

/// Strict load: unlike the client fallback, a corrupt collection is an error
/// here so a following write cannot silently replace it.
pub fn load<T: Record>(db: &Database) -> Result<Vec<T>> {
    match db.get_raw(&key::<T>())? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

pub fn save<T: Record>(db: &Database, records: &[T]) -> Result<()> {
    write_json(db, &key::<T>(), records)
}

/// Run a blocking DB job off the async runtime.
pub(crate) async fn blocking<F, R>(state: &AppState, f: F) -> Result<R, StatusCode>
where
    F: FnOnce(&AppStateInner) -> Result<R> + Send + 'static,
    R: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB error: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", get(records::list::<User>).post(records::create::<User>))
        .route("/users/login", post(users::login))
        .route("/quizzes", get(records::list::<Quiz>).post(records::create::<Quiz>))
        .route("/results", get(records::list::<QuizResult>).post(records::create::<QuizResult>))
        .route(
            "/materials",
            get(records::list::<StudyMaterial>).post(records::create::<StudyMaterial>),
        )
        .route("/messages", get(records::list::<Message>).post(records::create::<Message>))
        .route("/init", post(init::init))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
