use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use edunexus_db::LocalStore;
use edunexus_types::{Quiz, Record, User};

use crate::{AppState, blocking, key, save};

#[derive(Debug, Serialize)]
pub struct InitResponse {
    pub seeded: Vec<String>,
}

/// Seed demo users and quizzes into collections that do not exist yet.
pub async fn init(State(state): State<AppState>) -> Result<Json<InitResponse>, StatusCode> {
    let seeded = blocking(&state, |s| {
        s.exclusive(|db| {
            let anchor = Utc::now();
            let mut seeded = Vec::new();
            if !db.contains(&key::<User>())? {
                save(db, &User::seed(anchor))?;
                seeded.push(User::COLLECTION.name().to_string());
            }
            if !db.contains(&key::<Quiz>())? {
                save(db, &Quiz::seed(anchor))?;
                seeded.push(Quiz::COLLECTION.name().to_string());
            }
            Ok(seeded)
        })
    })
    .await?;

    if !seeded.is_empty() {
        info!("Seeded backend collections: {:?}", seeded);
    }
    Ok(Json(InitResponse { seeded }))
}
