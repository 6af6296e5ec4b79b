use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use edunexus_types::Record;

use crate::{AppState, blocking, load, save};

pub async fn list<T: Record>(State(state): State<AppState>) -> Result<Json<Vec<T>>, StatusCode> {
    let records = blocking(&state, |s| load::<T>(&s.db)).await?;
    Ok(Json(records))
}

/// Append a record. Ids are never reused, so a duplicate id is a conflict.
pub async fn create<T: Record>(
    State(state): State<AppState>,
    Json(record): Json<T>,
) -> Result<impl IntoResponse, StatusCode> {
    let stored = blocking(&state, move |s| {
        s.exclusive(|db| {
            let current = load::<T>(db)?;
            if current.iter().any(|r| r.id() == record.id()) {
                return Ok(None);
            }
            let updated = T::merge_append(current, record.clone());
            save(db, &updated)?;
            Ok(Some(record))
        })
    })
    .await?;

    match stored {
        Some(record) => Ok((StatusCode::CREATED, Json(record))),
        None => {
            warn!("Rejected duplicate id in {}", T::COLLECTION);
            Err(StatusCode::CONFLICT)
        }
    }
}
