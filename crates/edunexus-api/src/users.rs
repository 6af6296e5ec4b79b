use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use edunexus_types::User;
use edunexus_types::api::LoginRequest;

use crate::{AppState, blocking, load, save};

/// Stamp a user's last login.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, StatusCode> {
    let now = Utc::now();

    let updated = blocking(&state, move |s| {
        s.exclusive(|db| {
            let mut users = load::<User>(db)?;
            let Some(user) = users.iter_mut().find(|u| u.id == req.user_id) else {
                return Ok(None);
            };
            user.last_login = Some(now);
            let user = user.clone();
            save(db, &users)?;
            Ok(Some(user))
        })
    })
    .await?;

    updated.map(Json).ok_or(StatusCode::NOT_FOUND)
}
