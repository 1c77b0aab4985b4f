use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credentials::errors::ValidationError;
use crate::credentials::models::AccessToken;
use crate::credentials::models::Profile;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Json(body): Json<MeRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let token = AccessToken::new(body.token).map_err(ValidationError::from)?;

    state
        .credential_service
        .me(token)
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, (&profile).into()))
}

#[derive(Clone, Deserialize)]
pub struct MeRequest {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub id: String,
    pub email: String,
    pub username: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_password_change: DateTime<Utc>,
}

impl From<&Profile> for ProfileData {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            email: profile.email.as_str().to_string(),
            username: profile.username.as_str().to_string(),
            slug: profile.slug.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
            last_password_change: profile.last_password_change,
        }
    }
}
