use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::credentials::errors::ValidationError;
use crate::credentials::models::AccessToken;
use crate::credentials::models::ChangeUsernameCommand;
use crate::inbound::http::router::AppState;
use crate::user::models::Username;

pub async fn change_username(
    State(state): State<AppState>,
    Json(body): Json<ChangeUsernameRequest>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .credential_service
        .change_username(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|success| ApiSuccess::new(StatusCode::OK, SuccessData { success }))
}

#[derive(Clone, Deserialize)]
pub struct ChangeUsernameRequest {
    token: String,
    username: String,
}

impl ChangeUsernameRequest {
    fn try_into_command(self) -> Result<ChangeUsernameCommand, ValidationError> {
        let token = AccessToken::new(self.token)?;
        let username = Username::new(self.username)?;
        Ok(ChangeUsernameCommand::new(token, username))
    }
}
