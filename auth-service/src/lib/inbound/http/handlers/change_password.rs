use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::credentials::errors::ValidationError;
use crate::credentials::models::AccessToken;
use crate::credentials::models::ChangePasswordCommand;
use crate::inbound::http::router::AppState;
use crate::user::models::Password;

pub async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .credential_service
        .change_password(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|success| ApiSuccess::new(StatusCode::OK, SuccessData { success }))
}

#[derive(Clone, Deserialize)]
pub struct ChangePasswordRequest {
    token: String,
    password: String,
}

impl ChangePasswordRequest {
    fn try_into_command(self) -> Result<ChangePasswordCommand, ValidationError> {
        let token = AccessToken::new(self.token)?;
        let password = Password::new(self.password)?;
        Ok(ChangePasswordCommand::new(token, password))
    }
}
