use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::credentials::errors::ValidationError;
use crate::credentials::models::ResetPasswordCommand;
use crate::inbound::http::router::AppState;
use crate::user::models::EmailAddress;

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .credential_service
        .reset_password(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|success| ApiSuccess::new(StatusCode::OK, SuccessData { success }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    email: String,
}

impl ResetPasswordRequest {
    fn try_into_command(self) -> Result<ResetPasswordCommand, ValidationError> {
        let email = EmailAddress::new(self.email)?;
        Ok(ResetPasswordCommand::new(email))
    }
}
