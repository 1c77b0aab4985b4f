use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credentials::errors::ValidationError;
use crate::credentials::models::LoginCommand;
use crate::inbound::http::router::AppState;
use crate::tenant::models::TenantId;
use crate::user::models::EmailAddress;
use crate::user::models::Password;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .credential_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, LoginResponseData { token }))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
    app_id: i32,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ValidationError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let tenant_id = TenantId::new(self.app_id)?;
        Ok(LoginCommand::new(email, password, tenant_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
