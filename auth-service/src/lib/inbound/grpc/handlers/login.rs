use std::sync::Arc;

use tonic::Status;

use crate::credentials::errors::ValidationError;
use crate::credentials::models::LoginCommand;
use crate::credentials::ports::CredentialServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::tenant::models::TenantId;
use crate::user::models::EmailAddress;
use crate::user::models::Password;

pub async fn login(
    service: Arc<dyn CredentialServicePort>,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let command = LoginCommand::new(
        EmailAddress::new(request.email).map_err(ValidationError::from)?,
        Password::new(request.password).map_err(ValidationError::from)?,
        TenantId::new(request.app_id).map_err(ValidationError::from)?,
    );

    let token = service.login(command).await?;
    Ok(LoginResponse { token })
}
