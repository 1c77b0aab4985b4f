use std::sync::Arc;

use tonic::Status;

use crate::credentials::errors::ValidationError;
use crate::credentials::models::RegisterCommand;
use crate::credentials::ports::CredentialServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::user::models::EmailAddress;
use crate::user::models::Password;
use crate::user::models::Username;

pub async fn register(
    service: Arc<dyn CredentialServicePort>,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let command = RegisterCommand::new(
        EmailAddress::new(request.email).map_err(ValidationError::from)?,
        Username::new(request.username).map_err(ValidationError::from)?,
        Password::new(request.password).map_err(ValidationError::from)?,
    );

    let success = service.register(command).await?;
    Ok(RegisterResponse { success })
}
