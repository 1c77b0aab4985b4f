use std::sync::Arc;

use tonic::Status;

use crate::credentials::errors::ValidationError;
use crate::credentials::models::AccessToken;
use crate::credentials::models::ChangePasswordCommand;
use crate::credentials::ports::CredentialServicePort;
use crate::proto::ChangePasswordRequest;
use crate::proto::ChangePasswordResponse;
use crate::user::models::Password;

pub async fn change_password(
    service: Arc<dyn CredentialServicePort>,
    request: ChangePasswordRequest,
) -> Result<ChangePasswordResponse, Status> {
    let command = ChangePasswordCommand::new(
        AccessToken::new(request.token).map_err(ValidationError::from)?,
        Password::new(request.new_password).map_err(ValidationError::from)?,
    );

    let success = service.change_password(command).await?;
    Ok(ChangePasswordResponse { success })
}
