use std::sync::Arc;

use tonic::Status;

use crate::credentials::errors::ValidationError;
use crate::credentials::models::ResetPasswordCommand;
use crate::credentials::ports::CredentialServicePort;
use crate::proto::ResetPasswordRequest;
use crate::proto::ResetPasswordResponse;
use crate::user::models::EmailAddress;

pub async fn reset_password(
    service: Arc<dyn CredentialServicePort>,
    request: ResetPasswordRequest,
) -> Result<ResetPasswordResponse, Status> {
    let email = EmailAddress::new(request.email).map_err(ValidationError::from)?;

    let success = service
        .reset_password(ResetPasswordCommand::new(email))
        .await?;
    Ok(ResetPasswordResponse { success })
}
