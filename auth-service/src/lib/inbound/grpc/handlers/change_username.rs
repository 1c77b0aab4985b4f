use std::sync::Arc;

use tonic::Status;

use crate::credentials::errors::ValidationError;
use crate::credentials::models::AccessToken;
use crate::credentials::models::ChangeUsernameCommand;
use crate::credentials::ports::CredentialServicePort;
use crate::proto::ChangeUsernameRequest;
use crate::proto::ChangeUsernameResponse;
use crate::user::models::Username;

pub async fn change_username(
    service: Arc<dyn CredentialServicePort>,
    request: ChangeUsernameRequest,
) -> Result<ChangeUsernameResponse, Status> {
    let command = ChangeUsernameCommand::new(
        AccessToken::new(request.token).map_err(ValidationError::from)?,
        Username::new(request.username).map_err(ValidationError::from)?,
    );

    let success = service.change_username(command).await?;
    Ok(ChangeUsernameResponse { success })
}
