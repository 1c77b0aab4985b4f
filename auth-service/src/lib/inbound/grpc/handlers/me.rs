use std::sync::Arc;

use tonic::Status;

use crate::credentials::errors::ValidationError;
use crate::credentials::models::AccessToken;
use crate::credentials::ports::CredentialServicePort;
use crate::proto::MeRequest;
use crate::proto::MeResponse;

pub async fn me(
    service: Arc<dyn CredentialServicePort>,
    request: MeRequest,
) -> Result<MeResponse, Status> {
    let token = AccessToken::new(request.token).map_err(ValidationError::from)?;

    let profile = service.me(token).await?;
    Ok(MeResponse {
        user: Some((&profile).into()),
    })
}
