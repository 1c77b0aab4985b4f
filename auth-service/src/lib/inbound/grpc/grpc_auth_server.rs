use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::change_password;
use super::handlers::change_username;
use super::handlers::login;
use super::handlers::me;
use super::handlers::register;
use super::handlers::reset_password;
use crate::credentials::ports::CredentialServicePort;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::ChangePasswordRequest;
use crate::proto::ChangePasswordResponse;
use crate::proto::ChangeUsernameRequest;
use crate::proto::ChangeUsernameResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::MeRequest;
use crate::proto::MeResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::proto::ResetPasswordRequest;
use crate::proto::ResetPasswordResponse;

/// gRPC surface over the same credential service as the HTTP router.
pub struct AuthGrpcService {
    service: Arc<dyn CredentialServicePort>,
}

impl AuthGrpcService {
    pub fn new(service: Arc<dyn CredentialServicePort>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn change_username(
        &self,
        request: Request<ChangeUsernameRequest>,
    ) -> Result<Response<ChangeUsernameResponse>, Status> {
        let response =
            change_username::change_username(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn change_password(
        &self,
        request: Request<ChangePasswordRequest>,
    ) -> Result<Response<ChangePasswordResponse>, Status> {
        let response =
            change_password::change_password(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn reset_password(
        &self,
        request: Request<ResetPasswordRequest>,
    ) -> Result<Response<ResetPasswordResponse>, Status> {
        let response =
            reset_password::reset_password(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn me(&self, request: Request<MeRequest>) -> Result<Response<MeResponse>, Status> {
        let response = me::me(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
