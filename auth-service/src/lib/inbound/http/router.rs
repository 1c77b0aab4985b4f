use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password;
use super::handlers::change_username;
use super::handlers::login;
use super::handlers::me;
use super::handlers::register;
use super::handlers::reset_password;
use crate::credentials::ports::CredentialServicePort;

#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<dyn CredentialServicePort>,
}

/// Build the HTTP surface over a credential service.
///
/// Requests running past `request_timeout` are answered with 408 and their
/// in-flight work is dropped.
pub fn create_router(
    credential_service: Arc<dyn CredentialServicePort>,
    request_timeout: Duration,
) -> Router {
    let state = AppState { credential_service };

    // Bodies carry passwords and tokens, so only the request line is traced.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/change-username", post(change_username))
        .route("/api/auth/change-password", post(change_password))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/auth/me", post(me))
        .layer(
            // Outermost first. CORS needs a plain response body underneath it.
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::credentials::errors::CredentialError;
    use crate::credentials::models::AccessToken;
    use crate::credentials::models::ChangePasswordCommand;
    use crate::credentials::models::ChangeUsernameCommand;
    use crate::credentials::models::LoginCommand;
    use crate::credentials::models::Profile;
    use crate::credentials::models::RegisterCommand;
    use crate::credentials::models::ResetPasswordCommand;

    /// Answers `me` only after a long delay; everything else fails fast.
    struct SlowService;

    #[async_trait]
    impl CredentialServicePort for SlowService {
        async fn register(&self, _command: RegisterCommand) -> Result<bool, CredentialError> {
            Err(CredentialError::Internal("unused".to_string()))
        }

        async fn login(&self, _command: LoginCommand) -> Result<String, CredentialError> {
            Err(CredentialError::InvalidCredentials)
        }

        async fn change_username(
            &self,
            _command: ChangeUsernameCommand,
        ) -> Result<bool, CredentialError> {
            Err(CredentialError::Internal("unused".to_string()))
        }

        async fn change_password(
            &self,
            _command: ChangePasswordCommand,
        ) -> Result<bool, CredentialError> {
            Err(CredentialError::Internal("unused".to_string()))
        }

        async fn reset_password(
            &self,
            _command: ResetPasswordCommand,
        ) -> Result<bool, CredentialError> {
            Err(CredentialError::Internal("unused".to_string()))
        }

        async fn me(&self, _token: AccessToken) -> Result<Profile, CredentialError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Err(CredentialError::Internal("unused".to_string()))
        }
    }

    fn router() -> Router {
        create_router(Arc::new(SlowService), Duration::from_millis(50))
    }

    fn post_json(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "http://client.example")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let response = router()
            .oneshot(post_json("/api/auth/me", r#"{"token":"a.b.c"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_cross_origin_response_is_allowed() {
        let response = router()
            .oneshot(post_json(
                "/api/auth/login",
                r#"{"email":"bob@example.com","password":"secret123","app_id":1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_preflight_is_answered_without_the_service() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/auth/me")
            .header(header::ORIGIN, "http://client.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }
}
