#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::TokenCodec;
use auth_service::credentials::notification::Notification;
use auth_service::credentials::ports::CredentialServicePort;
use auth_service::credentials::ports::Notifier;
use auth_service::credentials::service::CredentialService;
use auth_service::domain::errors::NotifierError;
use auth_service::domain::errors::RepositoryError;
use auth_service::inbound::http::router::create_router;
use auth_service::tenant::models::Tenant;
use auth_service::tenant::models::TenantId;
use auth_service::tenant::ports::TenantRepository;
use auth_service::user::models::EmailAddress;
use auth_service::user::models::NewUser;
use auth_service::user::models::User;
use auth_service::user::models::UserId;
use auth_service::user::models::Username;
use auth_service::user::ports::UserRepository;
use tokio::sync::mpsc;

pub const TENANT_ONE_SECRET: &[u8] = b"s1";
pub const TENANT_TWO_SECRET: &[u8] = b"s2";
/// Registered but without a signing secret.
pub const SECRETLESS_TENANT: i32 = 3;

pub const TOKEN_TTL_MINUTES: i64 = 15;

/// In-memory user store enforcing the same unique constraints as the database.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn stored_hash(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email.as_str() == email)
            .map(|user| user.password_hash.clone())
    }

    pub fn remove(&self, id: UserId) {
        self.users.lock().unwrap().retain(|user| user.id != id);
    }

    fn conflict(users: &[User], skip: Option<UserId>, username: &Username) -> Option<String> {
        let others = || users.iter().filter(move |user| Some(user.id) != skip);
        if others().any(|user| user.username == *username) {
            return Some("users_username_key".to_string());
        }
        if others().any(|user| user.slug == username.slug()) {
            return Some("users_slug_key".to_string());
        }
        None
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::UniqueViolation(
                "users_email_key".to_string(),
            ));
        }
        if let Some(constraint) = Self::conflict(&users, None, &user.username) {
            return Err(RepositoryError::UniqueViolation(constraint));
        }

        let id = users.iter().map(|user| user.id.0).max().unwrap_or(0) + 1;
        let user = user.into_user(UserId(id));
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.email == *email).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.username == *username).cloned())
    }

    async fn patch_username(
        &self,
        user: &User,
        username: &Username,
    ) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();

        if let Some(constraint) = Self::conflict(&users, Some(user.id), username) {
            return Err(RepositoryError::UniqueViolation(constraint));
        }

        let stored = users
            .iter_mut()
            .find(|stored| stored.id == user.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user.id)))?;
        stored.username = username.clone();
        stored.slug = username.slug();
        stored.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn patch_password(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();

        let stored = users
            .iter_mut()
            .find(|stored| stored.id == user.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user.id)))?;
        let now = chrono::Utc::now();
        stored.password_hash = password_hash.to_string();
        stored.updated_at = now;
        stored.last_password_change = now;
        Ok(())
    }
}

pub struct InMemoryTenantRepository {
    tenants: HashMap<i32, Tenant>,
}

impl InMemoryTenantRepository {
    /// Tenant 1 signs with "s1", tenant 2 with "s2", tenant 3 has no secret.
    pub fn seeded() -> Self {
        let tenants = [
            (1, TENANT_ONE_SECRET),
            (2, TENANT_TWO_SECRET),
            (SECRETLESS_TENANT, b"".as_slice()),
        ]
        .into_iter()
        .map(|(id, secret)| {
            let tenant = Tenant {
                id: TenantId::new(id).unwrap(),
                name: format!("app-{id}"),
                secret: secret.to_vec(),
            };
            (id, tenant)
        })
        .collect();

        Self { tenants }
    }
}

#[async_trait]
impl TenantRepository for InMemoryTenantRepository {
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        Ok(self.tenants.get(&id.value()).cloned())
    }
}

/// Forwards every notification to a channel the test can read from.
pub struct RecordingNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn enqueue(&self, notification: Notification) -> Result<(), NotifierError> {
        self.sender
            .send(notification)
            .map_err(|e| NotifierError::PublishFailed(e.to_string()))
    }
}

/// Notifier whose broker is always down.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn enqueue(&self, _notification: Notification) -> Result<(), NotifierError> {
        Err(NotifierError::ConnectionFailed("broker unreachable".to_string()))
    }
}

pub type TestService =
    CredentialService<InMemoryUserRepository, InMemoryTenantRepository, RecordingNotifier>;

/// Service wired to in-memory stores, plus handles to inspect them.
pub struct TestContext {
    pub service: Arc<TestService>,
    pub users: Arc<InMemoryUserRepository>,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let (notifier, notifications) = RecordingNotifier::new();

        let service = Arc::new(CredentialService::new(
            Arc::clone(&users),
            Arc::new(InMemoryTenantRepository::seeded()),
            Arc::new(notifier),
            Arc::new(Authenticator::new()),
            chrono::Duration::minutes(TOKEN_TTL_MINUTES),
        ));

        Self {
            service,
            users,
            notifications,
        }
    }

    /// Wait for the next dispatched notification.
    pub async fn next_notification(&mut self) -> Notification {
        tokio::time::timeout(Duration::from_secs(5), self.notifications.recv())
            .await
            .expect("No notification was dispatched")
            .expect("Notification channel closed")
    }
}

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub context: TestContext,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let context = TestContext::new();
        let service: Arc<dyn CredentialServicePort> = context.service.clone();
        Self::serve(service, context).await
    }

    /// Spawn the application with a notifier that always fails.
    pub async fn spawn_with_failing_notifier() -> Self {
        let context = TestContext::new();
        let service: Arc<dyn CredentialServicePort> = Arc::new(CredentialService::new(
            Arc::clone(&context.users),
            Arc::new(InMemoryTenantRepository::seeded()),
            Arc::new(FailingNotifier),
            Arc::new(Authenticator::new()),
            chrono::Duration::minutes(TOKEN_TTL_MINUTES),
        ));
        Self::serve(service, context).await
    }

    async fn serve(service: Arc<dyn CredentialServicePort>, context: TestContext) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(service, Duration::from_secs(10));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            context,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}

/// Sign a token outside the service, e.g. one that is already expired.
pub fn token_for(user_id: i64, app_id: i32, secret: &[u8], ttl: chrono::Duration) -> String {
    let claims = Claims::for_user(user_id, "someone", app_id, ttl);
    TokenCodec::new()
        .issue(&claims, secret)
        .expect("Failed to issue token")
}
