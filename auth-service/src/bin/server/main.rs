use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::credentials::ports::CredentialServicePort;
use auth_service::credentials::service::CredentialService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::notifications::KafkaNotifier;
use auth_service::outbound::repositories::PostgresTenantRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::proto::auth_service_server::AuthServiceServer;
use sqlx::postgres::PgPoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        request_timeout_secs = config.server.request_timeout_secs,
        token_ttl_minutes = config.token.ttl_minutes,
        kafka_brokers = %config.kafka.brokers,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let tenant_repository = Arc::new(PostgresTenantRepository::new(pg_pool));
    let notifier = Arc::new(KafkaNotifier::new(&config.kafka)?);

    let credential_service: Arc<dyn CredentialServicePort> = Arc::new(CredentialService::new(
        user_repository,
        tenant_repository,
        notifier,
        Arc::new(Authenticator::new()),
        config.token.ttl(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        Arc::clone(&credential_service),
        config.server.request_timeout(),
    );
    let http_server =
        tokio::spawn(async move { axum::serve(http_listener, http_application).await });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(credential_service);
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let request_timeout = config.server.request_timeout();
    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .timeout(request_timeout)
            .add_service(AuthServiceServer::new(grpc_service))
            .serve(grpc_address)
            .await
    });

    match tokio::try_join!(http_server, grpc_server) {
        Ok((http_result, grpc_result)) => {
            if let Err(e) = http_result {
                tracing::error!(error = %e, protocol = "http", "Server error");
            }
            if let Err(e) = grpc_result {
                tracing::error!(error = %e, protocol = "grpc", "Server error");
            }
            tracing::info!("Servers exited");
        }
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    };

    Ok(())
}
