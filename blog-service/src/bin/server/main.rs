use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::AuthorizationGate;
use auth::PasswordHasher;
use auth::TokenService;
use auth::WorkFactor;
use blog_service::config::Config;
use blog_service::domain::article::service::ArticleService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::routes::access_policy;
use blog_service::outbound::repositories::PostgresArticleRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MIN_SECRET_BYTES: usize = 32;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        token_expiration_hours = config.jwt.expiration_hours,
        access_overrides = config.access.len(),
        "Configuration loaded"
    );

    if config.jwt.secret.len() < MIN_SECRET_BYTES {
        tracing::warn!(
            length = config.jwt.secret.len(),
            minimum = MIN_SECRET_BYTES,
            "JWT secret is shorter than recommended for HS256"
        );
    }

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

    let tokens = Arc::new(TokenService::new(config.jwt.secret.as_bytes()));
    let password_hasher = PasswordHasher::with_work_factor(WorkFactor::from(&config.password))?;
    let authenticator = Arc::new(Authenticator::new(password_hasher, Arc::clone(&tokens)));
    let gate = Arc::new(AuthorizationGate::new(
        access_policy(&config.access)?,
        Arc::clone(&tokens),
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let article_repository = Arc::new(PostgresArticleRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        user_repository,
        authenticator,
        config.jwt.token_ttl()?,
    ));
    let article_service = Arc::new(ArticleService::new(article_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        article_service,
        gate,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
