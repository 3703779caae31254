use learnhub::auth::auth_service::AuthService;
use learnhub::db::{create_pool, run_migrations};
use learnhub::notification::{start_reminder_service, NotificationRepository};
use learnhub::routes::create_router;
use learnhub::seed::seed_demo_data;
use learnhub::state::{AppState, Config};
use learnhub::user::UserRepository;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,learnhub=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://learnhub.db".to_string());

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Create repositories and services
    let user_repository = UserRepository::new(db.clone());
    let notification_repository = NotificationRepository::new(db.clone());
    let auth_service = AuthService::new(
        user_repository.clone(),
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    );

    // Create application state
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        user_repository,
        notification_repository,
        auth_service,
    };

    // `learnhub seed` repopulates demo data and exits
    if std::env::args().nth(1).as_deref() == Some("seed") {
        seed_demo_data(&state).await?;
        tracing::info!("Demo data seeded");
        return Ok(());
    }

    // Start reminder service
    let reminder_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = start_reminder_service(reminder_state).await {
            tracing::error!("Reminder service error: {:?}", e);
        }
    });

    // Create router
    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
