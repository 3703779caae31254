#![allow(dead_code)]

use learnhub::auth::auth_service::AuthService;
use learnhub::auth::create_access_token;
use learnhub::notification::NotificationRepository;
use learnhub::routes::create_router;
use learnhub::state::{AppState, Config};
use learnhub::user::{User, UserRepository};
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const TEST_SECRET: &str = "test-secret";

pub async fn test_state() -> AppState {
    // Single connection so every query sees the same in-memory database.
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("migrations");

    let config = Arc::new(Config {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 1,
    });

    let user_repository = UserRepository::new(db.clone());
    let notification_repository = NotificationRepository::new(db.clone());
    let auth_service = AuthService::new(
        user_repository.clone(),
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    );

    AppState {
        db,
        config,
        user_repository,
        notification_repository,
        auth_service,
    }
}

pub async fn create_user(state: &AppState, username: &str, email: &str, role: &str) -> User {
    state
        .user_repository
        .create(username, email, "not-a-real-hash", role)
        .await
        .expect("create user")
}

pub fn token_for(state: &AppState, user: &User) -> String {
    create_access_token(
        user.id,
        &user.email,
        &user.role,
        &state.config.jwt_secret,
        1,
    )
    .expect("token")
}

pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Stops the server and waits until every connection is closed and the
    /// port is released, so clients reliably fail afterwards.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        let _ = self.handle.await;
    }
}

/// Serves the router on the given address (use port 0 for an ephemeral one).
pub async fn spawn_server(state: AppState, addr: &str) -> TestServer {
    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = create_router(state);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { signal.cancelled().await })
            .await
            .ok();
    });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
