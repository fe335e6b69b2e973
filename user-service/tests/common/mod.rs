#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::JwtHandler;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_json::json;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use user_service::domain::user::auth_service::AuthService;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::SqliteUserRepository;
use user_service::outbound::verification::HttpBlacklistClient;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Emails containing this marker are flagged by the stub blacklist service.
pub const BLACKLIST_MARKER: &str = "blacklisted";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub blacklist: StubBlacklist,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Local stand-in for the external blacklist service
pub struct StubBlacklist {
    pub address: String,
    calls: Arc<AtomicUsize>,
}

impl StubBlacklist {
    /// Answers `201 {is_in_blacklist}` and counts the calls it receives.
    pub async fn spawn() -> Self {
        let calls = Arc::new(AtomicUsize::new(0));

        let router = Router::new()
            .route("/check-blacklist", post(check_blacklist))
            .with_state(Arc::clone(&calls));

        let address = serve(router).await;
        Self { address, calls }
    }

    /// Answers every check with the given status and body.
    pub async fn spawn_fixed(status: StatusCode, body: Value) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let router = Router::new().route(
            "/check-blacklist",
            post(move || {
                let counter = Arc::clone(&counter);
                let body = body.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, Json(body))
                }
            }),
        );

        let address = serve(router).await;
        Self { address, calls }
    }

    /// Address nothing is listening on.
    pub async fn unreachable() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        Self {
            address: format!("http://127.0.0.1:{}", port),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn client(&self) -> HttpBlacklistClient {
        HttpBlacklistClient::new(&self.address, Duration::from_secs(5))
            .expect("Failed to create blacklist client")
    }
}

async fn check_blacklist(
    State(calls): State<Arc<AtomicUsize>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    calls.fetch_add(1, Ordering::SeqCst);

    let is_in_blacklist = body["email"]
        .as_str()
        .map(|email| email.contains(BLACKLIST_MARKER))
        .unwrap_or(false);

    (
        StatusCode::CREATED,
        Json(json!({ "is_in_blacklist": is_in_blacklist })),
    )
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    format!("http://127.0.0.1:{}", port)
}

/// Fresh in-memory database with migrations applied.
///
/// A single connection that never expires keeps the in-memory database alive
/// for the lifetime of the pool.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_blacklist(StubBlacklist::spawn().await).await
    }

    pub async fn spawn_with_blacklist(blacklist: StubBlacklist) -> Self {
        let pool = test_pool().await;

        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::new(blacklist.client()),
        ));
        let auth_service = Arc::new(AuthService::new(
            user_repository,
            Arc::clone(&authenticator),
        ));

        let router = create_router(user_service, auth_service, authenticator);
        let address = serve(router).await;

        Self {
            address,
            pool,
            blacklist,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/users")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "id_number": "12345678",
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/v1/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Register then log in, returning (user id, token)
    pub async fn register_and_login(&self, name: &str, email: &str, password: &str) -> (i64, String) {
        let response = self.register(name, email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        let id = body["data"]["id"].as_i64().expect("Missing id");

        (id, self.login(email, password).await)
    }
}
