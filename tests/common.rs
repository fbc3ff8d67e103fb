use rentals_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_commission_repo::SqliteCommissionRepo,
        sqlite_notification_repo::SqliteNotificationRepo,
        sqlite_payment_plan_repo::SqlitePaymentPlanRepo,
        sqlite_payment_repo::SqlitePaymentRepo,
        sqlite_property_repo::SqlitePropertyRepo,
        sqlite_tenant_repo::SqliteTenantRepo,
        sqlite_utility_repo::SqliteUtilityRepo,
    },
    domain::models::notification::NotificationChannel,
    domain::ports::SmsGateway,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::Request,
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

pub struct SentMessage {
    pub recipient: String,
    pub channel: NotificationChannel,
    pub message: String,
}

/// Records outgoing messages instead of hitting a gateway. Flip `fail_next`
/// to simulate a delivery failure.
pub struct MockSmsGateway {
    pub sent: Mutex<Vec<SentMessage>>,
    pub fail_next: AtomicBool,
}

impl MockSmsGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send(&self, recipient: &str, channel: NotificationChannel, message: &str) -> Result<(), AppError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::InternalWithMsg("Gateway rejected message".to_string()));
        }
        self.sent.lock().unwrap().push(SentMessage {
            recipient: recipient.to_string(),
            channel,
            message: message.to_string(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub sms: Arc<MockSmsGateway>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            sms_gateway_url: "http://localhost".to_string(),
            sms_gateway_token: "token".to_string(),
        };

        let sms = Arc::new(MockSmsGateway::new());

        let state = Arc::new(AppState {
            config,
            property_repo: Arc::new(SqlitePropertyRepo::new(pool.clone())),
            tenant_repo: Arc::new(SqliteTenantRepo::new(pool.clone())),
            plan_repo: Arc::new(SqlitePaymentPlanRepo::new(pool.clone())),
            payment_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            commission_repo: Arc::new(SqliteCommissionRepo::new(pool.clone())),
            utility_repo: Arc::new(SqliteUtilityRepo::new(pool.clone())),
            notification_repo: Arc::new(SqliteNotificationRepo::new(pool.clone())),
            sms_gateway: sms.clone(),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            sms,
        }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }

    pub async fn delete(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }

    /// Property + one vacant unit; returns (property_id, unit_id).
    pub async fn seed_property_with_unit(&self) -> (String, String) {
        let res = self.post_json("/api/v1/properties", serde_json::json!({
            "name": "Sunrise Apartments",
            "address": "12 Harbor Road"
        })).await;
        let property = parse_body(res).await;
        let property_id = property["data"]["id"].as_str().unwrap().to_string();

        let res = self.post_json(
            &format!("/api/v1/properties/{}/units", property_id),
            serde_json::json!({ "unit_number": "A-1", "monthly_rent_cents": 50000 }),
        ).await;
        let unit = parse_body(res).await;
        let unit_id = unit["data"]["id"].as_str().unwrap().to_string();

        (property_id, unit_id)
    }

    /// Registers a tenant in the given unit; returns the tenant id.
    pub async fn seed_tenant(&self, unit_id: &str, phone: &str, email: &str) -> String {
        let res = self.post_json("/api/v1/tenants", serde_json::json!({
            "full_name": "Amina Yusuf",
            "phone": phone,
            "email": email,
            "unit_id": unit_id,
            "deposit_cents": 100000
        })).await;
        assert!(res.status().is_success(), "seed_tenant failed: {}", res.status());
        let tenant = parse_body(res).await;
        tenant["data"]["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes))
    }
}
