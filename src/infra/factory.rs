use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::sms::http_sms_service::HttpSmsService;
use crate::infra::repositories::{
    postgres_property_repo::PostgresPropertyRepo, postgres_tenant_repo::PostgresTenantRepo,
    postgres_payment_plan_repo::PostgresPaymentPlanRepo, postgres_payment_repo::PostgresPaymentRepo,
    postgres_commission_repo::PostgresCommissionRepo, postgres_utility_repo::PostgresUtilityRepo,
    postgres_notification_repo::PostgresNotificationRepo,
    sqlite_property_repo::SqlitePropertyRepo, sqlite_tenant_repo::SqliteTenantRepo,
    sqlite_payment_plan_repo::SqlitePaymentPlanRepo, sqlite_payment_repo::SqlitePaymentRepo,
    sqlite_commission_repo::SqliteCommissionRepo, sqlite_utility_repo::SqliteUtilityRepo,
    sqlite_notification_repo::SqliteNotificationRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let sms_gateway = Arc::new(HttpSmsService::new(
        config.sms_gateway_url.clone(),
        config.sms_gateway_token.clone(),
    ));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            property_repo: Arc::new(PostgresPropertyRepo::new(pool.clone())),
            tenant_repo: Arc::new(PostgresTenantRepo::new(pool.clone())),
            plan_repo: Arc::new(PostgresPaymentPlanRepo::new(pool.clone())),
            payment_repo: Arc::new(PostgresPaymentRepo::new(pool.clone())),
            commission_repo: Arc::new(PostgresCommissionRepo::new(pool.clone())),
            utility_repo: Arc::new(PostgresUtilityRepo::new(pool.clone())),
            notification_repo: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            sms_gateway,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            property_repo: Arc::new(SqlitePropertyRepo::new(pool.clone())),
            tenant_repo: Arc::new(SqliteTenantRepo::new(pool.clone())),
            plan_repo: Arc::new(SqlitePaymentPlanRepo::new(pool.clone())),
            payment_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            commission_repo: Arc::new(SqliteCommissionRepo::new(pool.clone())),
            utility_repo: Arc::new(SqliteUtilityRepo::new(pool.clone())),
            notification_repo: Arc::new(SqliteNotificationRepo::new(pool.clone())),
            sms_gateway,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
