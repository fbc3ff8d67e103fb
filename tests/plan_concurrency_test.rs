use rentals_backend::{
    domain::models::payment_plan::{InstallmentFrequency, NewInstallment, NewPlanParams, PaymentPlan},
    domain::models::property::{Property, Unit},
    domain::models::tenant::{NewTenantParams, Tenant},
    domain::ports::{PaymentPlanRepository, PropertyRepository, TenantRepository},
    infra::repositories::{
        sqlite_payment_plan_repo::SqlitePaymentPlanRepo,
        sqlite_property_repo::SqlitePropertyRepo,
        sqlite_tenant_repo::SqliteTenantRepo,
    },
};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use uuid::Uuid;

// Hammers one plan from many tasks; every increment must survive.
#[tokio::test]
async fn test_concurrent_installments_lose_no_updates() {
    let db_filename = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", db_filename);

    let connection_options = SqliteConnectOptions::from_str(&db_url)
        .unwrap()
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(connection_options)
        .await
        .expect("Failed to connect to test db");

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .expect("Failed to migrate test db");

    let property_repo = SqlitePropertyRepo::new(pool.clone());
    let tenant_repo = SqliteTenantRepo::new(pool.clone());
    let plan_repo = Arc::new(SqlitePaymentPlanRepo::new(pool.clone()));

    let property = property_repo
        .create(&Property::new("Concurrency Court".to_string(), "1 Lock Lane".to_string()))
        .await
        .unwrap();
    let unit = property_repo
        .create_unit(&Unit::new(property.id.clone(), "C-1".to_string(), 50000))
        .await
        .unwrap();
    let tenant = tenant_repo
        .create_in_unit(&Tenant::new(NewTenantParams {
            unit_id: unit.id.clone(),
            full_name: "Race Tester".to_string(),
            phone: "+254700000001".to_string(),
            email: "race@example.com".to_string(),
            id_number: None,
            deposit_cents: 0,
            move_in_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }))
        .await
        .unwrap();

    // Big enough that the plan never completes mid-test.
    let plan = plan_repo
        .create(&PaymentPlan::new(NewPlanParams {
            tenant_id: tenant.id.clone(),
            total_amount_cents: 1_000_000,
            installment_amount_cents: 1_000,
            installment_frequency: InstallmentFrequency::Monthly,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            end_date: None,
        }))
        .await
        .unwrap();

    let workers = 10;
    let installments_per_worker = 5;
    let mut set = JoinSet::new();

    for _ in 0..workers {
        let repo = plan_repo.clone();
        let plan_id = plan.id.clone();
        set.spawn(async move {
            for _ in 0..installments_per_worker {
                let installment = NewInstallment {
                    amount_cents: 1_000,
                    payment_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                    payment_method: "mpesa".to_string(),
                    reference_number: None,
                };
                repo.record_installment(&plan_id, &installment)
                    .await
                    .expect("installment failed");
            }
        });
    }

    while let Some(res) = set.join_next().await {
        res.unwrap();
    }

    let expected_paid = (workers * installments_per_worker * 1_000) as i64;
    let settled = plan_repo.find_by_id(&plan.id).await.unwrap().unwrap();
    assert_eq!(settled.amount_paid_cents, expected_paid, "Lost update detected");
    assert_eq!(settled.balance_cents, 1_000_000 - expected_paid);

    let payment_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE plan_id = ?")
        .bind(&plan.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(payment_count, (workers * installments_per_worker) as i64);

    pool.close().await;
    let _ = std::fs::remove_file(&db_filename);
    let _ = std::fs::remove_file(format!("{}-wal", db_filename));
    let _ = std::fs::remove_file(format!("{}-shm", db_filename));
}
