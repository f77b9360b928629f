/// Integration tests for check-in storage: append-only rows, read-time
/// distinct counts
///
/// These tests require a running PostgreSQL database and are skipped when
/// DATABASE_URL is not set.
/// Run with: cargo test --test db_checkin_tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use gymdesk_shared::auth::password::hash_password;
use gymdesk_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use gymdesk_shared::models::{
    check_in::CheckIn,
    member::{CreateMember, Member},
};
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

async fn test_pool() -> Option<PgPool> {
    let url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping database test");
            return None;
        }
    };
    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 5,
        ..Default::default()
    })
    .await
    .expect("failed to create pool");
    run_migrations(&pool).await.expect("failed to run migrations");
    Some(pool)
}

async fn make_member(pool: &PgPool, name: &str) -> Member {
    let phone = format!("138{}", &Uuid::new_v4().simple().to_string()[..10]);
    Member::create(
        pool,
        CreateMember {
            phone,
            name: name.to_string(),
            password_hash: hash_password("20240101").expect("hash should succeed"),
            expiry_date: Utc::now() + Duration::days(365),
        },
    )
    .await
    .expect("member insert")
}

/// A one-day window nothing else writes into, so distinct counts are exact
fn isolated_day_start() -> DateTime<Utc> {
    let salt = (Uuid::new_v4().as_u128() % 3_000_000_000) as i64;
    Utc.with_ymd_and_hms(1950, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(salt)
}

#[tokio::test]
async fn three_rows_from_two_members_count_as_two() {
    let Some(pool) = test_pool().await else { return };

    let alice = make_member(&pool, "alice").await;
    let bob = make_member(&pool, "bob").await;

    let start = isolated_day_start();
    let end = start + Duration::days(1);

    // Alice twice, Bob once: three rows, two distinct members
    CheckIn::create(&pool, alice.id, start + Duration::hours(8))
        .await
        .unwrap();
    CheckIn::create(&pool, alice.id, start + Duration::hours(18))
        .await
        .unwrap();
    CheckIn::create(&pool, bob.id, start + Duration::hours(9))
        .await
        .unwrap();

    let distinct = CheckIn::distinct_members_between(&pool, start, end)
        .await
        .unwrap();
    assert_eq!(distinct, 2);

    // Every row was written; de-duplication is read-time only
    let alice_times = CheckIn::times_for_member_between(&pool, alice.id, start, end)
        .await
        .unwrap();
    assert_eq!(alice_times.len(), 2);
}

#[tokio::test]
async fn window_bounds_are_inclusive_start_exclusive_end() {
    let Some(pool) = test_pool().await else { return };

    let member = make_member(&pool, "boundary").await;
    let start = isolated_day_start();
    let end = start + Duration::days(1);

    CheckIn::create(&pool, member.id, start).await.unwrap();
    CheckIn::create(&pool, member.id, end).await.unwrap();

    let times = CheckIn::times_for_member_between(&pool, member.id, start, end)
        .await
        .unwrap();
    assert_eq!(times.len(), 1);

    let distinct = CheckIn::distinct_members_between(&pool, start, end)
        .await
        .unwrap();
    assert_eq!(distinct, 1);
}

#[tokio::test]
async fn listing_joins_member_name_and_orders_newest_first() {
    let Some(pool) = test_pool().await else { return };

    let member = make_member(&pool, "lister").await;
    let start = isolated_day_start();

    CheckIn::create(&pool, member.id, start + Duration::hours(8))
        .await
        .unwrap();
    CheckIn::create(&pool, member.id, start + Duration::hours(10))
        .await
        .unwrap();

    let rows = CheckIn::list_since_with_members(&pool, start).await.unwrap();
    let mine: Vec<_> = rows.iter().filter(|r| r.member_id == member.id).collect();
    assert_eq!(mine.len(), 2);
    assert!(mine[0].check_time > mine[1].check_time);
    assert_eq!(mine[0].member_name, "lister");
}
