use aristokrat_cli::seeder::{
    ENTRANCE_RANGES, ResidentSeedConfig, ResidentSeedReport, seed_devices, seed_residents,
};
use aristokrat_core::verify_password;
use sqlx::PgPool;

const APARTMENTS_PER_HOUSE: u64 = 352;

fn fast_config(house: i32) -> ResidentSeedConfig {
    let mut config = ResidentSeedConfig::new(house);
    config.fast_hash = true;
    config
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn password_status(pool: &PgPool, username: &str) -> String {
    sqlx::query_scalar(
        "SELECT rp.password_status FROM resident_profiles rp
         JOIN users u ON u.id = rp.user_id
         WHERE u.username = $1",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrator = "aristokrat_db::MIGRATOR")]
async fn test_seed_residents_creates_house(pool: PgPool) {
    let report = seed_residents(&pool, fast_config(1)).await.unwrap();

    assert_eq!(report.apartments_created, APARTMENTS_PER_HOUSE);
    assert_eq!(report.users_created, APARTMENTS_PER_HOUSE);
    assert_eq!(report.profiles_created, APARTMENTS_PER_HOUSE);
    assert_eq!(report.passwords_reset, 0);
    assert_eq!(report.profiles_updated, 0);

    assert_eq!(count(&pool, "houses").await, 1);
    assert_eq!(count(&pool, "entrances").await, 8);
    assert_eq!(count(&pool, "apartments").await, 352);
    assert_eq!(count(&pool, "users").await, 352);
    assert_eq!(count(&pool, "resident_profiles").await, 352);
}

#[sqlx::test(migrator = "aristokrat_db::MIGRATOR")]
async fn test_seed_residents_follows_entrance_ranges(pool: PgPool) {
    seed_residents(&pool, fast_config(1)).await.unwrap();

    let rows: Vec<(i32, i32, i32, i64)> = sqlx::query_as(
        "SELECT e.number, MIN(a.number::INT), MAX(a.number::INT), COUNT(*)
         FROM apartments a
         JOIN entrances e ON e.id = a.entrance_id
         GROUP BY e.number
         ORDER BY e.number",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), ENTRANCE_RANGES.len());
    for ((number, first, last, total), (entrance, range)) in rows.iter().zip(ENTRANCE_RANGES.iter())
    {
        assert_eq!(*number, i32::from(*entrance));
        assert_eq!(first, range.start());
        assert_eq!(last, range.end());
        assert_eq!(*total, i64::from(range.end() - range.start() + 1));
    }

    let (entrance_no, apartment_no, car_number, phone, active): (i16, String, String, String, bool) =
        sqlx::query_as(
            "SELECT rp.entrance_no, rp.apartment_no, rp.car_number, rp.phone,
                    rp.is_active_resident
             FROM resident_profiles rp
             JOIN users u ON u.id = rp.user_id
             WHERE u.username = '125-3' AND rp.house_number = 1",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(entrance_no, 3);
    assert_eq!(apartment_no, "125");
    assert_eq!(car_number, "NO");
    assert_eq!(phone, "");
    assert!(active);

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = '125-3'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(verify_password("125", &hash).unwrap());
    assert_eq!(password_status(&pool, "125-3").await, "not_updated");
}

#[sqlx::test(migrator = "aristokrat_db::MIGRATOR")]
async fn test_seed_residents_twice_creates_nothing_new(pool: PgPool) {
    seed_residents(&pool, fast_config(1)).await.unwrap();
    let report = seed_residents(&pool, fast_config(1)).await.unwrap();

    assert_eq!(report, ResidentSeedReport::default());
    assert_eq!(count(&pool, "houses").await, 1);
    assert_eq!(count(&pool, "entrances").await, 8);
    assert_eq!(count(&pool, "apartments").await, 352);
    assert_eq!(count(&pool, "users").await, 352);
    assert_eq!(count(&pool, "resident_profiles").await, 352);
}

#[sqlx::test(migrator = "aristokrat_db::MIGRATOR")]
async fn test_reset_passwords_restores_default_and_status(pool: PgPool) {
    seed_residents(&pool, fast_config(1)).await.unwrap();

    sqlx::query("UPDATE users SET password_hash = 'changed' WHERE username = '7-1'")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "UPDATE resident_profiles SET password_status = 'updated'
         WHERE user_id = (SELECT id FROM users WHERE username = '7-1')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let mut config = fast_config(1);
    config.reset_passwords = true;
    let report = seed_residents(&pool, config).await.unwrap();

    assert_eq!(report.passwords_reset, APARTMENTS_PER_HOUSE);
    assert_eq!(report.users_created, 0);

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = '7-1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(verify_password("7", &hash).unwrap());
    assert_eq!(password_status(&pool, "7-1").await, "not_updated");
}

#[sqlx::test(migrator = "aristokrat_db::MIGRATOR")]
async fn test_reset_profiles_restores_defaults(pool: PgPool) {
    seed_residents(&pool, fast_config(1)).await.unwrap();

    sqlx::query(
        "UPDATE resident_profiles SET phone = '+7900', car_number = 'A123BC',
             is_active_resident = FALSE
         WHERE user_id = (SELECT id FROM users WHERE username = '40-1')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let mut config = fast_config(1);
    config.reset_profiles = true;
    let report = seed_residents(&pool, config).await.unwrap();
    assert_eq!(report.profiles_updated, APARTMENTS_PER_HOUSE);
    assert_eq!(report.profiles_created, 0);

    let (phone, car_number, active): (String, String, bool) = sqlx::query_as(
        "SELECT rp.phone, rp.car_number, rp.is_active_resident
         FROM resident_profiles rp
         JOIN users u ON u.id = rp.user_id
         WHERE u.username = '40-1'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(phone, "");
    assert_eq!(car_number, "NO");
    assert!(active);
}

#[sqlx::test(migrator = "aristokrat_db::MIGRATOR")]
async fn test_seed_devices_is_idempotent(pool: PgPool) {
    assert_eq!(seed_devices(&pool).await.unwrap(), 29);
    assert_eq!(seed_devices(&pool).await.unwrap(), 0);
    assert_eq!(count(&pool, "devices").await, 29);
}
