use std::time::Instant;

use aristokrat::modules::devices::service::DeviceService;
use aristokrat_models::DeviceKey;
use sqlx::PgPool;

/// Creates every default device that is missing. Returns how many were created.
pub async fn seed_devices(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🔌 Seeding {} devices...", DeviceKey::defaults().len());

    let created = DeviceService::seed_defaults(db).await.map_err(|e| e.error)?;

    println!(
        "   ✓ Created {} devices in {:?}",
        created,
        start_time.elapsed()
    );
    Ok(created)
}
