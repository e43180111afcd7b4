use aristokrat_core::AppError;
use sqlx::PgPool;
use tracing::instrument;

use super::model::{Device, DeviceFilterParams, DeviceKey};

/// Conflict target matching the `devices_kind_entrance_key` unique index.
const DEVICE_CONFLICT_TARGET: &str = "(kind, (COALESCE(entrance_no, 0)))";

pub struct DeviceService;

impl DeviceService {
    /// Creates the device row with `state = false` unless it already exists.
    /// Safe to call concurrently.
    #[instrument(skip(db))]
    pub async fn ensure(db: &PgPool, key: DeviceKey) -> Result<Device, AppError> {
        sqlx::query(&format!(
            "INSERT INTO devices (kind, entrance_no) VALUES ($1, $2)
             ON CONFLICT {DEVICE_CONFLICT_TARGET} DO NOTHING"
        ))
        .bind(key.kind.as_str())
        .bind(key.entrance_no)
        .execute(db)
        .await?;

        let device = sqlx::query_as::<_, Device>(
            "SELECT id, kind, entrance_no, state, updated_at FROM devices
             WHERE kind = $1 AND entrance_no IS NOT DISTINCT FROM $2",
        )
        .bind(key.kind.as_str())
        .bind(key.entrance_no)
        .fetch_one(db)
        .await?;

        Ok(device)
    }

    #[instrument(skip(db))]
    pub async fn get_state(db: &PgPool, key: DeviceKey) -> Result<bool, AppError> {
        Ok(Self::ensure(db, key).await?.state)
    }

    /// Stores `state`, creating the row if needed, in a single statement.
    #[instrument(skip(db))]
    pub async fn set_state(db: &PgPool, key: DeviceKey, state: bool) -> Result<bool, AppError> {
        let stored: bool = sqlx::query_scalar(&format!(
            "INSERT INTO devices (kind, entrance_no, state) VALUES ($1, $2, $3)
             ON CONFLICT {DEVICE_CONFLICT_TARGET}
             DO UPDATE SET state = EXCLUDED.state, updated_at = NOW()
             RETURNING state"
        ))
        .bind(key.kind.as_str())
        .bind(key.entrance_no)
        .bind(state)
        .fetch_one(db)
        .await?;

        tracing::info!(kind = %key.kind, entrance_no = ?key.entrance_no, state = stored, "Device toggled");
        Ok(stored)
    }

    #[instrument(skip(db))]
    pub async fn list_devices(
        db: &PgPool,
        filters: DeviceFilterParams,
    ) -> Result<Vec<Device>, AppError> {
        let devices = sqlx::query_as::<_, Device>(
            "SELECT id, kind, entrance_no, state, updated_at FROM devices
             WHERE ($1::TEXT IS NULL OR kind = $1)
               AND ($2::BIGINT IS NULL OR entrance_no = $2)
               AND ($3::BOOLEAN IS NULL OR state = $3)
             ORDER BY kind, entrance_no NULLS FIRST",
        )
        .bind(filters.kind.as_deref().filter(|k| !k.is_empty()))
        .bind(filters.entrance_no)
        .bind(filters.state)
        .fetch_all(db)
        .await?;

        Ok(devices)
    }

    /// Turns the given devices on or off. Unknown ids are ignored.
    #[instrument(skip(db))]
    pub async fn set_state_bulk(db: &PgPool, ids: &[i64], state: bool) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE devices SET state = $2, updated_at = NOW() WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(state)
        .execute(db)
        .await?;

        tracing::info!(updated = result.rows_affected(), state, "Devices updated in bulk");
        Ok(result.rows_affected())
    }

    /// Creates every default device that does not exist yet and returns how
    /// many were created.
    #[instrument(skip(db))]
    pub async fn seed_defaults(db: &PgPool) -> Result<u64, AppError> {
        let mut tx = db.begin().await?;
        let mut created = 0;

        for key in DeviceKey::defaults() {
            let result = sqlx::query(&format!(
                "INSERT INTO devices (kind, entrance_no) VALUES ($1, $2)
                 ON CONFLICT {DEVICE_CONFLICT_TARGET} DO NOTHING"
            ))
            .bind(key.kind.as_str())
            .bind(key.entrance_no)
            .execute(&mut *tx)
            .await?;
            created += result.rows_affected();
        }

        tx.commit().await?;

        tracing::info!(created, "Default devices seeded");
        Ok(created)
    }
}
