use aristokrat_core::AppError;
use sqlx::PgPool;
use tracing::instrument;

use super::model::{EntranceHouseRow, EntranceWithHouse, House};

pub struct HouseService;

impl HouseService {
    #[instrument(skip(db))]
    pub async fn list_houses(db: &PgPool) -> Result<Vec<House>, AppError> {
        let houses = sqlx::query_as::<_, House>("SELECT id, number FROM houses ORDER BY number")
            .fetch_all(db)
            .await?;
        Ok(houses)
    }

    #[instrument(skip(db))]
    pub async fn list_entrances(
        db: &PgPool,
        house_number: Option<i64>,
    ) -> Result<Vec<EntranceWithHouse>, AppError> {
        let rows = sqlx::query_as::<_, EntranceHouseRow>(
            "SELECT e.id, e.number, h.id AS house_id, h.number AS house_number
             FROM entrances e
             JOIN houses h ON h.id = e.house_id
             WHERE ($1::BIGINT IS NULL OR h.number = $1)
             ORDER BY h.number, e.number",
        )
        .bind(house_number)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(EntranceWithHouse::from).collect())
    }
}
