use aristokrat_core::{AppError, PageMeta};
use aristokrat_db::contains_pattern;
use sqlx::PgPool;
use tracing::instrument;

use super::model::{
    ApprovalStatus, PaginatedResidentsResponse, ResidentFilterParams, ResidentWithUser,
};

const RESIDENT_FROM: &str = "FROM resident_profiles rp
     JOIN users u ON u.id = rp.user_id
     WHERE ($1::TEXT IS NULL OR rp.approval_status = $1)
       AND ($2::BIGINT IS NULL OR rp.house_number = $2)
       AND ($3::BIGINT IS NULL OR rp.entrance_no = $3)
       AND ($4::TEXT IS NULL
            OR u.username ILIKE $4
            OR rp.apartment_no ILIKE $4
            OR rp.car_number ILIKE $4
            OR rp.phone ILIKE $4)";

pub struct ResidentService;

impl ResidentService {
    #[instrument(skip(db))]
    pub async fn list_residents(
        db: &PgPool,
        filters: ResidentFilterParams,
    ) -> Result<PaginatedResidentsResponse, AppError> {
        let approval_status = filters.approval_status.map(|s| s.as_str());
        let search = contains_pattern(filters.search.as_deref());

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {RESIDENT_FROM}"))
            .bind(approval_status)
            .bind(filters.house_number)
            .bind(filters.entrance_no)
            .bind(search.as_deref())
            .fetch_one(db)
            .await?;

        let data = sqlx::query_as::<_, ResidentWithUser>(&format!(
            "SELECT rp.id, rp.user_id, u.username, u.first_name, u.last_name,
                    rp.approval_status, rp.password_status, rp.house_number, rp.entrance_no,
                    rp.apartment_no, rp.car_number, rp.phone, rp.is_active_resident,
                    rp.updated_at
             {RESIDENT_FROM}
             ORDER BY rp.id
             LIMIT $5 OFFSET $6"
        ))
        .bind(approval_status)
        .bind(filters.house_number)
        .bind(filters.entrance_no)
        .bind(search.as_deref())
        .bind(filters.pagination.page_size())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedResidentsResponse {
            data,
            meta: PageMeta::new(total, &filters.pagination),
        })
    }

    /// Sets the approval status of the given profiles. Unknown ids are ignored.
    #[instrument(skip(db))]
    pub async fn set_approval_bulk(
        db: &PgPool,
        ids: &[i64],
        status: ApprovalStatus,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE resident_profiles SET approval_status = $2 WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(status.as_str())
        .execute(db)
        .await?;

        tracing::info!(updated = result.rows_affected(), %status, "Resident approvals updated");
        Ok(result.rows_affected())
    }
}
