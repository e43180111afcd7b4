use aristokrat_core::{AppError, PageMeta};
use aristokrat_db::{contains_pattern, foreign_key_violation, unique_violation};
use sqlx::PgPool;
use tracing::instrument;

use super::model::{
    ApartmentDetail, ApartmentFilterParams, ApartmentListItem, ApartmentRow, ApprovalResult,
    ApprovalStatus, BlockResult, CreateApartmentDto, NORMALIZED_APARTMENT_NO_SQL,
    PaginatedApartmentsResponse, PhoneCandidate, UpdateApartmentDto, match_phone,
    normalize_apartment_no,
};

const APARTMENT_ROW_SELECT: &str = "SELECT a.id, a.number, a.owner_name, a.is_blocked, a.note,
            a.created_at, a.updated_at,
            e.id AS entrance_id, e.number AS entrance_number,
            h.id AS house_id, h.number AS house_number
     FROM apartments a
     JOIN entrances e ON e.id = a.entrance_id
     JOIN houses h ON h.id = e.house_id";

const LIST_FILTER: &str = "WHERE ($1::BIGINT IS NULL OR h.number = $1)
       AND ($2::BIGINT IS NULL OR e.number = $2)
       AND ($3::TEXT IS NULL OR a.number ILIKE $3)";

const DUPLICATE_APARTMENT: &str = "Apartment with this number already exists in the entrance";
const UNKNOWN_ENTRANCE: &str = "Entrance does not exist";

pub struct ApartmentService;

impl ApartmentService {
    #[instrument(skip(db))]
    pub async fn list_apartments(
        db: &PgPool,
        filters: ApartmentFilterParams,
    ) -> Result<PaginatedApartmentsResponse, AppError> {
        let search = contains_pattern(filters.search.as_deref());

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*)
             FROM apartments a
             JOIN entrances e ON e.id = a.entrance_id
             JOIN houses h ON h.id = e.house_id
             {LIST_FILTER}"
        ))
        .bind(filters.house)
        .bind(filters.entrance)
        .bind(search.as_deref())
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, ApartmentListItem>(&format!(
            "SELECT a.id, a.number, a.is_blocked
             FROM apartments a
             JOIN entrances e ON e.id = a.entrance_id
             JOIN houses h ON h.id = e.house_id
             {LIST_FILTER}
             ORDER BY a.id
             LIMIT $4 OFFSET $5"
        ))
        .bind(filters.house)
        .bind(filters.entrance)
        .bind(search.as_deref())
        .bind(filters.pagination.page_size())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedApartmentsResponse {
            data,
            meta: PageMeta::new(total, &filters.pagination),
        })
    }

    async fn find_row(db: &PgPool, id: i64) -> Result<ApartmentRow, AppError> {
        sqlx::query_as::<_, ApartmentRow>(&format!("{APARTMENT_ROW_SELECT} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Apartment not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_apartment(db: &PgPool, id: i64) -> Result<ApartmentDetail, AppError> {
        let row = Self::find_row(db, id).await?;
        let phone =
            Self::resident_phone(db, row.house_number, row.entrance_number, &row.number).await;
        Ok(ApartmentDetail::from_row(row, phone))
    }

    /// Phone of the most recently updated active resident registered at the
    /// given address, or an empty string.
    ///
    /// Lookup failures are logged and reported as "no phone".
    #[instrument(skip(db))]
    pub async fn resident_phone(
        db: &PgPool,
        house_number: i32,
        entrance_number: i32,
        apartment_no: &str,
    ) -> String {
        let candidates = sqlx::query_as::<_, PhoneCandidate>(
            "SELECT phone, apartment_no
             FROM resident_profiles
             WHERE house_number = $1
               AND entrance_no = $2
               AND is_active_resident
               AND phone <> ''
             ORDER BY updated_at DESC, id DESC",
        )
        .bind(house_number)
        .bind(entrance_number)
        .fetch_all(db)
        .await;

        match candidates {
            Ok(candidates) => match_phone(&candidates, apartment_no)
                .map(str::to_string)
                .unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Resident phone lookup failed");
                String::new()
            }
        }
    }

    #[instrument(skip(db))]
    pub async fn create_apartment(
        db: &PgPool,
        dto: CreateApartmentDto,
    ) -> Result<ApartmentDetail, AppError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO apartments (entrance_id, number, owner_name, is_blocked, note)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(dto.entrance_id)
        .bind(dto.number.trim())
        .bind(&dto.owner_name)
        .bind(dto.is_blocked)
        .bind(&dto.note)
        .fetch_one(db)
        .await
        .map_err(Self::map_write_error)?;

        tracing::info!(apartment_id = id, "Apartment created");
        Self::get_apartment(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn replace_apartment(
        db: &PgPool,
        id: i64,
        dto: CreateApartmentDto,
    ) -> Result<ApartmentDetail, AppError> {
        let updated: Option<i64> = sqlx::query_scalar(
            "UPDATE apartments SET
                entrance_id = $2,
                number = $3,
                owner_name = $4,
                is_blocked = $5,
                note = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(dto.entrance_id)
        .bind(dto.number.trim())
        .bind(&dto.owner_name)
        .bind(dto.is_blocked)
        .bind(&dto.note)
        .fetch_optional(db)
        .await
        .map_err(Self::map_write_error)?;

        updated.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Apartment not found")))?;
        Self::get_apartment(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn update_apartment(
        db: &PgPool,
        id: i64,
        dto: UpdateApartmentDto,
    ) -> Result<ApartmentDetail, AppError> {
        let updated: Option<i64> = sqlx::query_scalar(
            "UPDATE apartments SET
                entrance_id = COALESCE($2, entrance_id),
                number = COALESCE($3, number),
                owner_name = COALESCE($4, owner_name),
                is_blocked = COALESCE($5, is_blocked),
                note = COALESCE($6, note),
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(dto.entrance_id)
        .bind(dto.number.as_deref().map(str::trim))
        .bind(dto.owner_name.as_deref())
        .bind(dto.is_blocked)
        .bind(dto.note.as_deref())
        .fetch_optional(db)
        .await
        .map_err(Self::map_write_error)?;

        updated.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Apartment not found")))?;
        Self::get_apartment(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_apartment(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM apartments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Apartment not found")));
        }

        tracing::info!(apartment_id = id, "Apartment deleted");
        Ok(())
    }

    /// Sets the approval status of every resident profile registered at the
    /// apartment's address. Apartment numbers are compared after
    /// normalization, so `"007"` and `"7"` are the same apartment.
    #[instrument(skip(db))]
    pub async fn set_approval(
        db: &PgPool,
        id: i64,
        status: ApprovalStatus,
    ) -> Result<ApprovalResult, AppError> {
        let row = Self::find_row(db, id).await?;

        let result = sqlx::query(&format!(
            "UPDATE resident_profiles SET approval_status = $4
             WHERE house_number = $1
               AND entrance_no = $2
               AND {NORMALIZED_APARTMENT_NO_SQL} = $3"
        ))
        .bind(row.house_number)
        .bind(row.entrance_number)
        .bind(normalize_apartment_no(&row.number))
        .bind(status.as_str())
        .execute(db)
        .await?;

        let updated_profiles = result.rows_affected();
        tracing::info!(
            apartment_id = id,
            approval_status = %status,
            updated_profiles,
            "Apartment residents moderated"
        );

        Ok(ApprovalResult {
            updated_profiles,
            approval_status: status,
        })
    }

    #[instrument(skip(db))]
    pub async fn set_blocked(db: &PgPool, id: i64, blocked: bool) -> Result<BlockResult, AppError> {
        sqlx::query_as::<_, BlockResult>(
            "UPDATE apartments SET is_blocked = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING id, is_blocked",
        )
        .bind(id)
        .bind(blocked)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Apartment not found")))
    }

    fn map_write_error(err: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return foreign_key_violation(err, UNKNOWN_ENTRANCE);
            }
        }
        unique_violation(err, DUPLICATE_APARTMENT)
    }
}
