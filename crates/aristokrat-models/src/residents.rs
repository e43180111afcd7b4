//! Admin views over resident profiles.

use aristokrat_core::pagination::deserialize_optional_i64;
use aristokrat_core::{PageMeta, PageParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::users::ApprovalStatus;

/// Resident profile joined with its account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResidentWithUser {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub approval_status: String,
    pub password_status: String,
    pub house_number: Option<i32>,
    pub entrance_no: Option<i16>,
    pub apartment_no: String,
    pub car_number: String,
    pub phone: String,
    pub is_active_resident: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ResidentFilterParams {
    pub approval_status: Option<ApprovalStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub house_number: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub entrance_no: Option<i64>,
    /// Case-insensitive substring of username, apartment, car number or phone
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResidentsResponse {
    pub data: Vec<ResidentWithUser>,
    pub meta: PageMeta,
}

/// Sets the approval status of several profiles at once.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkApprovalDto {
    #[validate(length(min = 1))]
    pub ids: Vec<i64>,
    pub approval_status: ApprovalStatus,
}
