//! Apartment models and DTOs.

use aristokrat_core::pagination::deserialize_optional_i64;
use aristokrat_core::{PageMeta, PageParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::houses::{EntranceWithHouse, House};
use crate::users::ApprovalStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Apartment {
    pub id: i64,
    pub entrance_id: i64,
    pub number: String,
    pub owner_name: String,
    pub is_blocked: bool,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact apartment representation used by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ApartmentListItem {
    pub id: i64,
    pub number: String,
    pub is_blocked: bool,
}

/// Apartment joined with its entrance and house.
#[derive(Debug, Clone, FromRow)]
pub struct ApartmentRow {
    pub id: i64,
    pub number: String,
    pub owner_name: String,
    pub is_blocked: bool,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub entrance_id: i64,
    pub entrance_number: i32,
    pub house_id: i64,
    pub house_number: i32,
}

/// Full apartment view with the address and the phone of the current resident.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApartmentDetail {
    pub id: i64,
    pub number: String,
    pub owner_name: String,
    pub is_blocked: bool,
    pub note: String,
    pub entrance: EntranceWithHouse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Phone of the most recently updated active resident, empty when unknown
    pub phone: String,
}

impl ApartmentDetail {
    pub fn from_row(row: ApartmentRow, phone: String) -> Self {
        Self {
            id: row.id,
            number: row.number,
            owner_name: row.owner_name,
            is_blocked: row.is_blocked,
            note: row.note,
            entrance: EntranceWithHouse {
                id: row.entrance_id,
                number: row.entrance_number,
                house: House {
                    id: row.house_id,
                    number: row.house_number,
                },
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
            phone,
        }
    }
}

/// DTO for creating an apartment. Also used for full (`PUT`) updates.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateApartmentDto {
    pub entrance_id: i64,
    #[validate(length(min = 1, max = 10))]
    pub number: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub owner_name: String,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub note: String,
}

/// DTO for partial (`PATCH`) updates. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateApartmentDto {
    pub entrance_id: Option<i64>,
    #[validate(length(min = 1, max = 10))]
    pub number: Option<String>,
    #[validate(length(max = 200))]
    pub owner_name: Option<String>,
    pub is_blocked: Option<bool>,
    pub note: Option<String>,
}

/// Query parameters for the apartment list.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ApartmentFilterParams {
    /// House number
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub house: Option<i64>,
    /// Entrance number
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub entrance: Option<i64>,
    /// Case-insensitive substring of the apartment number
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedApartmentsResponse {
    pub data: Vec<ApartmentListItem>,
    pub meta: PageMeta,
}

/// Result of accepting or rejecting the residents of an apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApprovalResult {
    pub updated_profiles: u64,
    pub approval_status: ApprovalStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BlockResult {
    pub id: i64,
    pub is_blocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_defaults() {
        let dto: CreateApartmentDto =
            serde_json::from_str(r#"{"entrance_id": 3, "number": "101"}"#).unwrap();
        assert_eq!(dto.owner_name, "");
        assert!(!dto.is_blocked);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_long_number() {
        let dto: CreateApartmentDto =
            serde_json::from_str(r#"{"entrance_id": 3, "number": "12345678901"}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_approval_result_serializes_status() {
        let result = ApprovalResult {
            updated_profiles: 2,
            approval_status: ApprovalStatus::Accepted,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"updated_profiles": 2, "approval_status": "accepted"})
        );
    }
}
