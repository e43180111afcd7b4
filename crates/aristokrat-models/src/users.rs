//! User and resident profile models.
//!
//! Every account is a [`User`]. Residents additionally have a
//! [`ResidentProfile`] holding their address, car and phone along with the
//! moderation and password flags. Most API responses merge the two into a
//! [`UserResponse`] or [`ProfileMe`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::devices::MAX_ENTRANCES;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ResidentProfile {
    pub id: i64,
    pub user_id: i64,
    /// `accepted` or `not_accepted`
    pub approval_status: String,
    /// `updated` or `not_updated`
    pub password_status: String,
    pub house_number: Option<i32>,
    pub entrance_no: Option<i16>,
    pub apartment_no: String,
    pub car_number: String,
    pub phone: String,
    pub is_active_resident: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Moderation state of a resident profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Accepted,
    NotAccepted,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::NotAccepted => "not_accepted",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "not_accepted" => Ok(Self::NotAccepted),
            other => Err(format!("unknown approval status: {other}")),
        }
    }
}

/// Whether the resident has replaced their seeded password.
///
/// Only ever moves from `NotUpdated` to `Updated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStatus {
    Updated,
    NotUpdated,
}

impl PasswordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::NotUpdated => "not_updated",
        }
    }
}

impl fmt::Display for PasswordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Blocked,
}

impl UserStatus {
    /// A user is active when the account is active and, if they have a
    /// resident profile, that profile is an active resident.
    pub fn resolve(user: &User, profile: Option<&ResidentProfile>) -> Self {
        let resident_active = profile.is_none_or(|p| p.is_active_resident);
        if user.is_active && resident_active {
            Self::Active
        } else {
            Self::Blocked
        }
    }
}

/// User representation returned by login and `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub house_number: Option<i32>,
    pub entrance_no: Option<i16>,
    pub apartment_no: String,
    pub car_number: String,
    pub phone: String,
    pub status: UserStatus,
    #[serde(rename = "adminFlag")]
    pub admin_flag: bool,
}

impl UserResponse {
    pub fn new(user: &User, profile: Option<&ResidentProfile>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            house_number: profile.and_then(|p| p.house_number),
            entrance_no: profile.and_then(|p| p.entrance_no),
            apartment_no: profile.map(|p| p.apartment_no.clone()).unwrap_or_default(),
            car_number: profile.map(|p| p.car_number.clone()).unwrap_or_default(),
            phone: profile.map(|p| p.phone.clone()).unwrap_or_default(),
            status: UserStatus::resolve(user, profile),
            admin_flag: user.is_admin,
        }
    }
}

/// Merged user and profile view served by `/api/profile/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfileMe {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub house_number: Option<i32>,
    pub entrance_no: Option<i16>,
    pub apartment_no: String,
    pub car_number: String,
    pub phone: String,
    pub status: UserStatus,
}

impl ProfileMe {
    pub fn new(user: &User, profile: &ResidentProfile) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            house_number: profile.house_number,
            entrance_no: profile.entrance_no,
            apartment_no: profile.apartment_no.clone(),
            car_number: profile.car_number.clone(),
            phone: profile.phone.clone(),
            status: UserStatus::resolve(user, Some(profile)),
        }
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Update for the current user's profile. Absent fields are left unchanged;
/// `house_number` and `entrance_no` may be set to `null`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_profile_update"))]
pub struct UpdateProfileDto {
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    /// Empty string clears the email
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<i32>)]
    pub house_number: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<i16>)]
    pub entrance_no: Option<Option<i16>>,
    #[validate(length(max = 10))]
    pub apartment_no: Option<String>,
    #[validate(length(max = 32))]
    pub car_number: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

fn validate_profile_update(dto: &UpdateProfileDto) -> Result<(), ValidationError> {
    if let Some(email) = &dto.email {
        if !email.is_empty() && !email.validate_email() {
            return Err(ValidationError::new("email").with_message("Enter a valid email".into()));
        }
    }
    if let Some(Some(entrance_no)) = dto.entrance_no {
        if !(1..=MAX_ENTRANCES).contains(&entrance_no) {
            return Err(ValidationError::new("entrance_no")
                .with_message(format!("Entrance must be between 1 and {MAX_ENTRANCES}").into()));
        }
    }
    if let Some(Some(house_number)) = dto.house_number {
        if house_number < 0 {
            return Err(ValidationError::new("house_number")
                .with_message("House number must not be negative".into()));
        }
    }
    Ok(())
}

/// Length and correctness are checked by the service so that both failures
/// answer `400`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// `{"status": ...}` body shared by the status endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}
