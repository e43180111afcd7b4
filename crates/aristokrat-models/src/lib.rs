//! # Aristokrat Models
//!
//! Domain models and DTOs for the Aristokrat API.
//!
//! # Modules
//!
//! - [`address`]: Apartment-number normalization and resident phone matching
//! - [`apartments`]: Apartments, list/detail views and admin action results
//! - [`auth`]: Login, refresh and token responses
//! - [`devices`]: Device kinds, rows and admin DTOs
//! - [`houses`]: Houses and entrances
//! - [`residents`]: Admin resident listing and bulk approval
//! - [`users`]: Users, resident profiles and the merged user view
//!
//! # Example
//!
//! ```ignore
//! use aristokrat_models::devices::DeviceKind;
//! use aristokrat_models::address::match_phone;
//!
//! let kind: DeviceKind = "lift_pass".parse()?;
//! assert!(kind.requires_entrance());
//! ```

pub mod address;
pub mod apartments;
pub mod auth;
pub mod devices;
pub mod houses;
pub mod residents;
pub mod users;

pub use address::{PhoneCandidate, match_phone, normalize_apartment_no};

pub use apartments::{
    Apartment, ApartmentDetail, ApartmentFilterParams, ApartmentListItem, ApartmentRow,
    ApprovalResult, BlockResult, CreateApartmentDto, PaginatedApartmentsResponse,
    UpdateApartmentDto,
};

pub use auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, looks_like_email};

pub use devices::{
    BulkDeviceStateDto, Device, DeviceFilterParams, DeviceKey, DeviceKind, DeviceToggleRequest,
    ENTRANCE_KINDS, GLOBAL_KINDS, MAX_ENTRANCES, SeedDevicesResponse, UpdatedCountResponse,
};

pub use houses::{Entrance, EntranceFilterParams, EntranceHouseRow, EntranceWithHouse, House};

pub use residents::{
    BulkApprovalDto, PaginatedResidentsResponse, ResidentFilterParams, ResidentWithUser,
};

pub use users::{
    ApprovalStatus, ChangePasswordRequest, PasswordStatus, ProfileMe, ResidentProfile,
    StatusResponse, UpdateProfileDto, User, UserResponse, UserStatus,
};
