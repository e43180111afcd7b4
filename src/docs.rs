use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use aristokrat_core::errors::ErrorResponse;
use aristokrat_core::{PageMeta, PageParams};
use aristokrat_models::apartments::{
    ApartmentDetail, ApartmentListItem, ApprovalResult, BlockResult, CreateApartmentDto,
    PaginatedApartmentsResponse, UpdateApartmentDto,
};
use aristokrat_models::auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use aristokrat_models::devices::{
    BulkDeviceStateDto, Device, DeviceKind, DeviceToggleRequest, SeedDevicesResponse,
    UpdatedCountResponse,
};
use aristokrat_models::houses::{Entrance, EntranceWithHouse, House};
use aristokrat_models::residents::{BulkApprovalDto, PaginatedResidentsResponse, ResidentWithUser};
use aristokrat_models::users::{
    ApprovalStatus, ChangePasswordRequest, PasswordStatus, ProfileMe, StatusResponse,
    UpdateProfileDto, UserResponse, UserStatus,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_me,
        crate::modules::users::controller::get_profile_me,
        crate::modules::users::controller::replace_profile_me,
        crate::modules::users::controller::update_profile_me,
        crate::modules::users::controller::get_password_status,
        crate::modules::users::controller::get_approval_status,
        crate::modules::users::controller::change_password,
        crate::modules::houses::controller::list_houses,
        crate::modules::houses::controller::list_entrances,
        crate::modules::apartments::controller::list_apartments,
        crate::modules::apartments::controller::get_apartment,
        crate::modules::apartments::controller::create_apartment,
        crate::modules::apartments::controller::replace_apartment,
        crate::modules::apartments::controller::update_apartment,
        crate::modules::apartments::controller::delete_apartment,
        crate::modules::apartments::controller::accept_apartment,
        crate::modules::apartments::controller::reject_apartment,
        crate::modules::apartments::controller::block_apartment,
        crate::modules::apartments::controller::unblock_apartment,
        crate::modules::devices::controller::get_entrance_device,
        crate::modules::devices::controller::set_entrance_device,
        crate::modules::devices::controller::get_global_device,
        crate::modules::devices::controller::set_global_device,
        crate::modules::devices::controller::list_devices,
        crate::modules::devices::controller::set_devices_state,
        crate::modules::devices::controller::seed_devices,
        crate::modules::residents::controller::list_residents,
        crate::modules::residents::controller::set_residents_approval,
    ),
    components(
        schemas(
            ErrorResponse,
            PageMeta,
            PageParams,
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            RefreshResponse,
            UserResponse,
            UserStatus,
            ProfileMe,
            UpdateProfileDto,
            ChangePasswordRequest,
            StatusResponse,
            ApprovalStatus,
            PasswordStatus,
            House,
            Entrance,
            EntranceWithHouse,
            ApartmentListItem,
            ApartmentDetail,
            CreateApartmentDto,
            UpdateApartmentDto,
            PaginatedApartmentsResponse,
            ApprovalResult,
            BlockResult,
            Device,
            DeviceKind,
            DeviceToggleRequest,
            BulkDeviceStateDto,
            UpdatedCountResponse,
            SeedDevicesResponse,
            ResidentWithUser,
            PaginatedResidentsResponse,
            BulkApprovalDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, token refresh and logout"),
        (name = "Profile", description = "The signed-in resident's profile and password"),
        (name = "Houses", description = "Houses and entrances"),
        (name = "Apartments", description = "Apartment registry and resident approval"),
        (name = "Devices", description = "Doors, lifts, gates and parking barrier toggles"),
        (name = "Admin", description = "Administrative device and resident management")
    ),
    info(
        title = "Aristokrat API",
        version = "0.1.0",
        description = "Residential complex backend: resident accounts, apartments and access devices.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
