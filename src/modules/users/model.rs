pub use aristokrat_models::users::{
    ApprovalStatus, ChangePasswordRequest, PasswordStatus, ProfileMe, ResidentProfile,
    StatusResponse, UpdateProfileDto, User, UserResponse, UserStatus,
};
