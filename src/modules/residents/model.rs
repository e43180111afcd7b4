pub use aristokrat_models::devices::UpdatedCountResponse;
pub use aristokrat_models::residents::{
    BulkApprovalDto, PaginatedResidentsResponse, ResidentFilterParams, ResidentWithUser,
};
pub use aristokrat_models::users::ApprovalStatus;
