pub use aristokrat_models::address::{
    NORMALIZED_APARTMENT_NO_SQL, PhoneCandidate, match_phone, normalize_apartment_no,
};
pub use aristokrat_models::apartments::{
    ApartmentDetail, ApartmentFilterParams, ApartmentListItem, ApartmentRow, ApprovalResult,
    BlockResult, CreateApartmentDto, PaginatedApartmentsResponse, UpdateApartmentDto,
};
pub use aristokrat_models::users::ApprovalStatus;
