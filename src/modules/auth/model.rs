pub use aristokrat_models::auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
pub use aristokrat_models::users::UserResponse;
