//! Authentication and authorization.
//!
//! - [`auth`]: `AuthUser` and `AdminUser` extractors reading the Bearer token
//! - [`role`]: `require_admin` middleware for whole admin routers
//!
//! ```ignore
//! use crate::middleware::auth::{AdminUser, AuthUser};
//!
//! async fn me(auth_user: AuthUser) -> Result<Json<UserResponse>, AppError> {
//!     let user_id = auth_user.user_id()?;
//!     // ...
//! }
//!
//! async fn delete_apartment(AdminUser(_admin): AdminUser) { /* admins only */ }
//! ```

pub mod auth;
pub mod role;
