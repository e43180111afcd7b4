//! # Aristokrat Core
//!
//! Core types, errors, and utilities shared by every Aristokrat crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-number pagination for list endpoints
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use aristokrat_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secret-password")?;
//! if !verify_password("secret-password", &hash)? {
//!     return Err(AppError::unauthorized("Invalid credentials"));
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

pub use errors::AppError;
pub use pagination::{PageMeta, PageParams};
pub use password::{hash_password, verify_password};
