//! # Aristokrat Auth
//!
//! JWT claim structures and token helpers.
//!
//! Login issues a pair of tokens signed with the same secret:
//!
//! - **Access token** ([`Claims`]): short-lived, sent as `Authorization: Bearer`
//! - **Refresh token** ([`RefreshTokenClaims`]): long-lived, kept in an
//!   httpOnly cookie and exchanged for new access tokens
//!
//! Each token carries a `token_type` so one kind can never be replayed as the
//! other.

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims, TokenType};
pub use jwt::{
    TokenPair, create_access_token, create_refresh_token, create_token_pair,
    verify_refresh_token, verify_token,
};
