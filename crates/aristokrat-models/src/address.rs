//! Matching between apartments and resident profiles.
//!
//! Profiles store their address as plain numbers and a free-form apartment
//! string rather than a foreign key, so the link is resolved by comparing
//! apartment numbers. Two numbers match when they are equal after trimming,
//! or failing that, after also stripping leading zeros (`"007"` matches `"7"`).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// SQL form of [`normalize_apartment_no`] applied to `resident_profiles.apartment_no`.
///
/// Compare it against a parameter that was normalized in Rust.
pub const NORMALIZED_APARTMENT_NO_SQL: &str =
    "COALESCE(NULLIF(LTRIM(BTRIM(apartment_no), '0'), ''), '0')";

/// Trims whitespace and strips leading zeros. An empty or all-zero number
/// normalizes to `"0"`.
pub fn normalize_apartment_no(raw: &str) -> &str {
    let stripped = raw.trim().trim_start_matches('0');
    if stripped.is_empty() { "0" } else { stripped }
}

/// A resident phone together with the apartment number it was registered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PhoneCandidate {
    pub phone: String,
    pub apartment_no: String,
}

/// Picks the phone for `apartment_no` among `candidates`.
///
/// Candidates are expected newest first; the first exact match wins, then the
/// first normalized match.
pub fn match_phone<'a>(candidates: &'a [PhoneCandidate], apartment_no: &str) -> Option<&'a str> {
    let exact = apartment_no.trim();
    let normalized = normalize_apartment_no(apartment_no);

    candidates
        .iter()
        .find(|c| c.apartment_no.trim() == exact)
        .or_else(|| {
            candidates
                .iter()
                .find(|c| normalize_apartment_no(&c.apartment_no) == normalized)
        })
        .map(|c| c.phone.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(phone: &str, apartment_no: &str) -> PhoneCandidate {
        PhoneCandidate {
            phone: phone.to_string(),
            apartment_no: apartment_no.to_string(),
        }
    }

    #[test]
    fn test_normalize_strips_leading_zeros() {
        assert_eq!(normalize_apartment_no("007"), "7");
        assert_eq!(normalize_apartment_no(" 0120 "), "120");
        assert_eq!(normalize_apartment_no("12a"), "12a");
    }

    #[test]
    fn test_normalize_empty_and_zero() {
        assert_eq!(normalize_apartment_no(""), "0");
        assert_eq!(normalize_apartment_no("   "), "0");
        assert_eq!(normalize_apartment_no("000"), "0");
    }

    #[test]
    fn test_exact_match_preferred_over_normalized() {
        let candidates = vec![candidate("+111", "7"), candidate("+222", "007")];
        assert_eq!(match_phone(&candidates, "007"), Some("+222"));
    }

    #[test]
    fn test_normalized_match_when_no_exact() {
        let candidates = vec![candidate("+111", "8"), candidate("+222", "7")];
        assert_eq!(match_phone(&candidates, "007"), Some("+222"));
    }

    #[test]
    fn test_first_candidate_wins_ties() {
        let candidates = vec![candidate("+newest", " 15 "), candidate("+older", "15")];
        assert_eq!(match_phone(&candidates, "15"), Some("+newest"));
    }

    #[test]
    fn test_no_match() {
        let candidates = vec![candidate("+111", "70")];
        assert_eq!(match_phone(&candidates, "7"), None);
        assert_eq!(match_phone(&[], "7"), None);
    }
}
