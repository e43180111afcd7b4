//! Device models.
//!
//! A device is a single on/off switch identified by its kind and, for
//! entrance-scoped kinds, the entrance number. The database enforces the same
//! pairing rules through the `device_entrance_rules` check constraint.

use std::fmt;
use std::str::FromStr;

use aristokrat_core::pagination::deserialize_optional_i64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Number of entrances per house.
pub const MAX_ENTRANCES: i16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Door,
    LiftPass,
    LiftGruz,
    Kalitka1,
    Kalitka2,
    Kalitka3,
    Kalitka4,
    Parking,
}

/// Kinds that exist once per entrance.
pub const ENTRANCE_KINDS: [DeviceKind; 3] =
    [DeviceKind::Door, DeviceKind::LiftPass, DeviceKind::LiftGruz];

/// Kinds that exist once for the whole complex.
pub const GLOBAL_KINDS: [DeviceKind; 5] = [
    DeviceKind::Kalitka1,
    DeviceKind::Kalitka2,
    DeviceKind::Kalitka3,
    DeviceKind::Kalitka4,
    DeviceKind::Parking,
];

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::LiftPass => "lift_pass",
            Self::LiftGruz => "lift_gruz",
            Self::Kalitka1 => "kalitka1",
            Self::Kalitka2 => "kalitka2",
            Self::Kalitka3 => "kalitka3",
            Self::Kalitka4 => "kalitka4",
            Self::Parking => "parking",
        }
    }

    pub fn requires_entrance(&self) -> bool {
        ENTRANCE_KINDS.contains(self)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ENTRANCE_KINDS
            .iter()
            .chain(GLOBAL_KINDS.iter())
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown device kind: {s}"))
    }
}

/// A validated `(kind, entrance)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceKey {
    pub kind: DeviceKind,
    pub entrance_no: Option<i16>,
}

impl DeviceKey {
    /// Resolves the path of an entrance device route. Returns `None` for
    /// unknown or global kinds and for entrance numbers outside `1..=8`.
    pub fn entrance(kind: &str, entrance_no: &str) -> Option<Self> {
        let kind: DeviceKind = kind.parse().ok()?;
        let entrance_no: i16 = entrance_no.trim().parse().ok()?;
        if !kind.requires_entrance() || !(1..=MAX_ENTRANCES).contains(&entrance_no) {
            return None;
        }
        Some(Self {
            kind,
            entrance_no: Some(entrance_no),
        })
    }

    /// Resolves the path of a global device route.
    pub fn global(kind: &str) -> Option<Self> {
        let kind: DeviceKind = kind.parse().ok()?;
        if kind.requires_entrance() {
            return None;
        }
        Some(Self {
            kind,
            entrance_no: None,
        })
    }

    /// Every device a fully equipped complex has.
    pub fn defaults() -> Vec<Self> {
        let per_entrance = ENTRANCE_KINDS.iter().flat_map(|&kind| {
            (1..=MAX_ENTRANCES).map(move |no| Self {
                kind,
                entrance_no: Some(no),
            })
        });
        let global = GLOBAL_KINDS.iter().map(|&kind| Self {
            kind,
            entrance_no: None,
        });
        per_entrance.chain(global).collect()
    }
}

/// Body of a device toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeviceToggleRequest {
    pub state: bool,
}

impl DeviceToggleRequest {
    /// Accepts only a JSON object whose `state` is a boolean. Anything else,
    /// including arrays and `"state": "true"`, yields `None`.
    pub fn parse(body: &[u8]) -> Option<bool> {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => map.get("state").and_then(|v| v.as_bool()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Device {
    pub id: i64,
    pub kind: String,
    pub entrance_no: Option<i16>,
    pub state: bool,
    pub updated_at: DateTime<Utc>,
}

/// Filters for the admin device list.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DeviceFilterParams {
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub entrance_no: Option<i64>,
    pub state: Option<bool>,
}

/// Turns a set of devices on or off.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkDeviceStateDto {
    #[validate(length(min = 1))]
    pub ids: Vec<i64>,
    pub state: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedCountResponse {
    pub updated: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeedDevicesResponse {
    /// Devices that did not exist before
    pub created: u64,
}
