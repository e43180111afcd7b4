use aristokrat_core::pagination::deserialize_optional_i64;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct House {
    pub id: i64,
    /// Building number, unique across the complex
    pub number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Entrance {
    pub id: i64,
    pub house_id: i64,
    pub number: i32,
}

/// Entrance joined with its house, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntranceWithHouse {
    pub id: i64,
    pub number: i32,
    pub house: House,
}

/// Flat row for `entrances JOIN houses`.
#[derive(Debug, Clone, FromRow)]
pub struct EntranceHouseRow {
    pub id: i64,
    pub number: i32,
    pub house_id: i64,
    pub house_number: i32,
}

impl From<EntranceHouseRow> for EntranceWithHouse {
    fn from(row: EntranceHouseRow) -> Self {
        Self {
            id: row.id,
            number: row.number,
            house: House {
                id: row.house_id,
                number: row.house_number,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntranceFilterParams {
    /// Only entrances of the house with this number
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub house: Option<i64>,
}
