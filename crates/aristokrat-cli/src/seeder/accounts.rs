use std::ops::RangeInclusive;

/// Apartment numbers served by each entrance of a house.
pub const ENTRANCE_RANGES: [(i16, RangeInclusive<i32>); 8] = [
    (1, 1..=40),
    (2, 41..=98),
    (3, 99..=136),
    (4, 137..=176),
    (5, 177..=220),
    (6, 221..=264),
    (7, 265..=308),
    (8, 309..=352),
];

/// Entrance serving apartment `apartment`, if any.
pub fn entrance_for(apartment: i32) -> Option<i16> {
    ENTRANCE_RANGES
        .iter()
        .find(|(_, range)| range.contains(&apartment))
        .map(|(entrance, _)| *entrance)
}

/// One seeded resident login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidentAccount {
    pub entrance: i16,
    pub apartment: i32,
}

impl ResidentAccount {
    /// `<apartment>-<entrance>`, e.g. `125-3`.
    pub fn username(&self) -> String {
        format!("{}-{}", self.apartment, self.entrance)
    }

    /// The initial password is the apartment number.
    pub fn password(&self) -> String {
        self.apartment.to_string()
    }

    pub fn apartment_no(&self) -> String {
        self.apartment.to_string()
    }
}

/// Every apartment of a house, in entrance order.
pub fn resident_accounts() -> Vec<ResidentAccount> {
    ENTRANCE_RANGES
        .iter()
        .flat_map(|(entrance, range)| {
            range.clone().map(move |apartment| ResidentAccount {
                entrance: *entrance,
                apartment,
            })
        })
        .collect()
}
