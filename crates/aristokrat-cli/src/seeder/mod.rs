//! Idempotent seeding of the residential complex.
//!
//! Running any seeder twice leaves the database unchanged the second time,
//! apart from the optional reset flags.

mod accounts;
mod devices;
mod residents;

pub use accounts::{ENTRANCE_RANGES, ResidentAccount, entrance_for, resident_accounts};
pub use devices::seed_devices;
pub use residents::{ResidentSeedConfig, ResidentSeedReport, seed_residents};
