//! # Aristokrat CLI
//!
//! Administration and seeding utilities used by the `aristokrat-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use aristokrat_cli::seeder::{seed_residents, ResidentSeedConfig};
//!
//! let report = seed_residents(&pool, ResidentSeedConfig::new(1)).await?;
//! ```

pub mod seeder;
