//! # GymDesk Shared Library
//!
//! Shared domain logic and data access for the GymDesk membership service.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their SQL operations
//! - `auth`: Sessions, password hashing, and the route-guard contract
//! - `clock`: Injected calendar/timezone dependency for all day-boundary math
//! - `membership`: Renewal plans and expiry-date arithmetic
//! - `checkin`: Check-in day aggregation helpers
//! - `bmi`: BMI derivation and bands
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod bmi;
pub mod checkin;
pub mod clock;
pub mod db;
pub mod membership;
pub mod models;

/// Current version of the GymDesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
