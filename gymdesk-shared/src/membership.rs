/// Membership lifecycle rules
///
/// Renewal plans, expiry-date arithmetic, and the derived `days_remaining`
/// value. Expiry is never a stored state: "EXPIRED" is a display label
/// computed from `expiry_date` against a reference instant.
///
/// # Expiry extension rule
///
/// Renewing stacks onto an unexpired membership and restarts an expired
/// one: `new_expiry == max(now, old_expiry) + plan_days`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::member::MemberStatus;

/// Default sign-up length in days when none is given
pub const DEFAULT_SIGNUP_DAYS: i64 = 365;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Fixed renewal plan table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RenewalPlan {
    Month,
    Season,
    Year,
}

impl RenewalPlan {
    /// Days the plan adds to the expiry date
    pub fn days(&self) -> i64 {
        match self {
            RenewalPlan::Month => 30,
            RenewalPlan::Season => 90,
            RenewalPlan::Year => 365,
        }
    }

    /// Plan price in yuan
    pub fn price(&self) -> f64 {
        match self {
            RenewalPlan::Month => 300.0,
            RenewalPlan::Season => 900.0,
            RenewalPlan::Year => 2000.0,
        }
    }

    /// Payment-log note for a renewal under this plan
    pub fn notes(&self) -> &'static str {
        match self {
            RenewalPlan::Month => "monthly renewal",
            RenewalPlan::Season => "quarterly renewal",
            RenewalPlan::Year => "annual renewal",
        }
    }
}

/// Computes the expiry date after adding `days` of membership
///
/// Unexpired memberships extend from their current expiry (stacking);
/// expired ones restart from `now`.
pub fn extend_expiry(now: DateTime<Utc>, current_expiry: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    let base = if current_expiry >= now { current_expiry } else { now };
    base + Duration::days(days)
}

/// Derived days-remaining value: `ceil((expiry - now) / 1 day)`
///
/// Zero means the membership expires today and still admits; negative
/// values count whole days since expiry.
pub fn days_remaining(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (expiry - now).num_seconds();
    let mut days = secs.div_euclid(SECONDS_PER_DAY);
    if secs.rem_euclid(SECONDS_PER_DAY) > 0 {
        days += 1;
    }
    days
}

/// Display-only status label; never persisted
pub fn display_status(status: MemberStatus, days_remaining: i64) -> &'static str {
    match status {
        MemberStatus::Banned => "BANNED",
        MemberStatus::Active if days_remaining < 0 => "EXPIRED",
        MemberStatus::Active => "ACTIVE",
    }
}
