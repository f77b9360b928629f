/// Database models
///
/// Each model owns its SQL. Mutating operations accept any
/// `PgExecutor` so multi-table operations (registration + payment,
/// renewal + payment) can run inside one transaction.
///
/// # Models
///
/// - `admin`: staff/operator accounts
/// - `member`: gym members with expiry and status
/// - `payment_log`: append-only payment records
/// - `check_in`: append-only entry audit
/// - `body_metric`: dated body snapshots, upserted per day
/// - `workout_log`: append-only workout entries

pub mod admin;
pub mod body_metric;
pub mod check_in;
pub mod member;
pub mod payment_log;
pub mod workout_log;
