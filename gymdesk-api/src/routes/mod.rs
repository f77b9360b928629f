/// Route handlers
///
/// # Modules
///
/// - `auth`: login/logout and the login-page stub
/// - `health`: liveness endpoint
/// - `dashboard`: admin and member dashboards
/// - `members`: admin-side member management
/// - `checkin`: front-desk check-in
/// - `metrics`: member body metrics
/// - `workouts`: member workout log
/// - `admins`: admin account management
/// - `settings`: password changes and profile updates

pub mod admins;
pub mod auth;
pub mod checkin;
pub mod dashboard;
pub mod health;
pub mod members;
pub mod metrics;
pub mod settings;
pub mod workouts;
