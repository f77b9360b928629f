/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id hashing plus the `YYYYMMDD` default password
/// - [`session`]: Signed 7-day session tokens and the session cookie
/// - [`context`]: Caller identity passed explicitly into every operation
/// - [`guard`]: The route-guard contract for protected path prefixes

pub mod context;
pub mod guard;
pub mod password;
pub mod session;
