//! # GymDesk API Server Library
//!
//! Axum HTTP server for the GymDesk membership service.
//!
//! ## Modules
//!
//! - `app`: Application state, router, and the session-guard middleware
//! - `config`: Environment-driven configuration
//! - `error`: Error handling and HTTP response mapping
//! - `response`: The uniform `{success, message?, data?}` result shape
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
