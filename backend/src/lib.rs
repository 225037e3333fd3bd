//! Contacts backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Table readiness flag and startup provisioning
pub mod readiness;

/// HTTP routes
pub mod routes;

/// Router assembly and serve loop
pub mod server;

/// Configuration, errors and extractors
pub mod types;
