/// Contact handlers
pub mod contacts;
/// Health check handler
pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

/// Creates the router with all handler routes
///
/// Handlers expect `Arc<ContactStorage>` and `Readiness` to be provided as extensions.
pub fn handler() -> Router {
    Router::new()
        .route("/add", post(contacts::add_contact))
        .route("/contacts", get(contacts::list_contacts))
        .route("/delete/{id}", delete(contacts::delete_contact))
        .route("/health", get(health::handler))
}
