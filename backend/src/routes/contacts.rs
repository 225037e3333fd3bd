//! Contact routes: add, list and delete

use std::sync::Arc;

use axum::{extract::Path, response::Redirect, Extension, Json};
use contact_storage::contact::{Contact, ContactStorage};
use serde::{Deserialize, Serialize};

use crate::types::{AppError, FormOrJson};

/// Username as sent by the client
///
/// Scalars are accepted and kept as their text form; nothing else is checked.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UsernameValue {
    /// String value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl UsernameValue {
    /// Text stored for this username
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

/// Request to add a contact
#[derive(Debug, Default, Deserialize)]
pub struct AddContactRequest {
    /// Username, stored without validation
    #[serde(default)]
    pub username: Option<UsernameValue>,
}

/// Response after deleting a contact
#[derive(Debug, Serialize)]
pub struct DeleteContactResponse {
    /// Always `true` on success
    pub success: bool,
}

/// Add a contact
///
/// Stores the username under a newly generated id and redirects to `/`.
///
/// # Errors
///
/// - `400 BAD_REQUEST` - Body is neither valid JSON nor a valid form
/// - `500 INTERNAL_SERVER_ERROR` - Storage operation fails
pub async fn add_contact(
    Extension(contact_storage): Extension<Arc<ContactStorage>>,
    FormOrJson(payload): FormOrJson<AddContactRequest>,
) -> Result<Redirect, AppError> {
    let username = payload.username.map(UsernameValue::into_text);
    let contact = contact_storage.insert(username).await?;
    tracing::info!(id = %contact.id, "Contact added");

    Ok(Redirect::to("/"))
}

/// List all contacts
///
/// Returns every stored contact in no particular order.
///
/// # Errors
///
/// - `500 INTERNAL_SERVER_ERROR` - Storage operation fails
pub async fn list_contacts(
    Extension(contact_storage): Extension<Arc<ContactStorage>>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = contact_storage.list_all().await?;

    Ok(Json(contacts))
}

/// Delete a contact by id
///
/// # Errors
///
/// - `404 NOT_FOUND` - No contact with this id exists
/// - `500 INTERNAL_SERVER_ERROR` - Storage operation fails
pub async fn delete_contact(
    Path(id): Path<String>,
    Extension(contact_storage): Extension<Arc<ContactStorage>>,
) -> Result<Json<DeleteContactResponse>, AppError> {
    contact_storage.delete(&id).await?;
    tracing::info!(id, "Contact deleted");

    Ok(Json(DeleteContactResponse { success: true }))
}
