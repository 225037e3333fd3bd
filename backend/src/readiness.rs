//! Table readiness tracking
//!
//! Provisioning failures at startup don't stop the process; they leave the flag unset so
//! `/health` can report the service as not ready.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contact_storage::store::ContactStore;
use contact_storage::table::{ensure_table_exists, TableSpec, TableStatus};

/// Shared flag recording whether the contacts table is known to exist
#[derive(Debug, Clone, Default)]
pub struct Readiness {
    table_ready: Arc<AtomicBool>,
}

impl Readiness {
    /// Creates a flag in the not-ready state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records whether the table is ready
    pub fn set_table_ready(&self, ready: bool) {
        self.table_ready.store(ready, Ordering::SeqCst);
    }

    /// Whether the table is known to exist
    #[must_use]
    pub fn is_table_ready(&self) -> bool {
        self.table_ready.load(Ordering::SeqCst)
    }
}

/// Provisions the contacts table and records the outcome in `readiness`
///
/// Errors are logged and swallowed; the returned status is `None` when provisioning failed.
pub async fn provision_table(
    store: &dyn ContactStore,
    spec: &TableSpec,
    readiness: &Readiness,
) -> Option<TableStatus> {
    match ensure_table_exists(store, spec).await {
        Ok(status) => {
            tracing::info!(table = %spec.table_name, %status, "Contacts table ready");
            readiness.set_table_ready(true);
            Some(status)
        }
        Err(err) => {
            tracing::error!(table = %spec.table_name, "Error during database setup: {err}");
            readiness.set_table_ready(false);
            None
        }
    }
}
