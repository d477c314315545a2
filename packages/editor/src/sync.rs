//! # Template Sync
//!
//! Message envelope for pushing the edited document to a template service,
//! plus acknowledgement tracking. Transport is the caller's business.
//!
//! ```text
//! store edits ──► sync_message() ──► (socket) ──► SyncResponse ──► acknowledge()
//!   version N        in flight: N                                  synced: N
//! ```

use serde::{Deserialize, Serialize};
use stencil_tree::Document;
use tracing::{debug, warn};

/// Outbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncMessage {
    #[serde(rename_all = "camelCase")]
    UpdateTemplateData {
        template_id: u64,
        template_data: Document,
    },
}

/// Service reply: `{"success": ..}` or `{"error": ..}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyncResponse {
    Success { success: String },
    Error { error: String },
}

/// Tracks which document version the service has confirmed
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    synced_version: u64,
    in_flight: Option<u64>,
}

impl SyncState {
    pub fn is_dirty(&self, version: u64) -> bool {
        version != self.synced_version
    }

    pub fn synced_version(&self) -> u64 {
        self.synced_version
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Record that `version` was sent; a newer send replaces an older one
    pub fn begin(&mut self, version: u64) {
        self.in_flight = Some(version);
    }

    /// Apply the service reply. Returns true when a version became synced.
    pub fn acknowledge(&mut self, response: &SyncResponse) -> bool {
        match (self.in_flight.take(), response) {
            (Some(version), SyncResponse::Success { success }) => {
                debug!(version, message = %success, "template synced");
                self.synced_version = version;
                true
            }
            (None, SyncResponse::Success { .. }) => false,
            (_, SyncResponse::Error { error }) => {
                warn!(error = %error, "template sync rejected");
                false
            }
        }
    }

    /// Treat `version` as confirmed without a round trip (e.g. after a load)
    pub fn mark_synced(&mut self, version: u64) {
        self.synced_version = version;
        self.in_flight = None;
    }
}
