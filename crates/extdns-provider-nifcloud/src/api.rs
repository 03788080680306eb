//! NIFCLOUD DNS API seam
//!
//! [`NifcloudApi`] covers the three calls the adapter makes against the
//! provider. The SDK client (authentication, signing, HTTP transport) lives
//! behind this trait and is injected into [`crate::NifcloudProvider`].

use async_trait::async_trait;
use extdns_core::ApiError;
use serde::Serialize;
use std::fmt;

/// A hosted zone as returned by the zone listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Identifier used to address the zone in later calls
    pub id: String,
    /// Domain the zone owns (e.g., "example.com")
    pub name: String,
}

impl Zone {
    /// Create a zone whose identifier is its name, as NIFCLOUD addresses zones
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }
}

/// A resource record set as returned by the record listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSet {
    pub name: String,
    pub record_type: String,
    pub set_identifier: Option<String>,
    pub ttl: u32,
    pub values: Vec<String>,
}

/// Action tag of a change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Create,
    Delete,
}

impl ChangeAction {
    /// Wire representation ("CREATE" / "DELETE")
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "CREATE",
            ChangeAction::Delete => "DELETE",
        }
    }

    /// Lowercase verb for log and error messages
    pub fn verb(&self) -> &'static str {
        match self {
            ChangeAction::Create => "create",
            ChangeAction::Delete => "delete",
        }
    }

    /// Error text NIFCLOUD returns when the record is already in the state
    /// this action asks for
    ///
    /// NIFCLOUD does not expose a dedicated error code for these conflicts,
    /// so detection relies on its message wording. Keep these strings in sync
    /// with the API if it ever rewords them.
    pub fn conflict_marker(&self) -> &'static str {
        match self {
            ChangeAction::Create => "REGISTERED RECORD",
            ChangeAction::Delete => "NO SUCH RECORD EXIST",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a change batch; always carries exactly one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRequest {
    pub action: ChangeAction,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub value: String,
}

/// Calls the adapter makes against NIFCLOUD DNS
///
/// Implementations own authentication and transport. They must not retry
/// change submissions on their own: a resubmitted create or delete can come
/// back as an idempotence conflict and be misread.
#[async_trait]
pub trait NifcloudApi: Send + Sync {
    /// List every hosted zone visible to the credentials
    async fn list_hosted_zones(&self) -> Result<Vec<Zone>, ApiError>;

    /// List every record set in the zone addressed by `zone_id`
    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, ApiError>;

    /// Submit one change batch to the zone addressed by `zone_id`
    async fn change_record_sets(
        &self,
        zone_id: &str,
        changes: &[ChangeRequest],
    ) -> Result<(), ApiError>;
}
