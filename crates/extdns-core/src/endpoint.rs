//! Vendor-neutral DNS record model
//!
//! [`Endpoint`] and [`Changes`] are the units exchanged with the external-dns
//! orchestrator. Field names on the wire follow the orchestrator's JSON
//! encoding so the types can be handed to any transport unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A DNS record in the orchestrator's vendor-neutral form
///
/// An endpoint with N targets stands for N provider-side values sharing the
/// same name and record type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Fully-qualified record name (e.g., "www.example.com")
    pub dns_name: String,

    /// Target values, in order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub targets: Vec<String>,

    /// Record type (e.g., "A", "CNAME", "TXT")
    pub record_type: String,

    /// Routing-policy set identifier; empty when unused
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub set_identifier: String,

    /// TTL in seconds; 0 means "use the provider default"
    #[serde(rename = "recordTTL", default, skip_serializing_if = "is_zero")]
    pub record_ttl: u32,

    /// Orchestrator-owned labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Provider-specific properties attached by the orchestrator
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_specific: Vec<ProviderSpecificProperty>,
}

impl Endpoint {
    /// Create a new endpoint with no TTL and no set identifier
    pub fn new(
        dns_name: impl Into<String>,
        record_type: impl Into<String>,
        targets: Vec<String>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            targets,
            record_type: record_type.into(),
            ..Self::default()
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.record_ttl = ttl;
        self
    }

    /// Set the routing-policy set identifier
    pub fn with_set_identifier(mut self, set_identifier: impl Into<String>) -> Self {
        self.set_identifier = set_identifier.into();
        self
    }
}

/// A name/value pair the orchestrator passes through to providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpecificProperty {
    pub name: String,
    pub value: String,
}

/// The change set computed by the orchestrator for one reconciliation call
///
/// Only `create` and `delete` are acted upon. The update lists are accepted so
/// that the orchestrator's payload deserializes, but this adapter expresses
/// every change as a create or a delete and leaves them untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Changes {
    /// Endpoints to create
    #[serde(default, deserialize_with = "null_as_empty")]
    pub create: Vec<Endpoint>,

    /// Previous state of updated endpoints (ignored)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub update_old: Vec<Endpoint>,

    /// New state of updated endpoints (ignored)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub update_new: Vec<Endpoint>,

    /// Endpoints to delete
    #[serde(default, deserialize_with = "null_as_empty")]
    pub delete: Vec<Endpoint>,
}

impl Changes {
    /// Create a change set from its create and delete lists
    pub fn new(create: Vec<Endpoint>, delete: Vec<Endpoint>) -> Self {
        Self {
            create,
            delete,
            ..Self::default()
        }
    }

    /// True when there is nothing to create or delete
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.delete.is_empty()
    }
}

fn is_zero(ttl: &u32) -> bool {
    *ttl == 0
}

// The orchestrator encodes empty lists as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
