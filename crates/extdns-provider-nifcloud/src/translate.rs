//! Translation between neutral endpoints and NIFCLOUD record sets
//!
//! The two directions are deliberately not inverses for TXT ownership
//! markers. NIFCLOUD rejects `"` inside values, so outbound values lose their
//! quotes; inbound, values starting with `heritage` get them back because the
//! orchestrator only recognises its ownership records in quoted form.

use crate::api::{ChangeAction, ChangeRequest, RecordSet};
use extdns_core::Endpoint;

/// TTL used when an endpoint leaves it unspecified (in seconds)
pub const DEFAULT_TTL: u32 = 3600;

/// Prefix of the orchestrator's ownership-marker TXT values
const HERITAGE_PREFIX: &str = "heritage";

/// TTL to send for an endpoint TTL of `ttl`
pub fn effective_ttl(ttl: u32) -> u32 {
    if ttl == 0 { DEFAULT_TTL } else { ttl }
}

/// Expand an endpoint into one change request per target
///
/// Every request shares the action, name, type and TTL; target order is
/// preserved. An endpoint with no targets yields an empty batch.
pub fn to_change_requests(endpoint: &Endpoint, action: ChangeAction) -> Vec<ChangeRequest> {
    let ttl = effective_ttl(endpoint.record_ttl);

    endpoint
        .targets
        .iter()
        .map(|target| ChangeRequest {
            action,
            name: endpoint.dns_name.clone(),
            record_type: endpoint.record_type.clone(),
            ttl,
            value: strip_quotes(target),
        })
        .collect()
}

/// Convert a listed record set into a neutral endpoint
pub fn to_endpoint(record_set: &RecordSet) -> Endpoint {
    Endpoint {
        dns_name: record_set.name.clone(),
        targets: record_set
            .values
            .iter()
            .map(|v| restore_quotes(v))
            .collect(),
        record_type: record_set.record_type.clone(),
        set_identifier: record_set.set_identifier.clone().unwrap_or_default(),
        record_ttl: record_set.ttl,
        ..Endpoint::default()
    }
}

fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

fn restore_quotes(value: &str) -> String {
    if value.starts_with(HERITAGE_PREFIX) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}
