// # NIFCLOUD DNS Provider
//
// This crate provides the NIFCLOUD DNS reconciliation adapter for
// external-dns webhook hosts.
//
// ## Components
//
// - **Zone resolution** (`zone`): record name -> owning hosted zone
// - **Translation** (`translate`): endpoint <-> change requests / record sets
// - **Provider** (`provider`): `apply_changes` and `records` on top of an
//   injected `NifcloudApi` client
//
// ## Idempotence
//
// NIFCLOUD reports "create of an existing record" and "delete of a missing
// record" as errors. The provider treats those two rejections as success so
// that replaying a change set is harmless; every other rejection aborts the
// call.
//
// ## Security Requirements
//
// - The secret access key NEVER appears in logs or Debug output
// - Provider construction fails fast if either credential is empty
//
// ## API Reference
//
// - NIFCLOUD DNS: https://docs.nifcloud.com/cp/api/dns/
// - ListHostedZones, ListResourceRecordSets, ChangeResourceRecordSets

pub mod api;
pub mod provider;
pub mod translate;
pub mod zone;

pub use api::{ChangeAction, ChangeRequest, NifcloudApi, RecordSet, Zone};
pub use provider::{NifcloudProvider, PROVIDER_NAME};
pub use translate::{DEFAULT_TTL, effective_ttl, to_change_requests, to_endpoint};
pub use zone::zone_of_record;
