// # DNS Provider Trait
//
// Defines the interface the orchestrator-facing transport calls into.
//
// ## Implementations
//
// - NIFCLOUD: `extdns-provider-nifcloud` crate
//
// ## Usage
//
// ```rust,ignore
// use extdns_core::{Changes, DnsProvider, Endpoint};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let current = provider.records().await?;
//     let changes = Changes::new(
//         vec![Endpoint::new("www.example.com", "A", vec!["10.0.0.1".into()])],
//         Vec::new(),
//     );
//     provider.apply_changes(&changes).await?;
//
//     Ok(())
// }
// ```

use crate::endpoint::{Changes, Endpoint};
use crate::error::Result;
use async_trait::async_trait;

/// Trait for provider adapters
///
/// The orchestrator decides *what* should change; implementations decide how
/// to express that against one provider's API.
///
/// # Statelessness
///
/// Implementations must not cache provider state between calls. Every call
/// reads the live provider API, which stays the single source of truth.
///
/// # Cancellation
///
/// Dropping a returned future cancels the in-flight request. Batches already
/// submitted by `apply_changes` stay applied; there is no compensating
/// rollback.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every record the provider holds, in the neutral form
    ///
    /// Listing is all-or-nothing: any fetch failure yields an error and no
    /// partial inventory.
    async fn records(&self) -> Result<Vec<Endpoint>>;

    /// Apply a change set computed by the orchestrator
    ///
    /// Endpoints are applied one at a time. On a fatal failure the call
    /// returns immediately, leaving earlier endpoints applied.
    async fn apply_changes(&self, changes: &Changes) -> Result<()>;

    /// Let the provider normalise desired endpoints before planning
    ///
    /// The default leaves endpoints untouched.
    async fn adjust_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<Vec<Endpoint>> {
        Ok(endpoints)
    }

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
