//! The NIFCLOUD reconciliation adapter
//!
//! [`NifcloudProvider`] implements [`DnsProvider`] on top of an injected
//! [`NifcloudApi`] client.
//!
//! ## Apply flow
//!
//! 1. Fetch the zone list once per call
//! 2. For every endpoint to create, then every endpoint to delete:
//!    resolve its zone, expand it into a batch, submit the batch
//! 3. Absorb rejections meaning "already in the requested state"
//! 4. Abort on any other rejection; earlier batches stay applied

use crate::api::{ChangeAction, NifcloudApi, Zone};
use crate::translate::{to_change_requests, to_endpoint};
use crate::zone::zone_of_record;
use async_trait::async_trait;
use extdns_core::{Changes, DnsProvider, Endpoint, Error, NifcloudConfig, Result};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Provider name reported to logs
pub const PROVIDER_NAME: &str = "nifcloud";

/// NIFCLOUD DNS provider
///
/// Stateless across calls: every `records` and `apply_changes` call reads the
/// zone list fresh from the API.
///
/// # Dry-Run Mode
///
/// When `dry_run` is set, the provider will:
/// - Fetch zones and resolve endpoints as usual
/// - Log the change batches it would submit
/// - **NOT** submit anything
pub struct NifcloudProvider {
    /// Injected API client
    api: Arc<dyn NifcloudApi>,

    /// Region the client talks to (informational)
    region: String,

    /// Dry-run mode: if true, resolve and log batches but skip submission
    dry_run: bool,

    /// Upper bound on one full `records` call
    records_timeout: Duration,
}

impl fmt::Debug for NifcloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NifcloudProvider")
            .field("region", &self.region)
            .field("dry_run", &self.dry_run)
            .field("records_timeout", &self.records_timeout)
            .finish_non_exhaustive()
    }
}

/// What happened to one endpoint during `apply_changes`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Applied,
    AlreadyApplied,
    ZoneNotFound,
    NoTargets,
    DryRun,
}

#[derive(Debug, Default)]
struct ApplySummary {
    applied: usize,
    already_applied: usize,
    skipped: usize,
}

impl ApplySummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Applied => self.applied += 1,
            Outcome::AlreadyApplied => self.already_applied += 1,
            Outcome::ZoneNotFound | Outcome::NoTargets | Outcome::DryRun => self.skipped += 1,
        }
    }
}

impl NifcloudProvider {
    /// Create a new NIFCLOUD provider
    ///
    /// # Parameters
    ///
    /// - `config`: Credentials and provider settings; validated here
    /// - `api`: Client for the NIFCLOUD DNS API, built by the caller from the
    ///   same credentials
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the access key id or secret is empty.
    pub fn new(config: &NifcloudConfig, api: Arc<dyn NifcloudApi>) -> Result<Self> {
        config.validate()?;

        if config.dry_run {
            warn!("NIFCLOUD provider running in DRY-RUN mode");
        }
        info!("NIFCLOUD provider initialised for region {}", config.region);

        Ok(Self {
            api,
            region: config.region.clone(),
            dry_run: config.dry_run,
            records_timeout: config.records_timeout(),
        })
    }

    /// Whether change batches are logged instead of submitted
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    async fn hosted_zones(&self) -> Result<Vec<Zone>> {
        self.api
            .list_hosted_zones()
            .await
            .map_err(Error::zone_listing)
    }

    async fn apply_endpoint(
        &self,
        zones: &[Zone],
        endpoint: &Endpoint,
        action: ChangeAction,
    ) -> Result<Outcome> {
        debug!("ApplyChanges {}: {:?}", action.verb(), endpoint);

        let Some(zone) = zone_of_record(zones, &endpoint.dns_name) else {
            info!("target zone for record {} is not found", endpoint.dns_name);
            return Ok(Outcome::ZoneNotFound);
        };

        let batch = to_change_requests(endpoint, action);
        if batch.is_empty() {
            info!(
                "record {} ({}) has no targets, skipping {}",
                endpoint.dns_name,
                endpoint.record_type,
                action.verb()
            );
            return Ok(Outcome::NoTargets);
        }

        if self.dry_run {
            info!(
                "[DRY-RUN] Would submit to zone {}: {}",
                zone.name,
                serde_json::to_string(&batch).unwrap_or_else(|e| format!("<{}>", e))
            );
            return Ok(Outcome::DryRun);
        }

        match self.api.change_record_sets(&zone.id, &batch).await {
            Ok(()) => Ok(Outcome::Applied),
            // Substring match on the API's wording; see ChangeAction::conflict_marker.
            Err(e) if e.mentions(action.conflict_marker()) => {
                debug!(
                    "record {} ({}) already in requested state, ignoring: {}",
                    endpoint.dns_name, endpoint.record_type, e
                );
                Ok(Outcome::AlreadyApplied)
            }
            Err(e) => Err(Error::change(action.verb(), endpoint, e)),
        }
    }

    async fn collect_records(&self) -> Result<Vec<Endpoint>> {
        let zones = self.hosted_zones().await?;

        let mut endpoints = Vec::new();
        for zone in &zones {
            let record_sets = self
                .api
                .list_record_sets(&zone.id)
                .await
                .map_err(|e| Error::record_listing(&zone.name, e))?;

            endpoints.extend(record_sets.iter().map(to_endpoint));
        }

        debug!(
            "Listed {} record(s) across {} zone(s)",
            endpoints.len(),
            zones.len()
        );
        Ok(endpoints)
    }
}

#[async_trait]
impl DnsProvider for NifcloudProvider {
    /// List every record set of every zone, zone by zone
    ///
    /// The whole listing is bounded by the configured records timeout.
    async fn records(&self) -> Result<Vec<Endpoint>> {
        tokio::time::timeout(self.records_timeout, self.collect_records())
            .await
            .map_err(|_| Error::Timeout(self.records_timeout))?
    }

    async fn apply_changes(&self, changes: &Changes) -> Result<()> {
        debug!(
            "ApplyChanges called: {} create, {} delete",
            changes.create.len(),
            changes.delete.len()
        );
        if !changes.update_old.is_empty() || !changes.update_new.is_empty() {
            debug!(
                "ignoring {} update(s); updates arrive as create/delete pairs",
                changes.update_new.len()
            );
        }

        let zones = self.hosted_zones().await?;

        let mut summary = ApplySummary::default();
        for endpoint in &changes.create {
            let outcome = self
                .apply_endpoint(&zones, endpoint, ChangeAction::Create)
                .await?;
            summary.record(outcome);
        }
        for endpoint in &changes.delete {
            let outcome = self
                .apply_endpoint(&zones, endpoint, ChangeAction::Delete)
                .await?;
            summary.record(outcome);
        }

        info!(
            "ApplyChanges finished: {} applied, {} already in place, {} skipped",
            summary.applied, summary.already_applied, summary.skipped
        );
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
