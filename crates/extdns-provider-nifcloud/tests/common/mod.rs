//! Test doubles and common utilities for provider contract tests
//!
//! `FakeNifcloudApi` stands in for the NIFCLOUD SDK client: it serves a fixed
//! zone and record inventory, records every change batch it accepts, and can
//! be scripted to reject specific calls the way the real API does.

#![allow(dead_code)]

use async_trait::async_trait;
use extdns_core::{ApiError, Endpoint, NifcloudConfig};
use extdns_provider_nifcloud::{
    ChangeAction, ChangeRequest, NifcloudApi, NifcloudProvider, RecordSet, Zone,
};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::subscriber::DefaultGuard;

const UNKNOWN_ZONE: &str = "Client.InvalidParameterNotFound.ZoneID";

/// Install a test-friendly tracing subscriber (once per test binary)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Log output of a thread-scoped subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Record events at `level` and above on the current thread until the
    /// returned guard drops
    pub fn at_level(level: tracing::Level) -> (Self, DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A change batch accepted by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedBatch {
    pub zone_id: String,
    pub changes: Vec<ChangeRequest>,
}

/// In-memory NIFCLOUD DNS API
#[derive(Default)]
pub struct FakeNifcloudApi {
    zones: Vec<Zone>,
    record_sets: HashMap<String, Vec<RecordSet>>,
    zone_list_error: Option<ApiError>,
    record_list_errors: HashMap<String, ApiError>,
    change_errors: HashMap<(ChangeAction, String), ApiError>,
    change_delays: HashMap<String, Duration>,
    list_delay: Option<Duration>,

    submitted: Mutex<Vec<SubmittedBatch>>,
    zone_list_calls: AtomicUsize,
    record_list_calls: Mutex<Vec<String>>,
    change_calls: AtomicUsize,
}

impl FakeNifcloudApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone addressed by its name
    pub fn with_zone(self, name: &str) -> Self {
        self.with_zone_id(name, name)
    }

    /// Add a zone with a distinct identifier
    pub fn with_zone_id(mut self, id: &str, name: &str) -> Self {
        self.zones.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.record_sets.entry(id.to_string()).or_default();
        self
    }

    /// Add a record set to the zone addressed by `zone_id`
    pub fn with_record_set(mut self, zone_id: &str, record_set: RecordSet) -> Self {
        self.record_sets
            .entry(zone_id.to_string())
            .or_default()
            .push(record_set);
        self
    }

    /// Make the zone listing fail
    pub fn failing_zone_list(mut self, error: ApiError) -> Self {
        self.zone_list_error = Some(error);
        self
    }

    /// Make the record listing of `zone_id` fail
    pub fn failing_record_list(mut self, zone_id: &str, error: ApiError) -> Self {
        self.record_list_errors.insert(zone_id.to_string(), error);
        self
    }

    /// Reject `action` batches for record `name` with `error`
    pub fn failing_change(mut self, action: ChangeAction, name: &str, error: ApiError) -> Self {
        self.change_errors.insert((action, name.to_string()), error);
        self
    }

    /// Reject creates of `name` the way NIFCLOUD does for existing records
    pub fn already_registered(self, name: &str) -> Self {
        self.failing_change(ChangeAction::Create, name, registered_record_error(name))
    }

    /// Reject deletes of `name` the way NIFCLOUD does for missing records
    pub fn already_absent(self, name: &str) -> Self {
        self.failing_change(ChangeAction::Delete, name, no_such_record_error(name))
    }

    /// Delay every listing call
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Delay change submissions for record `name`
    pub fn with_change_delay(mut self, name: &str, delay: Duration) -> Self {
        self.change_delays.insert(name.to_string(), delay);
        self
    }

    /// Change batches accepted so far, in submission order
    pub fn submitted(&self) -> Vec<SubmittedBatch> {
        self.submitted.lock().unwrap().clone()
    }

    /// Every accepted change request, flattened
    pub fn submitted_changes(&self) -> Vec<ChangeRequest> {
        self.submitted()
            .into_iter()
            .flat_map(|batch| batch.changes)
            .collect()
    }

    /// Record names of every accepted change request
    pub fn submitted_names(&self) -> Vec<String> {
        self.submitted_changes()
            .into_iter()
            .map(|change| change.name)
            .collect()
    }

    pub fn zone_list_calls(&self) -> usize {
        self.zone_list_calls.load(Ordering::SeqCst)
    }

    pub fn record_list_calls(&self) -> Vec<String> {
        self.record_list_calls.lock().unwrap().clone()
    }

    /// Submissions attempted, including rejected ones
    pub fn change_calls(&self) -> usize {
        self.change_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NifcloudApi for FakeNifcloudApi {
    async fn list_hosted_zones(&self) -> Result<Vec<Zone>, ApiError> {
        self.zone_list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.zone_list_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.zones.clone()),
        }
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, ApiError> {
        self.record_list_calls
            .lock()
            .unwrap()
            .push(zone_id.to_string());
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.record_list_errors.get(zone_id) {
            return Err(error.clone());
        }
        match self.record_sets.get(zone_id) {
            Some(record_sets) => Ok(record_sets.clone()),
            None => Err(ApiError::with_code(UNKNOWN_ZONE, zone_id)),
        }
    }

    async fn change_record_sets(
        &self,
        zone_id: &str,
        changes: &[ChangeRequest],
    ) -> Result<(), ApiError> {
        self.change_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(first) = changes.first() {
            if let Some(delay) = self.change_delays.get(&first.name) {
                tokio::time::sleep(*delay).await;
            }
            if let Some(error) = self.change_errors.get(&(first.action, first.name.clone())) {
                return Err(error.clone());
            }
        }

        self.submitted.lock().unwrap().push(SubmittedBatch {
            zone_id: zone_id.to_string(),
            changes: changes.to_vec(),
        });
        Ok(())
    }
}

pub fn registered_record_error(name: &str) -> ApiError {
    ApiError::with_code(
        "Client.InvalidParameterDuplicate.Record",
        format!(
            "The specified record is already registered. {} : REGISTERED RECORD",
            name
        ),
    )
}

pub fn no_such_record_error(name: &str) -> ApiError {
    ApiError::with_code(
        "Client.InvalidParameterNotFound.Record",
        format!(
            "The specified record does not exist. {} : NO SUCH RECORD EXIST",
            name
        ),
    )
}

/// Build a provider over `api` with valid test credentials
pub fn provider_over(api: &Arc<FakeNifcloudApi>) -> NifcloudProvider {
    provider_with_config(api, NifcloudConfig::new("TEST_ACCESS_KEY", "test-secret"))
}

pub fn provider_with_config(
    api: &Arc<FakeNifcloudApi>,
    config: NifcloudConfig,
) -> NifcloudProvider {
    NifcloudProvider::new(&config, api.clone())
        .expect("valid test credentials")
}

pub fn a_record(name: &str, targets: &[&str]) -> Endpoint {
    endpoint(name, "A", targets)
}

pub fn endpoint(name: &str, record_type: &str, targets: &[&str]) -> Endpoint {
    Endpoint::new(
        name,
        record_type,
        targets.iter().map(|t| t.to_string()).collect(),
    )
}

pub fn record_set(name: &str, record_type: &str, ttl: u32, values: &[&str]) -> RecordSet {
    RecordSet {
        name: name.to_string(),
        record_type: record_type.to_string(),
        set_identifier: None,
        ttl,
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}
