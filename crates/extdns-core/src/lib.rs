// # extdns-core
//
// Core library for external-dns webhook providers.
//
// ## Architecture Overview
//
// This library holds everything a provider adapter shares with the transport
// that exposes it to the orchestrator:
// - **Endpoint / Changes**: The vendor-neutral record model and change set
// - **DnsProvider**: Trait for listing records and applying change sets
// - **Error**: Error type, including the wrapped provider API error
// - **Config**: Credential and process configuration read from the environment
//
// ## Design Principles
//
// 1. **Stateless**: Providers read the live API on every call
// 2. **Injected clients**: Provider API clients are passed in, never global
// 3. **Caller owns the plan**: Diffing desired vs actual state is not done here

pub mod config;
pub mod endpoint;
pub mod error;
pub mod traits;

// Re-export core types for convenience
pub use config::{NifcloudConfig, WebhookConfig};
pub use endpoint::{Changes, Endpoint, ProviderSpecificProperty};
pub use error::{ApiError, Error, Result};
pub use traits::DnsProvider;
