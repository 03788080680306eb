//! Core traits for webhook providers
//!
//! This module defines the abstract interface every provider adapter implements.
//!
//! - [`DnsProvider`]: List records and apply change sets against one provider

pub mod dns_provider;

pub use dns_provider::DnsProvider;
