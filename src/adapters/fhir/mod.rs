//! FHIR endpoint adapter
//!
//! This module provides the integration with the downstream FHIR server:
//! the HTTP client that POSTs bundles, the endpoint trait used to mock it
//! in tests, and the background dispatcher that delivers bundles
//! asynchronously.

pub mod client;
pub mod dispatcher;

pub use client::{BundleEndpoint, FhirClient};
pub use dispatcher::{DispatchHandle, DispatchJob, Dispatcher};
