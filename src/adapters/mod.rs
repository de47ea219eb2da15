//! External system integrations for Triage.
//!
//! This module provides adapters for integrating with external systems:
//!
//! - [`fhir`] - FHIR server integration (bundle delivery over HTTP)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The FHIR layer exposes the
//! [`fhir::BundleEndpoint`] trait so the dispatcher can run against an
//! in-memory double in tests.
//!
//! # FHIR Adapter
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use triage::adapters::fhir::{Dispatcher, FhirClient};
//! use triage::config::{DispatchConfig, FhirConfig};
//!
//! let config = FhirConfig {
//!     base_url: "https://fhir.example.com".to_string(),
//!     timeout_seconds: 30,
//!     username: None,
//!     password: None,
//!     tls_verify: true,
//! };
//!
//! let client = Arc::new(FhirClient::new(config));
//! let dispatcher = Dispatcher::new(client, &DispatchConfig::default());
//! let handle = dispatcher.handle();
//! // Hand `handle` to the pipeline; call `dispatcher.shutdown()` on exit.
//! ```

pub mod fhir;
