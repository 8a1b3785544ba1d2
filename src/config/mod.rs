//! # Configuration
//!
//! Controller-level settings. Per-resource settings live on the CRDs.

mod controller;

pub use controller::ControllerConfig;
