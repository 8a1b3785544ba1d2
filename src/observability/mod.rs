//! # Observability
//!
//! - `metrics`: Prometheus metrics collection
//! - `logging`: tracing subscriber setup for structured logging

pub mod metrics;
pub mod logging;
