//! HTTP handlers for the HealthBot service.

pub mod analyze;
pub mod app;
pub mod metrics;
