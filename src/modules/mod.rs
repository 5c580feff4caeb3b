//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for outbound email and local file staging.

pub mod email;
pub mod storage;
