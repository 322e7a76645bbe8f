//! Utility modules for the portal backend.

/// Runtime configuration for both API clients.
pub mod config;
/// Platform data directories.
pub mod paths;
