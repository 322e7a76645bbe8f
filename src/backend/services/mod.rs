//! Domain services: named operations bound to one API client each.
//!
//! Services pass parameters through and return what the backend sent. Every
//! failure is logged here and handed back to the caller unchanged.

pub mod admin;
pub mod resident;

use std::fmt::Display;

use crate::log_error;
use crate::utils::Result;
use crate::utils::logging::SharedLogger;

pub use admin::AdminServices;
pub use resident::ResidentServices;

pub(crate) fn logged<T>(
    logger: &SharedLogger,
    context: impl Display,
    result: Result<T>,
) -> Result<T> {
    result.inspect_err(|e| log_error!(logger, "services", "Error {context}: {e}"))
}

pub(crate) fn coordinates_query(latitude: f64, longitude: f64) -> Vec<(String, String)> {
    vec![
        ("latitude".to_string(), latitude.to_string()),
        ("longitude".to_string(), longitude.to_string()),
    ]
}
