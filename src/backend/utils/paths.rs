//! Path utilities.

use std::path::PathBuf;

use crate::utils::{Error, Result};

/// Name of the portal's data directory.
const DATA_DIR: &str = "EvacuationPortal";

const SESSION_FILE: &str = "session.json";

/// Get the base data directory (`EvacuationPortal`).
#[inline]
pub fn get_data_dir() -> Result<PathBuf> {
    let base_dir = match std::env::consts::OS {
        "windows" => std::env::var("APPDATA")
            .ok()
            .map(PathBuf::from)
            .ok_or_else(|| Error::Config("Could not determine AppData directory".into()))?,
        "macos" => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"))
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?,
        _ => std::env::var("XDG_DATA_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".local/share"))
            })
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?,
    };
    Ok(base_dir.join(DATA_DIR))
}

/// Default location of the persisted session.
pub fn default_session_file() -> PathBuf {
    get_data_dir()
        .unwrap_or_else(|_| PathBuf::from(DATA_DIR))
        .join(SESSION_FILE)
}
