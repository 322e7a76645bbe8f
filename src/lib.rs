//! Admin and resident portal for a disaster-evacuation platform.

pub mod backend;
pub mod frontend;
pub mod utils;
