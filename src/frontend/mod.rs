//! Frontend of the portal: routing, guards, views and the terminal UI.

pub mod cli;
pub mod guard;
pub mod navigator;
pub mod portal;
pub mod router;
pub mod routes;
pub mod services;
pub mod views;

pub use portal::{Location, Portal};
