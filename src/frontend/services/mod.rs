//! Frontend services for session state.

pub mod context;
