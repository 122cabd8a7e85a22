//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Sync backends (HTTP against the daemon, in-memory for demos and tests)
//! - Command wiring (container, router, controllers)
//! - The live terminal view

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::*;
