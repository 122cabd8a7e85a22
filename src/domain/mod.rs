//! # Domain Layer
//!
//! Snapshot models, progress accounting and the error taxonomy.
//! This layer is independent of transport and terminal concerns.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
