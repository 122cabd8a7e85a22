//! # Application Layer
//!
//! Use cases, refresh scheduling and the displayed table, coordinating the
//! domain and connector layers.

pub mod interfaces;
pub mod refresh;
pub mod repo_table;
pub mod use_cases;

pub use interfaces::*;
pub use refresh::*;
pub use repo_table::*;
pub use use_cases::*;
