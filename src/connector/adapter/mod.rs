mod demo_state;
mod http_sync_backend;
mod in_memory_sync_backend;

pub use demo_state::*;
pub use http_sync_backend::*;
pub use in_memory_sync_backend::*;
