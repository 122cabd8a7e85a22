mod sync_backend;

pub use sync_backend::*;
