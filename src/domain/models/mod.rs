mod lenient;
mod progress;
mod reply;
mod snapshot;
mod status_line;

pub use progress::*;
pub use reply::*;
pub use snapshot::*;
pub use status_line::*;
