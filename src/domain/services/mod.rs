//! Domain services containing pure progress logic.

mod progress_aggregator;

pub use progress_aggregator::*;
