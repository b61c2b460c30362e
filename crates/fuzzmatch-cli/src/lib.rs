//! Library side of the `fuzzmatch` command: logging setup, the
//! ingest → match → write pipeline, and terminal progress rendering.

pub mod logging;
pub mod pipeline;
pub mod progress;
