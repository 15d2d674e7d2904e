//! Library side of the `sheetgen` binary: configuration, logging, and the
//! per-sheet pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
