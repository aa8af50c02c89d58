//! # LittleArtist Common
//!
//! Logging configuration shared by the LittleArtist crates, tools and
//! tests. Libraries only emit `tracing` events; binaries pick the output
//! format here.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};
