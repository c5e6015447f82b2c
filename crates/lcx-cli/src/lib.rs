/*
[INPUT]:  Public API exports for the lcx command-line crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod watch;

// Re-export main types for convenience
pub use config::CliConfig;
pub use watch::{WatchTopic, forward_messages, watch_topic};
