//! Utility modules shared by the pipeline and the CLI.

pub mod date;
pub mod log;
pub mod slug;
