//! Subcommand implementations.

pub mod paths;
pub mod post;
pub mod posts;
pub mod preview;
