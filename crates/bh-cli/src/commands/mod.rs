//! CLI subcommand implementations.

pub mod events;
pub mod periods;
pub mod report;
pub mod status;
pub mod util;
