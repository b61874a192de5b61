//! Battery history CLI library.
//!
//! This crate provides the CLI interface around `bh-core`: log acquisition,
//! live battery sampling, and report rendering.

pub mod acquire;
pub mod analysis;
mod cli;
pub mod commands;
mod config;
pub mod sampler;

pub use cli::{Cli, Commands, LogArgs, PeriodsFormat};
pub use config::Config;
