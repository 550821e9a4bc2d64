//! Command-line interface
//!
//! Argument definitions (clap derive) and output formatting.

pub mod args;
pub mod output;

pub use args::{Cli, Commands};
