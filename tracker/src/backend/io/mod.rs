//! # IO Module
//!
//! The interface layer between the user and the domain logic.
//!
//! ## Key Responsibilities
//!
//! - **Command Line**: Parsing subcommands and printing tables and totals
//! - **Input Forwarding**: Passing raw form text to the domain for validation
//! - **Chart Output**: Rendering chart data to an SVG file

pub mod charts;
pub mod cli;

pub use charts::{ChartError, ChartRenderer};
pub use cli::{run_command, Cli, Commands};
