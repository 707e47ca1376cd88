//! matfmt - Column aligner for keymap matrix definitions
//!
//! Detects contiguous runs of multi-field comma-separated lines and re-emits
//! them with fields padded into a uniform grid, fanning out from the center
//! column. Everything else passes through unchanged.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod error;
pub mod format;
pub mod parser;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use error::Result;
