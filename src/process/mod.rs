//! Streaming formatting pipeline.
//!
//! One sequential pass over the input: lines that split into two or more
//! top-level fields (and are not comments) accumulate into a block; any
//! other line flushes the block through the renderer and is then emitted
//! verbatim. At most one block is buffered at a time.
//!
//! The main entry point is [`format_matrices`] which processes a buffered
//! reader and writes formatted output to any `Write` implementation.

pub mod pipeline;

pub use pipeline::format_matrices;
