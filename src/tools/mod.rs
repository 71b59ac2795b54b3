//! The tools module provides helpers around the coder.
//!
//! The tools are:
//! - cli: Command line interface for huffc.
//! - freq_count: Frequency count of byte values.
//! - weight_log: Saving and loading frequency counts as a text file.
//!
pub mod cli;
pub mod freq_count;
pub mod weight_log;
