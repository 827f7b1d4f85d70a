//! Utility modules for common functionality.
//!
//! Currently just logging setup for the binary.

pub mod logger;
