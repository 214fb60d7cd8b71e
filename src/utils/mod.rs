//! Utility functions and helpers for the mathops service.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and credential redaction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
