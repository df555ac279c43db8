//! h3cp CLI library
//!
//! This module exports the CLI components for use by both binaries and by
//! integration tests.

pub mod commands;
pub mod exit_code;
pub mod logging;
pub mod output;
