//! Command modules for the widgen CLI.
//!
//! - [`generate`] - Scaffold a new widget project or upgrade an existing one
//! - [`version`] - Display version information

pub mod generate;
pub mod version;
