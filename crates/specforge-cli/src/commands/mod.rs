//! Command handler implementations.

pub mod completions;
pub mod init;
pub mod templates;
