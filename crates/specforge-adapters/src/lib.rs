//! Infrastructure adapters for Specforge.
//!
//! This crate implements the ports defined in
//! `specforge_core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod bundled;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use bundled::BundledTemplates;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ScriptedCommandRunner, ScriptedOutcome, SystemCommandRunner};
