//! Domain layer: pure generation logic with no I/O.

pub mod command_file;
pub mod config;
pub mod error;
pub mod package;
pub mod result;

pub use command_file::{CommandFile, HeaderBlock, rewrite_project_paths};
pub use config::{
    AiAssistant, GenerationConfig, GenerationConfigBuilder, ScriptDialect, WorkflowMode,
};
pub use error::{DomainError, ErrorCategory};
pub use package::{ExternalPackageDescriptor, InstallReport};
pub use result::GenerationResult;
