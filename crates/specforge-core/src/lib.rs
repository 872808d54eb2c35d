//! Specforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Specforge
//! project scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          specforge-cli (CLI)            │
//! │      (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerationService, PackageResolver,    │
//! │        DirectoryMaterializer)           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, CommandRunner, Assets)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    specforge-adapters (Infrastructure)  │
//! │ (LocalFilesystem, SystemCommandRunner,  │
//! │           BundledTemplates)             │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (GenerationConfig, CommandFile, Result) │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use specforge_core::{
//!     application::services::GenerationService,
//!     domain::{AiAssistant, GenerationConfig, ScriptDialect},
//! };
//!
//! // 1. Describe the run
//! let config = GenerationConfig::builder()
//!     .ai_assistant(AiAssistant::Claude)
//!     .script_dialect(ScriptDialect::Posix)
//!     .project_name("my-project")
//!     .project_path("/work/my-project")
//!     .build()?;
//!
//! // 2. Use the application service (with injected adapters)
//! let service = GenerationService::new(fs, runner, assets);
//! let result = service.generate(&config);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        assistants::{AssistantAdapter, SidecarFile, adapter_for},
        ports::{CommandOutput, CommandRunner, DirEntryInfo, Filesystem, TemplateAssets},
        services::{GenerationService, PackageResolver, ResolverOptions},
    };
    pub use crate::domain::{
        AiAssistant, CommandFile, ExternalPackageDescriptor, GenerationConfig, GenerationResult,
        ScriptDialect, WorkflowMode,
    };
    pub use crate::error::{SpecforgeError, SpecforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
