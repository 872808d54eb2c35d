//! Application services: orchestration over the driven ports.

pub mod generation;
pub mod materializer;
pub mod package_resolver;

pub use generation::{GenerationService, ResolverOptions, SPECIFY_DIR, compute_total_size};
pub use materializer::{DirectoryMaterializer, RESERVED_TEMPLATE_DIRS};
pub use package_resolver::{DEFAULT_TEMPLATE_PACKAGE, PackageResolver};
