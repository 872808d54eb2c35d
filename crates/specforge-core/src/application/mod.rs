//! Application layer: ports, services and assistant format adapters.

pub mod assistants;
pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
