//! Command runner adapters.

mod scripted;
mod system;

pub use scripted::{ScriptedCommandRunner, ScriptedOutcome};
pub use system::SystemCommandRunner;
