mod navigation;
mod results;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use navigation::{ExitPolicy, NavigationIntent};
pub use results::SessionResults;
pub use service::DrillSession;
pub use workflow::{LaunchedSession, SessionLauncher};
