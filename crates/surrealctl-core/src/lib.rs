mod error;
mod process_manager;
mod registry;
mod supervisor;
mod types;

pub use error::{Error, Result};
pub use process_manager::{CommandSpec, ProcessManager};
#[cfg(unix)]
pub use process_manager::UnixProcessManager;
pub use registry::{ProcessRegistry, PID_FILE};
pub use supervisor::{messages, server_command, Supervisor, SURREAL_PROGRAM};
pub use types::{Liveness, Report, Severity};
