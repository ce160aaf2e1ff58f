mod configure;
mod init;
mod start;
mod status;
mod stop;

use std::{path::PathBuf, process::ExitCode};

pub use configure::configure;
pub use init::init;
pub use start::start;
pub use status::status;
pub use stop::stop;
use surrealctl_config::ConfigStore;
use surrealctl_core::{ProcessRegistry, Report, Supervisor, UnixProcessManager, SURREAL_PROGRAM};

use crate::DEFAULT_STATE_DIR;

/// Where the config and marker files live, and which server to launch.
#[derive(Debug, Clone)]
pub struct Context {
    dir: PathBuf,
    program: String,
}

impl Context {
    pub fn new(state_directory: Option<PathBuf>, program: Option<String>) -> Self {
        Self {
            dir: state_directory.unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
            program: program.unwrap_or_else(|| SURREAL_PROGRAM.to_owned()),
        }
    }

    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::new(&self.dir)
    }

    pub fn supervisor(&self) -> Supervisor<UnixProcessManager> {
        Supervisor::new(
            UnixProcessManager::new(),
            ProcessRegistry::new(&self.dir),
            self.config_store(),
        )
        .with_program(&self.program)
        .with_workdir(&self.dir)
    }
}

/// Non-zero when any report is an error.
pub fn exit_code(reports: &[Report]) -> ExitCode {
    if reports.iter().any(Report::is_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
