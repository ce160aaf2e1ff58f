use std::path::{Path, PathBuf};

use surrealctl_config::{ConfigStore, Configuration};

use crate::{
    error::Result,
    process_manager::{CommandSpec, ProcessManager},
    registry::ProcessRegistry,
    supervisor::messages,
    types::{Liveness, Report},
};

/// Executable launched by the supervisor. Its file name is expected in the
/// command name of a live instance.
pub const SURREAL_PROGRAM: &str = "surreal";

/// Argument list for the database server.
#[must_use]
pub fn server_command(program: &str, config: &Configuration, with_credentials: bool) -> Vec<String> {
    let mut cmd = vec![
        program.to_owned(),
        "start".to_owned(),
        "-A".to_owned(),
        config.data_dir.clone(),
    ];
    if with_credentials {
        cmd.extend([
            "--user".to_owned(),
            config.username.clone(),
            "--pass".to_owned(),
            config.password.clone(),
        ]);
    }
    cmd
}

#[derive(Debug)]
pub struct Supervisor<P: ProcessManager> {
    pm: P,
    registry: ProcessRegistry,
    config: ConfigStore,
    program: String,
    workdir: Option<PathBuf>,
}

impl<P: ProcessManager> Supervisor<P> {
    pub fn new(pm: P, registry: ProcessRegistry, config: ConfigStore) -> Self {
        Self {
            pm,
            registry,
            config,
            program: SURREAL_PROGRAM.to_owned(),
            workdir: None,
        }
    }

    /// Launch `program` instead of `surreal`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Working directory of the spawned server.
    #[must_use]
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub(crate) fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Start the server with the configured credentials unless one is
    /// already running.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded, the server
    /// cannot be spawned, or the marker cannot be written.
    pub async fn init(&mut self) -> Result<Vec<Report>> {
        let mut reports = Vec::new();

        if self.probe(&mut reports).await?.is_some() {
            reports.push(Report::warning(messages::ALREADY_RUNNING_INIT));
            return Ok(reports);
        }

        let pid = self.launch(true).await?;
        reports.push(Report::success(messages::started(pid)));
        Ok(reports)
    }

    /// Start the server with its built-in credentials. With `force`, a
    /// running instance is ignored and left untracked.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded, the server
    /// cannot be spawned, or the marker cannot be written.
    pub async fn start(&mut self, force: bool) -> Result<Vec<Report>> {
        let mut reports = Vec::new();

        if let Some(pid) = self.probe(&mut reports).await? {
            if !force {
                reports.push(Report::warning(messages::ALREADY_RUNNING_START));
                return Ok(reports);
            }
            tracing::debug!("Forcing start, process {pid} stays untracked");
        }

        let pid = self.launch(false).await?;
        reports.push(Report::success(messages::started(pid)));
        Ok(reports)
    }

    /// Send SIGTERM to the tracked server and forget it.
    ///
    /// Signal failures are reported, not returned, and keep the marker.
    ///
    /// # Errors
    /// Returns an error if the liveness check cannot clean up a stale marker.
    pub async fn stop(&mut self) -> Result<Vec<Report>> {
        let mut reports = Vec::new();

        let Some(pid) = self.probe(&mut reports).await? else {
            reports.push(Report::warning(messages::NOTHING_TO_STOP));
            return Ok(reports);
        };

        let stopped = match self.pm.shutdown(pid).await {
            Ok(()) => self.registry.clear_pid(),
            Err(err) => Err(err),
        };

        match stopped {
            Ok(()) => reports.push(Report::success(messages::STOPPED)),
            Err(err) => {
                tracing::debug!("Stopping {pid} failed: {err:?}");
                reports.push(Report::error(messages::stop_failed(&err)));
            }
        }

        Ok(reports)
    }

    /// Report whether the tracked server is alive.
    ///
    /// # Errors
    /// Returns an error if the liveness check cannot clean up a stale marker.
    pub async fn status(&self) -> Result<Vec<Report>> {
        let mut reports = Vec::new();

        match self.probe(&mut reports).await? {
            Some(pid) => reports.push(Report::success(messages::running(pid))),
            None => reports.push(Report::info(messages::NOT_RUNNING)),
        }

        Ok(reports)
    }

    /// Substring expected in the command name of a live instance.
    fn signature(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.program.as_str())
    }

    async fn probe(&self, reports: &mut Vec<Report>) -> Result<Option<u32>> {
        match self.registry.check_running(&self.pm, self.signature()).await? {
            Liveness::Running(pid) => Ok(Some(pid)),
            Liveness::NotRunning => Ok(None),
            Liveness::Foreign { pid, .. } => {
                reports.push(Report::warning(messages::foreign(pid)));
                Ok(None)
            }
        }
    }

    async fn launch(&mut self, with_credentials: bool) -> Result<u32> {
        let config = self.config.load()?;
        let spec = CommandSpec {
            name: "surrealdb".to_owned(),
            cmd: server_command(&self.program, &config, with_credentials),
            cwd: self.workdir.clone(),
        };

        let pid = self.pm.spawn(spec).await?;
        self.registry.record_pid(pid)?;

        Ok(pid)
    }
}
