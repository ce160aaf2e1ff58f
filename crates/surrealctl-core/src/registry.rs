use std::path::{Path, PathBuf};

use crate::{error::Result, process_manager::ProcessManager, types::Liveness};

/// Name of the marker file inside the state directory.
pub const PID_FILE: &str = "surrealdb.pid";

#[derive(Debug, PartialEq, Eq)]
enum Marker {
    Absent,
    Invalid(String),
    Pid(u32),
}

/// Single-slot store for the pid of the supervised server.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    path: PathBuf,
}

impl ProcessRegistry {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(PID_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_marker(&self) -> Marker {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Marker::Absent,
            Err(err) => {
                tracing::warn!("Cannot read {}: {err}", self.path.display());
                return Marker::Absent;
            }
        };

        match text.trim().parse::<u32>() {
            Ok(pid) if pid > 0 => Marker::Pid(pid),
            _ => Marker::Invalid(text),
        }
    }

    /// The recorded pid, without checking whether it is alive.
    #[cfg(test)]
    pub(crate) fn tracked_pid(&self) -> Option<u32> {
        match self.read_marker() {
            Marker::Pid(pid) => Some(pid),
            Marker::Absent | Marker::Invalid(_) => None,
        }
    }

    /// Overwrite the marker with `pid`.
    ///
    /// # Errors
    /// Returns an error if the marker file cannot be written.
    pub fn record_pid(&self, pid: u32) -> Result<()> {
        std::fs::write(&self.path, pid.to_string())?;
        tracing::debug!("Recorded pid {pid} in {}", self.path.display());
        Ok(())
    }

    /// Remove the marker. An already missing marker is not an error.
    ///
    /// # Errors
    /// Returns an error if the marker exists but cannot be removed.
    pub fn clear_pid(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Check whether the recorded pid is a live process whose command name
    /// contains `signature`. Stale markers are removed.
    ///
    /// # Errors
    /// Returns an error if a stale marker cannot be removed.
    pub async fn check_running<P>(&self, pm: &P, signature: &str) -> Result<Liveness>
    where
        P: ProcessManager + ?Sized,
    {
        let pid = match self.read_marker() {
            Marker::Absent => return Ok(Liveness::NotRunning),
            Marker::Invalid(text) => {
                tracing::debug!("Discarding malformed marker {text:?}");
                self.clear_pid()?;
                return Ok(Liveness::NotRunning);
            }
            Marker::Pid(pid) => pid,
        };

        match pm.command_name(pid).await? {
            None => {
                tracing::debug!("Process {pid} is gone");
                self.clear_pid()?;
                Ok(Liveness::NotRunning)
            }
            Some(command) if command.contains(signature) => Ok(Liveness::Running(pid)),
            Some(command) => {
                tracing::debug!("Process {pid} is `{command}`, not `{signature}`");
                self.clear_pid()?;
                Ok(Liveness::Foreign { pid, command })
            }
        }
    }
}
