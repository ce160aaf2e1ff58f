use std::process::Stdio;

use libc::{kill, setsid, SIGTERM};
use tokio::process::Command;

use crate::{
    error::{Error, Result},
    process_manager::{base::ProcessManager, types::CommandSpec},
};

/// Unix-specific process manager.
///
/// Spawned processes get their own session and no standard streams, so they
/// outlive the invoking terminal. Liveness is answered by `ps`.
#[derive(Debug, Default)]
pub struct UnixProcessManager;

impl UnixProcessManager {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ProcessManager for UnixProcessManager {
    async fn spawn(&mut self, spec: CommandSpec) -> Result<u32> {
        let (program, args) = spec
            .cmd
            .split_first()
            .ok_or_else(|| Error::EmptyCommand(spec.name.clone()))?;

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }

        #[allow(unsafe_code)]
        unsafe {
            cmd.pre_exec(|| {
                if setsid() == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().map_err(|source| Error::Spawn {
            program: program.clone(),
            source,
        })?;

        let pid = child
            .id()
            .ok_or_else(|| Error::IOError(std::io::Error::other("pid not available")))?;
        tracing::debug!("Spawned `{}` as {pid}: {:?}", spec.name, spec.cmd);

        // Not waited on: the child is left to run on its own.
        drop(child);

        Ok(pid)
    }

    async fn command_name(&self, pid: u32) -> Result<Option<String>> {
        let output = match Command::new("ps")
            .args(["-p", &pid.to_string(), "-o", "comm="])
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!("ps query for {pid} failed: {err}");
                return Ok(None);
            }
        };

        if !output.status.success() {
            tracing::trace!("ps reports no process {pid}");
            return Ok(None);
        }

        let name = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        Ok((!name.is_empty()).then_some(name))
    }

    async fn shutdown(&mut self, pid: u32) -> Result<()> {
        let target = libc::pid_t::try_from(pid)
            .ok()
            .filter(|p| *p > 0)
            .ok_or(Error::InvalidPid(pid))?;

        #[allow(unsafe_code)]
        unsafe {
            let rc = kill(target, SIGTERM);
            if rc == -1 {
                return Err(Error::Signal {
                    pid,
                    source: std::io::Error::last_os_error(),
                });
            }
        }

        Ok(())
    }
}
