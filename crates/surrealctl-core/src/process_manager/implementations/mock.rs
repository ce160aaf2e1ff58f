use std::{
    collections::HashMap,
    fmt,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;

use crate::{
    error::{Error, Result},
    process_manager::{base::ProcessManager, types::CommandSpec},
};

const FIRST_PID: u32 = 1000;

type Hook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct MockState {
    next_pid: u32,
    table: HashMap<u32, String>,
    spawned: Vec<CommandSpec>,
    signaled: Vec<u32>,
    fail_signals: bool,
    after_signal: Option<Hook>,
}

impl fmt::Debug for MockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockState")
            .field("next_pid", &self.next_pid)
            .field("table", &self.table)
            .field("signaled", &self.signaled)
            .field("fail_signals", &self.fail_signals)
            .finish_non_exhaustive()
    }
}

/// In-memory process table. Clones share state, so a test can keep a handle
/// after moving the manager into a supervisor.
#[derive(Debug, Clone, Default)]
pub struct MockProcessManager {
    state: Arc<Mutex<MockState>>,
}

impl MockProcessManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Pretend a process with this pid and command name exists.
    pub fn insert(&self, pid: u32, command: &str) {
        self.state().table.insert(pid, command.to_owned());
    }

    /// Pretend the process died.
    pub fn remove(&self, pid: u32) {
        self.state().table.remove(&pid);
    }

    pub fn is_alive(&self, pid: u32) -> bool {
        self.state().table.contains_key(&pid)
    }

    pub fn spawned(&self) -> Vec<CommandSpec> {
        self.state().spawned.clone()
    }

    pub fn signaled(&self) -> Vec<u32> {
        self.state().signaled.clone()
    }

    /// Make every following signal fail with a permission error.
    pub fn fail_signals(&self) {
        self.state().fail_signals = true;
    }

    /// Run `hook` once, right after the next successful signal.
    pub fn after_signal(&self, hook: impl FnOnce() + Send + 'static) {
        self.state().after_signal = Some(Box::new(hook));
    }
}

#[async_trait]
impl ProcessManager for MockProcessManager {
    async fn spawn(&mut self, spec: CommandSpec) -> Result<u32> {
        let program = spec
            .cmd
            .first()
            .ok_or_else(|| Error::EmptyCommand(spec.name.clone()))?;
        let command = Path::new(program)
            .file_name()
            .map_or_else(|| program.clone(), |name| name.to_string_lossy().into_owned());

        let mut state = self.state();
        let pid = state.next_pid.max(FIRST_PID);
        state.next_pid = pid + 1;
        state.table.insert(pid, command);
        state.spawned.push(spec);
        Ok(pid)
    }

    async fn command_name(&self, pid: u32) -> Result<Option<String>> {
        Ok(self.state().table.get(&pid).cloned())
    }

    async fn shutdown(&mut self, pid: u32) -> Result<()> {
        let mut state = self.state();
        if state.fail_signals {
            return Err(Error::Signal {
                pid,
                source: std::io::Error::from_raw_os_error(libc::EPERM),
            });
        }
        if state.table.remove(&pid).is_none() {
            return Err(Error::Signal {
                pid,
                source: std::io::Error::from_raw_os_error(libc::ESRCH),
            });
        }
        state.signaled.push(pid);
        let hook = state.after_signal.take();
        drop(state);

        if let Some(hook) = hook {
            hook();
        }
        Ok(())
    }
}
