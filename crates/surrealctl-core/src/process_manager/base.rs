use crate::{error::Result, process_manager::types::CommandSpec};

#[async_trait::async_trait]
pub trait ProcessManager: Send + Sync {
    /// Spawn a detached process and return its pid.
    async fn spawn(&mut self, spec: CommandSpec) -> Result<u32>;
    /// Command name of a live process, `None` if no such process exists.
    async fn command_name(&self, pid: u32) -> Result<Option<String>>;
    /// Gracefully shutdown a process.
    async fn shutdown(&mut self, pid: u32) -> Result<()>;
}
