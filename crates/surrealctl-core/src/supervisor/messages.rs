//! User-facing message texts.

pub const ALREADY_RUNNING_INIT: &str =
    "SurrealDB is already running. Use start --force to start anyway.";
pub const ALREADY_RUNNING_START: &str = "SurrealDB is already running. Use --force to start anyway.";
pub const STOPPED: &str = "SurrealDB instance stopped";
pub const NOTHING_TO_STOP: &str = "No running SurrealDB instance found";
pub const NOT_RUNNING: &str = "SurrealDB is not running";

pub fn started(pid: u32) -> String {
    format!("SurrealDB instance started with PID {pid}")
}

pub fn running(pid: u32) -> String {
    format!("SurrealDB is running (PID: {pid})")
}

pub fn stop_failed(err: &impl std::fmt::Display) -> String {
    format!("Error stopping SurrealDB: {err}")
}

pub fn foreign(pid: u32) -> String {
    format!("Found process (PID: {pid}) is not a SurrealDB instance. Cleaning up.")
}
