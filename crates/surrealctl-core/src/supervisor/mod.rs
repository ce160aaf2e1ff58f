mod main;
pub mod messages;

pub use main::{server_command, Supervisor, SURREAL_PROGRAM};
