use surrealctl_config::ConfigError;

pub type Result<R, E = Error> = std::result::Result<R, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("empty command for `{0}`")]
    EmptyCommand(String),

    #[error("cannot spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid process id {0}")]
    InvalidPid(u32),

    #[error("cannot signal process {pid}: {source}")]
    Signal {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
}
