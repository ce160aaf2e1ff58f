use std::path::PathBuf;

use clap::{Parser, Subcommand};

const EXAMPLES: &str = "\
Examples:
  $ surrealdb-cli start
  $ surrealdb-cli stop
  $ surrealdb-cli configure -d ./my-data -u myuser -p mypassword
  $ surrealdb-cli status";

/// CLI for managing SurrealDB instances
#[derive(Parser, Debug)]
#[command(
    name = "surrealdb-cli",
    version,
    about = "CLI for managing SurrealDB instances",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Directory holding config.json and surrealdb.pid [default: current directory]
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// SurrealDB executable to launch [default: surreal]
    #[arg(long, global = true, value_name = "PATH")]
    pub surreal_bin: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new SurrealDB instance
    Init,

    /// Start a SurrealDB instance
    Start {
        /// Force start even if an instance is already running
        #[arg(short, long)]
        force: bool,
    },

    /// Stop the SurrealDB instance
    Stop,

    /// Configure SurrealDB instance settings
    Configure {
        /// Set the data directory
        #[arg(short = 'd', long, value_name = "PATH")]
        data_dir: Option<String>,

        /// Set the username
        #[arg(short, long)]
        username: Option<String>,

        /// Set the password
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Check the status of the SurrealDB instance
    Status,
}
