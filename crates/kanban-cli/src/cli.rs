use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "A drag-and-drop kanban board for the terminal", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")"))]
pub struct Cli {
    /// Directory the board is stored in (or set KANBAN_DATA_DIR env var)
    #[arg(long, value_name = "DIR", env = "KANBAN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default location (or set KANBAN_CONFIG env var)
    #[arg(long, value_name = "FILE", env = "KANBAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep the board in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Print the stored board as JSON and exit
    #[arg(long)]
    pub print: bool,
}
