use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "fakeftpd",
    about = "A controllable FTP/FTPS server for exercising FTP clients."
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port for the control connection
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory served to clients (a seeded temporary directory if omitted)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Login user name
    #[arg(short, long)]
    pub user: Option<String>,

    /// Login password
    #[arg(long)]
    pub password: Option<String>,

    /// Encrypt the control connection from the start (needs [tls] configured)
    #[arg(long)]
    pub implicit_tls: bool,

    /// Log every command and reply
    #[arg(long)]
    pub debug: bool,

    /// Print the bcrypt hash of a password for the config file and exit
    #[arg(long, value_name = "PASSWORD")]
    pub hash_password: Option<String>,
}
