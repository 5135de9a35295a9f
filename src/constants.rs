// src/constants.rs

pub const DEFAULT_SERVER_NAME: &str = "fakeftpd";
pub const DEFAULT_LISTEN_PORT: u16 = 2121;
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 300;

/// PORT may not name a data port below this unless explicitly allowed.
pub const MIN_UNPRIVILEGED_PORT: u16 = 1024;

/// Longest command line accepted, terminator included.
pub const MAX_COMMAND_LINE: u64 = 8192;

/// Log target mirroring every command and reply on the control connection.
pub const WIRE_LOG_TARGET: &str = "fakeftpd::wire";

/// Files seeded into the scaffold data directory.
pub const SCAFFOLD_FILES: &[&str] = &["README", "outgoing/getme"];
