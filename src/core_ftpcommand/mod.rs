// Here's the list of the FTP commands implemented
pub mod auth;
pub mod cdup;
pub mod cwd;
pub mod dele;
pub mod list;
pub mod mode;
pub mod noop;
pub mod pass;
pub mod pbsz;
pub mod prot;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod stor;
pub mod stru;
pub mod type_;
pub mod user;

// Verb table and dispatch
pub mod ftpcommand;
pub mod handlers;

// The utils and common functions are here
pub mod utils;
