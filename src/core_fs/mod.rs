// Sandboxed path resolution and directory listings
pub mod list_format;
pub mod sandbox;

pub use list_format::{ListFormatter, ListStyle, LsFormatter, NativeFormatter};
pub use sandbox::PathSandbox;
