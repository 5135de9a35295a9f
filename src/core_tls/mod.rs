// SSL/TLS support: explicit (AUTH TLS) and implicit FTPS

pub mod error;
pub mod protection;
pub mod tls_config;
pub mod tls_connection;

pub use error::TlsError;
pub use protection::{ProtectionLevel, ProtectionState};
pub use tls_config::TlsConfig;
pub use tls_connection::TlsConnection;
