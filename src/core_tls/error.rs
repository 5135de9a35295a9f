// TLS errors for the control and data channels
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TlsError {
    #[error("Failed to load SSL certificate: {0}")]
    CertificateLoadError(String),

    #[error("Failed to load SSL private key: {0}")]
    PrivateKeyLoadError(String),

    #[error("TLS handshake failed: {0}")]
    TlsHandshakeError(String),

    #[error("TLS configuration error: {0}")]
    TlsConfigError(String),

    #[error("TLS not configured")]
    TlsNotConfigured,
}

impl TlsError {
    pub fn reply_code(&self) -> u16 {
        match self {
            TlsError::TlsNotConfigured => 534,
            _ => 451,
        }
    }

    pub fn reply_text(&self) -> &'static str {
        match self {
            TlsError::TlsNotConfigured => "TLS not available. Please configure SSL/TLS in the server.",
            _ => "Requested action aborted. Local error in processing.",
        }
    }

    /// The reply a client gets when a TLS request cannot be served.
    pub fn to_ftp_response(&self) -> String {
        format!("{} {}", self.reply_code(), self.reply_text())
    }
}
