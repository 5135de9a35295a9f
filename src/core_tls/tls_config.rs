// TLS configuration
use crate::core_tls::error::TlsError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Enables AUTH TLS and protected data connections
    pub enabled: bool,

    /// PEM certificate chain
    pub cert_file: PathBuf,

    /// PEM private key (PKCS#8 or RSA)
    pub key_file: PathBuf,

    /// Encrypt the control connection before the banner (FTPS)
    pub implicit_tls: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cert_file: PathBuf::from("etc/ssl/cert.pem"),
            key_file: PathBuf::from("etc/ssl/key.pem"),
            implicit_tls: false,
        }
    }
}

impl TlsConfig {
    /// Checks that the TLS configuration is usable
    pub fn validate(&self) -> Result<(), TlsError> {
        if self.implicit_tls && !self.enabled {
            return Err(TlsError::TlsConfigError(
                "implicit_tls requires TLS to be enabled".to_string(),
            ));
        }

        if self.enabled {
            if !self.cert_file.exists() {
                return Err(TlsError::CertificateLoadError(format!(
                    "Certificate file not found: {:?}",
                    self.cert_file
                )));
            }

            if !self.key_file.exists() {
                return Err(TlsError::PrivateKeyLoadError(format!(
                    "Private key file not found: {:?}",
                    self.key_file
                )));
            }
        }

        Ok(())
    }
}
