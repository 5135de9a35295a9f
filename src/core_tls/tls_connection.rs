// TLS acceptor shared by every session of the server
use crate::core_tls::error::TlsError;
use crate::core_tls::tls_config::TlsConfig;
use log::debug;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::{rustls, TlsAcceptor};

pub struct TlsConnection {
    tls_acceptor: TlsAcceptor,
}

impl TlsConnection {
    /// Loads the certificate and key named by the configuration.
    pub fn from_config(config: &TlsConfig) -> Result<Self, TlsError> {
        if !config.cert_file.exists() || !config.key_file.exists() {
            return Err(TlsError::TlsNotConfigured);
        }

        let certs = std::fs::read(&config.cert_file)
            .map_err(|e| TlsError::CertificateLoadError(e.to_string()))?;
        let key = std::fs::read(&config.key_file)
            .map_err(|e| TlsError::PrivateKeyLoadError(e.to_string()))?;

        Self::from_pem(&certs, &key)
    }

    /// Builds the acceptor from PEM encoded certificate chain and private key.
    pub fn from_pem(certs: &[u8], key: &[u8]) -> Result<Self, TlsError> {
        let cert_chain = rustls_pemfile::certs(&mut &certs[..])
            .map_err(|e| TlsError::CertificateLoadError(e.to_string()))?;
        if cert_chain.is_empty() {
            return Err(TlsError::CertificateLoadError(
                "No certificate found".to_string(),
            ));
        }

        let mut keys = rustls_pemfile::pkcs8_private_keys(&mut &key[..])
            .map_err(|e| TlsError::PrivateKeyLoadError(e.to_string()))?;
        if keys.is_empty() {
            keys = rustls_pemfile::rsa_private_keys(&mut &key[..])
                .map_err(|e| TlsError::PrivateKeyLoadError(e.to_string()))?;
        }

        let private_key = match keys.pop() {
            Some(k) => k,
            None => {
                return Err(TlsError::PrivateKeyLoadError(
                    "No private key found".to_string(),
                ))
            }
        };

        let cert_chain: Vec<rustls::Certificate> =
            cert_chain.into_iter().map(rustls::Certificate).collect();

        let private_key = rustls::PrivateKey(private_key);

        let config = rustls::ServerConfig::builder()
            .with_safe_defaults()
            .with_no_client_auth()
            .with_single_cert(cert_chain, private_key)
            .map_err(|e| TlsError::TlsConfigError(e.to_string()))?;

        Ok(Self {
            tls_acceptor: TlsAcceptor::from(Arc::new(config)),
        })
    }

    /// Runs the server side of a handshake over an already connected socket.
    /// Used for the control connection and for protected data connections.
    pub async fn accept_tls(
        &self,
        stream: TcpStream,
    ) -> Result<tokio_rustls::server::TlsStream<TcpStream>, TlsError> {
        let peer = stream.peer_addr().ok();
        match self.tls_acceptor.accept(stream).await {
            Ok(tls_stream) => {
                debug!("TLS handshake completed with {:?}", peer);
                Ok(tls_stream)
            }
            Err(e) => Err(TlsError::TlsHandshakeError(e.to_string())),
        }
    }
}
