use crate::core_tls::TlsError;
use std::io;
use thiserror::Error;

/// Every way a command can fail.
///
/// `Reply` is the ordinary protocol failure: it carries the exact reply the
/// client gets and the session keeps going. `Io` and `Tls` belong to the
/// control connection itself and end the session.
#[derive(Error, Debug)]
pub enum FtpError {
    #[error("{code} {message}")]
    Reply { code: u16, message: String },

    #[error("control connection I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Tls(#[from] TlsError),
}

impl FtpError {
    pub fn reply(code: u16, message: impl Into<String>) -> Self {
        FtpError::Reply {
            code,
            message: message.into(),
        }
    }

    pub fn syntax() -> Self {
        Self::reply(501, "Syntax error")
    }

    pub fn unrecognized(line: &str) -> Self {
        Self::reply(500, format!("Syntax error, command unrecognized: {}", line))
    }

    pub fn not_implemented(verb: &str) -> Self {
        Self::reply(502, format!("Command not implemented: {}", verb))
    }

    pub fn bad_sequence() -> Self {
        Self::reply(503, "Bad sequence of commands")
    }

    pub fn not_logged_in() -> Self {
        Self::reply(530, "Not logged in")
    }

    pub fn access_denied() -> Self {
        Self::reply(550, "Access denied")
    }

    /// Wraps a filesystem failure as a 550 carrying the OS message.
    pub fn system(err: io::Error) -> Self {
        Self::reply(550, err.to_string())
    }

    pub fn cant_open_data_connection() -> Self {
        Self::reply(425, "Can't open data connection")
    }

    /// A TLS request the client is told about instead of losing the session.
    pub fn tls_refused(err: &TlsError) -> Self {
        Self::reply(err.reply_code(), err.reply_text())
    }

    pub fn transfer_aborted() -> Self {
        Self::reply(426, "Connection closed; transfer aborted")
    }

    /// The reply line to send for a protocol error, if this is one.
    pub fn to_ftp_response(&self) -> Option<String> {
        match self {
            FtpError::Reply { .. } => Some(self.to_string()),
            _ => None,
        }
    }

    /// True when the peer has already gone away, so nothing should be sent.
    pub fn is_connection_lost(&self) -> bool {
        match self {
            FtpError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ),
            _ => false,
        }
    }
}
