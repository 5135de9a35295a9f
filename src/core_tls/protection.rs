// Data channel protection negotiated with PBSZ and PROT (RFC 4217)
use crate::core_error::FtpError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionLevel {
    Clear,
    Safe,
    Confidential,
    Private,
}

impl ProtectionLevel {
    pub fn from_code(code: &str) -> Option<ProtectionLevel> {
        match code {
            "C" => Some(ProtectionLevel::Clear),
            "S" => Some(ProtectionLevel::Safe),
            "E" => Some(ProtectionLevel::Confidential),
            "P" => Some(ProtectionLevel::Private),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            ProtectionLevel::Clear => 'C',
            ProtectionLevel::Safe => 'S',
            ProtectionLevel::Confidential => 'E',
            ProtectionLevel::Private => 'P',
        }
    }

    /// Only private protection can actually be provided.
    pub fn is_supported(self) -> bool {
        self == ProtectionLevel::Private
    }
}

impl fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProtectionLevel::Clear => "clear",
            ProtectionLevel::Safe => "safe",
            ProtectionLevel::Confidential => "confidential",
            ProtectionLevel::Private => "private",
        };
        f.write_str(name)
    }
}

/// Per-session PBSZ/PROT state. Lives apart from the login state.
#[derive(Debug)]
pub struct ProtectionState {
    buffer_size_set: bool,
    level: ProtectionLevel,
}

impl Default for ProtectionState {
    fn default() -> Self {
        Self {
            buffer_size_set: false,
            level: ProtectionLevel::Clear,
        }
    }
}

fn digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"^\d+$").expect("static regex"))
}

impl ProtectionState {
    pub fn level(&self) -> ProtectionLevel {
        self.level
    }

    /// True when data connections must be wrapped in TLS.
    pub fn encrypt_data(&self) -> bool {
        self.level != ProtectionLevel::Clear
    }

    /// PBSZ: only legal on an encrypted control connection, and only `0`.
    pub fn set_buffer_size(
        &mut self,
        control_encrypted: bool,
        arg: Option<&str>,
    ) -> Result<(), FtpError> {
        let arg = arg.unwrap_or_default();
        if !digits().is_match(arg) {
            return Err(FtpError::syntax());
        }
        if !control_encrypted {
            return Err(FtpError::reply(503, "PBSZ must be preceded by AUTH"));
        }
        if arg.trim_start_matches('0') != "" {
            return Err(FtpError::reply(501, "PBSZ=0"));
        }
        self.buffer_size_set = true;
        Ok(())
    }

    /// PROT: requires a prior PBSZ; the level is left untouched on failure.
    pub fn set_level(&mut self, arg: Option<&str>) -> Result<ProtectionLevel, FtpError> {
        let code = arg.ok_or_else(FtpError::syntax)?.to_ascii_uppercase();
        if !self.buffer_size_set {
            return Err(FtpError::reply(503, "PROT must be preceded by PBSZ"));
        }
        let level = ProtectionLevel::from_code(&code)
            .ok_or_else(|| FtpError::reply(504, "Unknown protection level"))?;
        if !level.is_supported() {
            return Err(FtpError::reply(
                536,
                format!("Unsupported protection level {}", level),
            ));
        }
        self.level = level;
        Ok(level)
    }
}
