use crate::core_auth::helper::verify_password;
use std::fmt;

/// Decides whether a USER/PASS pair may log in.
pub trait Authenticator: Send + Sync + fmt::Debug {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// A single plain-text credential, compared exactly.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    username: String,
    password: String,
}

impl FixedCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Authenticator for FixedCredentials {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// A single credential whose password is stored as a bcrypt hash.
#[derive(Clone)]
pub struct HashedCredentials {
    username: String,
    hashed_password: String,
}

impl HashedCredentials {
    pub fn new(username: impl Into<String>, hashed_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            hashed_password: hashed_password.into(),
        }
    }
}

impl fmt::Debug for HashedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Authenticator for HashedCredentials {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        username == self.username && verify_password(password, &self.hashed_password)
    }
}
