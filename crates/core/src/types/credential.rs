//! Username/password pairs for the fixed-credential verifier.

use secrecy::{ExposeSecret, SecretString};

/// A username and password pair.
///
/// The password is held as a [`SecretString`] so it never shows up in logs;
/// `Debug` prints the username only.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the given username and password match this pair exactly.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact_pair_only() {
        let creds = Credentials::new("customer", "cust123");
        assert!(creds.matches("customer", "cust123"));
        assert!(!creds.matches("customer", "CUST123"));
        assert!(!creds.matches("Customer", "cust123"));
        assert!(!creds.matches("", ""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("admin", "hunter2-secret");
        let debug_output = format!("{creds:?}");
        assert!(debug_output.contains("admin"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2-secret"));
    }
}
