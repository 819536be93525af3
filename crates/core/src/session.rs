//! Session role state machine.
//!
//! ```text
//!              login_as_customer ok            login_as_admin ok
//!   Anonymous ─────────────────────► Customer ◄──────────────────► Admin
//!       ▲                                │                           │
//!       └────────────── logout ──────────┴───────────────────────────┘
//! ```
//!
//! Either login may be attempted from any state and overwrites the current
//! role on success. A failed login leaves the role unchanged. Credential
//! checking is delegated to an [`Authenticator`] so the fixed placeholder
//! pairs can be swapped for a real verifier.

use thiserror::Error;

use crate::types::{Credentials, SessionRole};

/// Failures of the credential verifier itself (not wrong credentials).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The verifier could not be reached or failed internally.
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

/// Verifies a username/password pair for a target role.
pub trait Authenticator: Send + Sync {
    /// Returns `Ok(true)` if the pair is valid for `role`, `Ok(false)` if not.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the verifier cannot decide.
    fn verify(&self, role: SessionRole, username: &str, password: &str) -> Result<bool, AuthError>;
}

/// Verifier backed by one fixed pair per role.
///
/// Placeholder credentials, not a security mechanism.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    customer: Credentials,
    admin: Credentials,
}

impl FixedCredentials {
    /// Default customer username.
    pub const DEFAULT_CUSTOMER_USERNAME: &'static str = "customer";
    /// Default customer password.
    pub const DEFAULT_CUSTOMER_PASSWORD: &'static str = "cust123";
    /// Default admin username.
    pub const DEFAULT_ADMIN_USERNAME: &'static str = "admin";
    /// Default admin password.
    pub const DEFAULT_ADMIN_PASSWORD: &'static str = "admin123";

    /// Create a verifier from explicit pairs.
    #[must_use]
    pub const fn new(customer: Credentials, admin: Credentials) -> Self {
        Self { customer, admin }
    }
}

impl Default for FixedCredentials {
    fn default() -> Self {
        Self::new(
            Credentials::new(
                Self::DEFAULT_CUSTOMER_USERNAME,
                Self::DEFAULT_CUSTOMER_PASSWORD,
            ),
            Credentials::new(Self::DEFAULT_ADMIN_USERNAME, Self::DEFAULT_ADMIN_PASSWORD),
        )
    }
}

impl Authenticator for FixedCredentials {
    fn verify(&self, role: SessionRole, username: &str, password: &str) -> Result<bool, AuthError> {
        Ok(match role {
            SessionRole::Customer => self.customer.matches(username, password),
            SessionRole::Admin => self.admin.matches(username, password),
            SessionRole::Anonymous => false,
        })
    }
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Role switched to the target.
    Success,
    /// Wrong username or password.
    InvalidCredentials,
    /// The verifier failed; retrying may succeed.
    Unavailable(AuthError),
}

impl LoginOutcome {
    /// `true` only for [`LoginOutcome::Success`].
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// The current client's role plus the verifier used to change it.
pub struct SessionStore {
    role: SessionRole,
    authenticator: Box<dyn Authenticator>,
}

impl SessionStore {
    /// Create an anonymous session using `authenticator` for logins.
    #[must_use]
    pub fn new(authenticator: impl Authenticator + 'static) -> Self {
        Self {
            role: SessionRole::Anonymous,
            authenticator: Box::new(authenticator),
        }
    }

    /// Attempt a customer login.
    pub fn login_as_customer(&mut self, username: &str, password: &str) -> LoginOutcome {
        self.login(SessionRole::Customer, username, password)
    }

    /// Attempt an admin login.
    pub fn login_as_admin(&mut self, username: &str, password: &str) -> LoginOutcome {
        self.login(SessionRole::Admin, username, password)
    }

    /// Return to anonymous.
    pub fn logout(&mut self) {
        self.role = SessionRole::Anonymous;
    }

    #[must_use]
    pub const fn role(&self) -> SessionRole {
        self.role
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, SessionRole::Admin)
    }

    #[must_use]
    pub const fn is_customer(&self) -> bool {
        matches!(self.role, SessionRole::Customer)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.role.is_authenticated()
    }

    fn login(&mut self, target: SessionRole, username: &str, password: &str) -> LoginOutcome {
        match self.authenticator.verify(target, username, password) {
            Ok(true) => {
                self.role = target;
                LoginOutcome::Success
            }
            Ok(false) => LoginOutcome::InvalidCredentials,
            Err(e) => LoginOutcome::Unavailable(e),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(FixedCredentials::default())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
