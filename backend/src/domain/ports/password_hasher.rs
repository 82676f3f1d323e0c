//! Port for password hashing so services never depend on a specific KDF.

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing or verifying passwords.
    pub enum PasswordHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        Malformed { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes and verifies passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing hash string for `password`.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
