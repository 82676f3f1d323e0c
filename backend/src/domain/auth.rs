//! Authentication primitives such as sign-in credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when sign-in form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for SignInValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for SignInValidationError {}

/// Validated sign-in credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased, and non-empty. It is not checked for
///   shape here; an unknown address simply fails authentication.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use qa_backend::domain::SignInCredentials;
///
/// let creds = SignInCredentials::try_from_parts(" Ada@Example.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, SignInValidationError> {
        let normalised = email.trim();
        if normalised.is_empty() {
            return Err(SignInValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(SignInValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalised.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email suitable for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", SignInValidationError::EmptyEmail)]
    #[case("   ", "pw", SignInValidationError::EmptyEmail)]
    #[case("ada@example.com", "", SignInValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: SignInValidationError,
    ) {
        let err = SignInCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ada@example.com  ", " secret ")]
    #[case("ADA@EXAMPLE.COM", "correct horse battery staple")]
    fn valid_credentials_normalise_email(#[case] email: &str, #[case] password: &str) {
        let creds = SignInCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), "ada@example.com");
        assert_eq!(creds.password(), password);
    }
}
