//! Sign-in attempts.
//!
//! The storefront keeps no account store of its own; a [`LoginCredentials`]
//! value only guarantees the attempt is well formed before it reaches a
//! [`crate::domain::ports::LoginService`].

use std::fmt;

use zeroize::Zeroizing;

/// Why a sign-in payload was rejected before authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// A well-formed sign-in attempt.
///
/// The username is trimmed; the password is kept byte for byte, wiped on
/// drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use storefront::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" seller ", "hunter22").expect("valid");
/// assert_eq!(creds.username(), "seller");
/// assert!(!format!("{creds:?}").contains("hunter22"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form values.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        match (username.is_empty(), password.is_empty()) {
            (true, _) => Err(LoginValidationError::EmptyUsername),
            (false, true) => Err(LoginValidationError::EmptyPassword),
            (false, false) => Ok(Self {
                username: username.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            }),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case(" \t ", "", LoginValidationError::EmptyUsername)]
    #[case("seller", "", LoginValidationError::EmptyPassword)]
    fn blank_parts_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn password_whitespace_is_significant() {
        let creds = LoginCredentials::try_from_parts("  buyer@example.test ", " pass phrase ")
            .expect("valid credentials");
        assert_eq!(creds.username(), "buyer@example.test");
        assert_eq!(creds.password(), " pass phrase ");
    }

    #[rstest]
    fn debug_output_hides_the_password() {
        let creds = LoginCredentials::try_from_parts("admin", "password").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("\"password\""));
        assert!(rendered.contains("<redacted>"));
    }
}
