//! Portal sign-in state

use crate::wizard::Credentials;
use thiserror::Error;

/// Minimum password length accepted by the simulated sign-in
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("enter your email or NID number")]
    MissingIdentifier,
    #[error("enter your password")]
    MissingPassword,
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
}

/// Who is signed in, and how strongly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
    elevated: bool,
    pass_number: Option<String>,
}

impl Session {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            is_authenticated: self.user.is_some(),
            has_elevated_credential: self.elevated,
        }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn pass_number(&self) -> Option<&str> {
        self.pass_number.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// Simulated password sign-in: only the shape of the input is checked
    pub fn sign_in(&mut self, identifier: &str, password: &str) -> Result<(), AuthError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(AuthError::MissingIdentifier);
        }
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        tracing::info!("Signed in as {identifier}");
        self.user = Some(identifier.to_string());
        Ok(())
    }

    /// A verified SEVIS Pass signs the holder in with the elevated credential
    pub fn grant_pass(&mut self, holder: &str, pass_number: &str) {
        tracing::info!("SEVIS Pass {pass_number} granted");
        if self.user.is_none() {
            self.user = Some(holder.to_string());
        }
        self.elevated = true;
        self.pass_number = Some(pass_number.to_string());
    }

    pub fn sign_out(&mut self) {
        tracing::info!("Signed out");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::default();
        assert_eq!(session.credentials(), Credentials::default());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_sign_in_validation() {
        let mut session = Session::default();
        assert_eq!(
            session.sign_in("  ", "password1"),
            Err(AuthError::MissingIdentifier)
        );
        assert_eq!(session.sign_in("kila", ""), Err(AuthError::MissingPassword));
        assert_eq!(
            session.sign_in("kila", "short"),
            Err(AuthError::PasswordTooShort)
        );
        assert!(!session.is_authenticated());

        session.sign_in(" kila ", "long enough").unwrap();
        assert_eq!(session.user(), Some("kila"));
        assert!(session.is_authenticated());
        assert!(!session.is_elevated());
    }

    #[test]
    fn test_pass_elevates_and_signs_in() {
        let mut session = Session::default();
        session.grant_pass("Kila Amba", "SP-1");
        let credentials = session.credentials();
        assert!(credentials.is_authenticated);
        assert!(credentials.has_elevated_credential);
        assert_eq!(session.pass_number(), Some("SP-1"));
    }

    #[test]
    fn test_pass_keeps_existing_user() {
        let mut session = Session::default();
        session.sign_in("kila@example.pg", "password1").unwrap();
        session.grant_pass("Kila Amba", "SP-1");
        assert_eq!(session.user(), Some("kila@example.pg"));
    }

    #[test]
    fn test_sign_out_clears_both_flags() {
        let mut session = Session::default();
        session.grant_pass("Kila", "SP-1");
        session.sign_out();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::PasswordTooShort.to_string(),
            "password must be at least 8 characters"
        );
    }
}
