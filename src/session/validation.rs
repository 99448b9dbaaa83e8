use super::errors::{ValidationError, MIN_PASSWORD_LEN};
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

static EMAIL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Lightweight email sanity check; the gateway has the final word.
pub fn valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

/// The signup form as submitted.
#[derive(Debug)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignupForm {
    /// Check the form in the order the user would fix it: the confirmation
    /// first, then length, then the remaining fields.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let password = self.password.expose_secret();

        if password != self.confirm_password.expose_secret() {
            return Err(ValidationError::PasswordMismatch);
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }

        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("Full name"));
        }

        if !valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }
}

/// Login only requires both fields to be filled in.
///
/// # Errors
/// Returns `Required` naming the first empty field.
pub fn validate_login(email: &str, password: &SecretString) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::Required("Email"));
    }

    if password.expose_secret().is_empty() {
        return Err(ValidationError::Required("Password"));
    }

    Ok(())
}
