use crate::api::handlers::valid_email;
use crate::appwrite::Account;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;
pub const NAME_MAX_LEN: usize = 128;

/// Signup payload. Validated before any provider call.
#[derive(ToSchema, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl SignupRequest {
    /// Check field constraints, returning every violation at once.
    ///
    /// # Errors
    /// Returns one entry per violated field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();

        if !valid_email(&self.email) {
            violations.push("email: value is not a valid email address".to_string());
        }

        let password_len = self.password.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&password_len) {
            violations.push(format!(
                "password: length must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters"
            ));
        }

        let name_len = self.name.chars().count();
        if !(1..=NAME_MAX_LEN).contains(&name_len) {
            violations.push(format!(
                "name: length must be between 1 and {NAME_MAX_LEN} characters"
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// Passwords stay out of Debug output.
impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// Signin payload. Only the email shape is validated; the provider is the
/// authority on the password.
#[derive(ToSchema, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    /// # Errors
    /// Returns one entry per violated field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        if valid_email(&self.email) {
            Ok(())
        } else {
            Err(vec!["email: value is not a valid email address".to_string()])
        }
    }
}

impl fmt::Debug for SigninRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigninRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User payload returned to clients.
///
/// Field names mirror Appwrite's account shape (`$id`, `emailVerification`);
/// existing clients depend on them, so they must not change.
#[derive(ToSchema, Serialize, Debug, Clone)]
pub struct UserRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "emailVerification")]
    pub email_verification: bool,
}

impl From<Account> for UserRecord {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            email_verification: account.email_verification,
        }
    }
}

/// Success body for all auth operations. `user` is `null` for signout.
#[derive(ToSchema, Serialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    pub user: Option<UserRecord>,
}

/// Error body: a single human-readable message, no structured codes.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub detail: String,
}
