//! Appwrite account API integration.
//!
//! Handlers talk to [`AccountProvider`], never to the wire client directly,
//! so tests can substitute an in-memory double. [`AppwriteClient`] is the
//! production implementation.

pub mod account;
pub use self::account::AppwriteClient;

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Appwrite's account representation, as returned by the account endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "emailVerification", default)]
    pub email_verification: bool,
}

/// A provider-issued session. The secret is the cookie value; it must not
/// appear in logs, so `Debug` redacts it.
#[derive(Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    pub secret: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Failures reported while talking to Appwrite.
///
/// `Api` carries Appwrite's structured error `type` in `kind` so domain
/// errors can be detected without scraping text; the message substrings below
/// remain as a compatibility fallback.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },
    #[error("appwrite request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProviderError {
    /// True when the provider reports that the account already exists.
    ///
    /// Matches `type == "user_already_exists"`, falling back to the message
    /// substring `"already exists"`.
    #[must_use]
    pub fn is_user_exists(&self) -> bool {
        match self {
            Self::Api { kind, message, .. } => {
                kind == "user_already_exists"
                    || message.to_lowercase().contains("already exists")
            }
            Self::Transport(_) => false,
        }
    }

    /// True when the provider rejected the credentials.
    ///
    /// Matches `type == "user_invalid_credentials"` or
    /// `type == "general_unauthorized_scope"`, falling back to the message
    /// substrings `"invalid credentials"` and `"unauthorized"` or a bare
    /// HTTP 401.
    #[must_use]
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Self::Api {
                status,
                kind,
                message,
            } => {
                let message = message.to_lowercase();
                kind == "user_invalid_credentials"
                    || kind == "general_unauthorized_scope"
                    || message.contains("invalid credentials")
                    || message.contains("unauthorized")
                    || *status == 401
            }
            Self::Transport(_) => false,
        }
    }
}

/// The account operations this service needs from the identity provider.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Create a new account with the given unique id and credentials.
    async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, ProviderError>;

    /// Create an email/password session, signing the user in.
    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ProviderError>;

    /// Fetch the account that owns the given session secret.
    async fn get_account(&self, session_secret: &str) -> Result<Account, ProviderError>;

    /// Invalidate the session behind the given secret.
    ///
    /// Signout does not call this yet; see the note on the signout handler.
    async fn delete_current_session(&self, session_secret: &str) -> Result<(), ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, kind: &str, message: &str) -> ProviderError {
        ProviderError::Api {
            status,
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn user_exists_matches_structured_type() {
        let err = api_error(409, "user_already_exists", "unrelated text");
        assert!(err.is_user_exists());
        assert!(!err.is_invalid_credentials());
    }

    #[test]
    fn user_exists_matches_message_fallback() {
        let err = api_error(
            400,
            "general_argument_invalid",
            "A user with this email already exists",
        );
        assert!(err.is_user_exists());
    }

    #[test]
    fn invalid_credentials_matches_structured_type() {
        let err = api_error(
            401,
            "user_invalid_credentials",
            "Invalid credentials. Please check the email and password.",
        );
        assert!(err.is_invalid_credentials());
        assert!(!err.is_user_exists());
    }

    #[test]
    fn invalid_credentials_matches_unauthorized_scope() {
        let err = api_error(
            401,
            "general_unauthorized_scope",
            "User (role: guests) missing scope (account)",
        );
        assert!(err.is_invalid_credentials());
    }

    #[test]
    fn invalid_credentials_matches_unauthorized_message() {
        let err = api_error(403, "", "Unauthorized access to this resource");
        assert!(err.is_invalid_credentials());
    }

    #[test]
    fn invalid_credentials_matches_plain_401() {
        let err = api_error(401, "", "Unauthorized");
        assert!(err.is_invalid_credentials());
    }

    #[test]
    fn unknown_api_error_matches_neither() {
        let err = api_error(503, "general_service_disabled", "Service unavailable");
        assert!(!err.is_user_exists());
        assert!(!err.is_invalid_credentials());
    }

    #[test]
    fn session_debug_redacts_secret() {
        let session = Session {
            id: "session-1".to_string(),
            secret: "very-secret-token".to_string(),
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("very-secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn account_deserializes_appwrite_shape() {
        let account: Account = serde_json::from_str(
            r#"{"$id":"usr_1","email":"user@example.com","name":"John Doe","emailVerification":false}"#,
        )
        .unwrap();
        assert_eq!(account.id, "usr_1");
        assert_eq!(account.email, "user@example.com");
        assert!(!account.email_verification);
    }
}
