use super::{Account, AccountProvider, ProviderError, Session};
use crate::cli::settings::Settings;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// Typed client for the Appwrite account REST API.
///
/// Stateless apart from the connection pool reqwest owns; one instance is
/// shared for the process lifetime and per-call session secrets are passed
/// explicitly.
pub struct AppwriteClient {
    http: Client,
    endpoint: Url,
    project_id: String,
    api_key: SecretString,
}

/// Error body shape shared by all Appwrite endpoints.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    error_type: String,
}

impl AppwriteClient {
    /// Build a client from the process settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(settings: &Settings) -> Result<Self, ProviderError> {
        let http = Client::builder().user_agent(crate::APP_USER_AGENT).build()?;

        Ok(Self {
            http,
            endpoint: settings.appwrite_endpoint.clone(),
            project_id: settings.appwrite_project_id.clone(),
            api_key: settings.appwrite_api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authenticated(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("x-appwrite-project", &self.project_id)
            .header("x-appwrite-key", self.api_key.expose_secret())
    }

    async fn deserialize_or_error<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn api_error(status: StatusCode, response: Response) -> ProviderError {
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        let message = if body.message.is_empty() {
            status.to_string()
        } else {
            body.message
        };

        ProviderError::Api {
            status: status.as_u16(),
            kind: body.error_type,
            message,
        }
    }
}

#[async_trait]
impl AccountProvider for AppwriteClient {
    async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, ProviderError> {
        let response = self
            .authenticated(self.http.post(self.url("/account")))
            .json(&json!({
                "userId": user_id,
                "email": email,
                "password": password,
                "name": name,
            }))
            .send()
            .await?;

        Self::deserialize_or_error(response).await
    }

    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ProviderError> {
        let response = self
            .authenticated(self.http.post(self.url("/account/sessions/email")))
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        Self::deserialize_or_error(response).await
    }

    async fn get_account(&self, session_secret: &str) -> Result<Account, ProviderError> {
        let response = self
            .authenticated(self.http.get(self.url("/account")))
            .header("x-appwrite-session", session_secret)
            .send()
            .await?;

        Self::deserialize_or_error(response).await
    }

    async fn delete_current_session(&self, session_secret: &str) -> Result<(), ProviderError> {
        let response = self
            .authenticated(self.http.delete(self.url("/account/sessions/current")))
            .header("x-appwrite-session", session_secret)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }
}
