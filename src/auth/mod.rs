pub mod store;

pub use store::{CredentialStore, UserCredential};

use crate::config::Config;
use crate::error::{google_api_error, BotResult, Error};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Scope requested for linked accounts
pub const SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Fallback access-token lifetime when the token endpoint omits one
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Shape of a token endpoint response, for both exchange and refresh
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
}

/// Two-step authorization flow against the Google OAuth service
#[derive(Debug, Clone)]
pub struct OAuthFlow {
    client_id: String,
    client_secret: String,
    http: Client,
}

impl OAuthFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            http: Client::new(),
        }
    }

    /// Step 1: the URL the user visits to obtain an authorization code
    pub fn authorize_url(&self) -> BotResult<String> {
        let url = Url::parse_with_params(
            AUTH_ENDPOINT,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", REDIRECT_URI),
                ("scope", SCOPE),
                ("response_type", "code"),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| google_api_error(&format!("Failed to build authorization URL: {}", e)))?;
        Ok(url.into())
    }

    /// Step 2: exchange a user-supplied authorization code for a credential.
    /// A rejected code is reported as `InvalidAuthCode`, anything else as a
    /// Google API error.
    pub async fn exchange_code(&self, code: &str) -> BotResult<UserCredential> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", REDIRECT_URI),
            ("grant_type", "authorization_code"),
        ];

        let response = self.http.post(TOKEN_ENDPOINT).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            if error_body.contains("invalid_grant") {
                return Err(Error::InvalidAuthCode);
            }
            return Err(google_api_error(&format!(
                "Failed to exchange authorization code: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response.json().await?;
        let refresh_token = token
            .refresh_token
            .ok_or_else(|| google_api_error("Token response missing 'refresh_token' field"))?;

        Ok(UserCredential {
            access_token: token.access_token,
            refresh_token,
            expires_at: Utc::now().timestamp() + token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            scope: token.scope.unwrap_or_else(|| SCOPE.to_string()),
        })
    }

    /// Exchange the refresh token for a fresh access token
    async fn refresh_credential(&self, credential: &UserCredential) -> BotResult<UserCredential> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", credential.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self.http.post(TOKEN_ENDPOINT).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_api_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response.json().await?;

        // The refresh grant usually omits the refresh token; keep the stored one
        Ok(UserCredential {
            access_token: token.access_token,
            refresh_token: token
                .refresh_token
                .unwrap_or_else(|| credential.refresh_token.clone()),
            expires_at: Utc::now().timestamp() + token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            scope: token
                .scope
                .unwrap_or_else(|| credential.scope.clone()),
        })
    }

    /// Load the credential for a chat and refresh it in place. Returns None
    /// when no record exists; a failed exchange propagates as an error so the
    /// caller can tell "unknown error" from "not logged in".
    pub async fn refresh(
        &self,
        store: &CredentialStore,
        chat_id: i64,
    ) -> BotResult<Option<UserCredential>> {
        let Some(credential) = store.load(chat_id)? else {
            return Ok(None);
        };
        let refreshed = self.refresh_credential(&credential).await?;
        store.save(chat_id, &refreshed)?;
        Ok(Some(refreshed))
    }
}
