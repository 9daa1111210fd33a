//! API client for communicating with the preventivi gateway.
//!
//! This module provides the `ApiClient` struct for logging in, registering
//! and fetching the authenticated user's loan quotes. Successful login and
//! registration commit the session to the `SessionStore`; a 401 on the
//! quotes endpoint clears it.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::auth::{Session, SessionStore, StorageError};
use crate::models::{Quote, User};

use super::ApiError;

/// Base URL of the production gateway.
const DEFAULT_BASE_URL: &str = "https://gateway.teamupservice.com/api/v2";

/// HTTP request timeout in seconds. Fixed contract: the client performs no
/// retries, so a bounded timeout is the only thing standing between a dead
/// network and a hung caller.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    token: String,
    user_id: i64,
}

/// API client for the preventivi gateway.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: SessionStore,
}

impl ApiClient {
    /// Create a client against the production gateway.
    pub fn new(store: SessionStore) -> Result<Self, reqwest::Error> {
        Self::with_base_url(store, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom gateway base URL (no trailing slash).
    pub fn with_base_url(store: SessionStore, base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// The session store this client reads tokens from and commits to.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Authenticate with email and password.
    ///
    /// On success the returned token and user profile are committed to the
    /// session store together before this returns. A rejected login surfaces
    /// as `ApiError::Credentials` carrying the server's message.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = format!("{}/users/login", self.base_url);
        debug!(%url, "Sending login request");

        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        let text = response.text().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            warn!(status = %status, "Login rejected");
            return Err(ApiError::Credentials(ApiError::server_message(&text)));
        }

        let parsed: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        self.store.set(&parsed.token, &parsed.user)?;
        info!(user_id = parsed.user.id, "Login succeeded");

        Ok(Session {
            token: parsed.token,
            user: parsed.user,
        })
    }

    /// Register a new account.
    ///
    /// The gateway returns only the new user id; the local profile is
    /// synthesized from the submitted fields plus that id, then committed
    /// alongside the token. `last_name` may be empty.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let url = format!("{}/users/register", self.base_url);
        debug!(%url, "Sending registration request");

        let body = serde_json::json!({
            "nome": first_name,
            "cognome": last_name,
            "email": email,
            "password": password,
        });
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        let text = response.text().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            warn!(status = %status, "Registration rejected");
            return Err(ApiError::Credentials(ApiError::server_message(&text)));
        }

        let parsed: RegisterResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        let user = User {
            id: parsed.user_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        };

        self.store.set(&parsed.token, &user)?;
        info!(user_id = user.id, "Registration succeeded");

        Ok(Session {
            token: parsed.token,
            user,
        })
    }

    /// Fetch the authenticated user's loan quotes.
    ///
    /// Fails with `ApiError::MissingToken` before any request is sent when
    /// no session is stored. A 401 from the gateway clears the session store
    /// and surfaces as `ApiError::SessionExpired` so the caller can route to
    /// re-authentication instead of showing a generic error.
    pub async fn get_quotes(&self) -> Result<Vec<Quote>, ApiError> {
        let session = match self.store.get()? {
            Some(session) => session,
            None => return Err(ApiError::MissingToken),
        };

        let url = format!("{}/preventivi", self.base_url);
        debug!(%url, "Fetching quotes");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Token rejected by gateway, clearing session");
            self.store.clear()?;
            return Err(ApiError::SessionExpired);
        }

        let text = response.text().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            warn!(status = %status, "Quote fetch failed");
            return Err(ApiError::Request(ApiError::server_message(&text)));
        }

        let quotes: Vec<Quote> = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        debug!(count = quotes.len(), "Quotes received");

        Ok(quotes)
    }

    /// Log out locally: clears the session store. The gateway is not
    /// informed; tokens simply lapse server-side.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.clear()?;
        info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{
            "message": "Login effettuato con successo",
            "user": {"id": 1, "nome": "A", "cognome": "B", "email": "a@b.com"},
            "token": "T"
        }"#;

        let parsed: LoginResponse =
            serde_json::from_str(json).expect("Failed to parse login response");
        assert_eq!(parsed.token, "T");
        assert_eq!(parsed.user.id, 1);
        assert_eq!(parsed.user.first_name, "A");
        assert_eq!(parsed.user.email, "a@b.com");
    }

    #[test]
    fn test_parse_register_response() {
        let json = r#"{"message": "Registrazione completata", "user_id": 42, "token": "tok"}"#;

        let parsed: RegisterResponse =
            serde_json::from_str(json).expect("Failed to parse register response");
        assert_eq!(parsed.user_id, 42);
        assert_eq!(parsed.token, "tok");
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        let client = ApiClient::with_base_url(store, "http://localhost:9/api/v2/")
            .expect("Failed to build client");
        assert_eq!(client.base_url, "http://localhost:9/api/v2");
    }
}
