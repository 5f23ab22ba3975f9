//! OAuth2 credential lifecycle
//!
//! The manager owns the single access/refresh token pair of a client session.
//! It can be initialized three ways (password grant, refresh grant, or tokens
//! restored from a previous session) and refreshes reactively: only after the
//! API rejects the current access token.
//!
//! The pair lives behind one `RwLock` and is always replaced as a whole, so a
//! reader sees either the old pair or the new pair. Token exchanges are
//! serialized by a separate mutex; callers that were rejected with a token
//! that has since been replaced get the current token without a second
//! exchange.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

use crate::error::{CfError, Result};

/// Lifecycle state of the credential manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// No tokens yet
    Uninitialized,
    /// Tokens available
    Ready,
    /// A refresh grant is in flight
    Refreshing,
    /// The last refresh grant was rejected; re-initialize to recover
    Failed,
}

/// Access/refresh token pair, always replaced together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Informational only; refresh is never triggered by it
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct CredentialState {
    status: CredentialStatus,
    tokens: Option<TokenPair>,
}

/// Token endpoint success response
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Token lifetime in seconds
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Token endpoint error response
#[derive(Deserialize, Debug)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

enum Grant<'a> {
    Password { username: &'a str, password: &'a str },
    RefreshToken(&'a str),
}

impl Grant<'_> {
    fn name(&self) -> &'static str {
        match self {
            Grant::Password { .. } => "password",
            Grant::RefreshToken(_) => "refresh_token",
        }
    }
}

/// Owns and refreshes the bearer token of a client session
pub struct CredentialManager {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    state: RwLock<CredentialState>,
    exchange_lock: Mutex<()>,
}

impl CredentialManager {
    /// Create an uninitialized manager exchanging tokens at `token_url`
    pub fn new(http: Client, token_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            http,
            token_url,
            client_id,
            client_secret,
            state: RwLock::new(CredentialState {
                status: CredentialStatus::Uninitialized,
                tokens: None,
            }),
            exchange_lock: Mutex::new(()),
        }
    }

    /// Exchange login and password for a token pair (password grant)
    ///
    /// On failure the previous state is left untouched.
    pub async fn init_with_password(&self, username: &str, password: &str) -> Result<()> {
        let _guard = self.exchange_lock.lock().await;
        debug!("Initializing credentials with password grant for '{}'", username);

        let response = self
            .exchange(Grant::Password { username, password })
            .await?;
        let refresh_token = response.refresh_token.ok_or_else(|| CfError::Authentication {
            status: None,
            message: "token response did not include a refresh_token".to_string(),
        })?;
        let pair = TokenPair {
            access_token: response.access_token,
            refresh_token,
            expires_at: expiry(response.expires_in),
        };

        self.replace(CredentialStatus::Ready, pair).await;
        info!("Logged in as '{}'", username);
        Ok(())
    }

    /// Exchange an existing refresh token for a fresh pair (refresh grant)
    ///
    /// On failure the previous state is left untouched.
    pub async fn init_with_refresh(&self, refresh_token: &str) -> Result<()> {
        let _guard = self.exchange_lock.lock().await;
        debug!("Initializing credentials with refresh grant");

        let response = self.exchange(Grant::RefreshToken(refresh_token)).await?;
        let pair = pair_from_refresh(response, refresh_token);
        self.replace(CredentialStatus::Ready, pair).await;
        Ok(())
    }

    /// Accept a previously obtained pair without contacting the server
    ///
    /// An empty token is refused with `NotInitialized` and the previous state
    /// is left untouched.
    pub async fn init_with_tokens(&self, access_token: String, refresh_token: String) -> Result<()> {
        if access_token.is_empty() || refresh_token.is_empty() {
            warn!("Refusing to initialize credentials with an empty token");
            return Err(CfError::NotInitialized);
        }
        let _guard = self.exchange_lock.lock().await;
        debug!("Initializing credentials with injected tokens");
        self.replace(
            CredentialStatus::Ready,
            TokenPair {
                access_token,
                refresh_token,
                expires_at: None,
            },
        )
        .await;
        Ok(())
    }

    pub async fn status(&self) -> CredentialStatus {
        self.state.read().await.status
    }

    /// Snapshot of the current pair
    pub async fn tokens(&self) -> Result<TokenPair> {
        let state = self.state.read().await;
        match (&state.status, &state.tokens) {
            (CredentialStatus::Uninitialized, _) | (_, None) => Err(CfError::NotInitialized),
            (_, Some(pair)) if pair.access_token.is_empty() => Err(CfError::NotInitialized),
            (_, Some(pair)) => Ok(pair.clone()),
        }
    }

    pub async fn access_token(&self) -> Result<String> {
        Ok(self.tokens().await?.access_token)
    }

    pub async fn refresh_token(&self) -> Result<String> {
        Ok(self.tokens().await?.refresh_token)
    }

    /// Refresh after the API rejected `rejected_access_token`
    ///
    /// Performs at most one refresh grant and returns the access token to
    /// retry with. If the pair was already replaced since the caller read it,
    /// the current access token is returned without an exchange.
    pub async fn refresh_after_rejection(&self, rejected_access_token: &str) -> Result<String> {
        let _guard = self.exchange_lock.lock().await;

        let (status, current) = {
            let state = self.state.read().await;
            match &state.tokens {
                Some(pair) if state.status != CredentialStatus::Uninitialized => {
                    (state.status, pair.clone())
                }
                _ => return Err(CfError::NotInitialized),
            }
        };

        if current.access_token != rejected_access_token {
            debug!("Access token was already refreshed by another request");
            return Ok(current.access_token);
        }

        if status == CredentialStatus::Failed {
            return Err(CfError::Authentication {
                status: None,
                message: "refresh token was rejected earlier, log in again".to_string(),
            });
        }

        self.set_status(CredentialStatus::Refreshing).await;
        debug!("Access token rejected, performing refresh grant");

        match self.exchange(Grant::RefreshToken(&current.refresh_token)).await {
            Ok(response) => {
                let pair = pair_from_refresh(response, &current.refresh_token);
                let access_token = pair.access_token.clone();
                self.replace(CredentialStatus::Ready, pair).await;
                info!("Access token refreshed");
                Ok(access_token)
            }
            Err(e) if e.is_connectivity() => {
                // No answer from the token endpoint; the stored pair may still be good
                self.set_status(CredentialStatus::Ready).await;
                Err(e)
            }
            Err(e) => {
                warn!("Token refresh failed: {}", e);
                self.set_status(CredentialStatus::Failed).await;
                Err(match e {
                    CfError::Authentication { .. } => e,
                    other => CfError::Authentication {
                        status: None,
                        message: other.to_string(),
                    },
                })
            }
        }
    }

    async fn replace(&self, status: CredentialStatus, pair: TokenPair) {
        let mut state = self.state.write().await;
        state.status = status;
        state.tokens = Some(pair);
    }

    async fn set_status(&self, status: CredentialStatus) {
        self.state.write().await.status = status;
    }

    /// POST a grant to the token endpoint
    async fn exchange(&self, grant: Grant<'_>) -> Result<TokenResponse> {
        let mut fields: Vec<(&str, &str)> = vec![
            ("grant_type", grant.name()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        match grant {
            Grant::Password { username, password } => {
                fields.push(("username", username));
                fields.push(("password", password));
            }
            Grant::RefreshToken(refresh_token) => fields.push(("refresh_token", refresh_token)),
        }

        debug!(
            "Requesting {} grant from: {}",
            grant.name(),
            self.token_url
        );

        let response = self
            .http
            .post(&self.token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(form_encode(&fields))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => body,
            };
            return Err(CfError::Authentication {
                status: Some(status.as_u16()),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| CfError::Authentication {
            status: Some(status.as_u16()),
            message: format!("could not parse token response: {}", e),
        })
    }
}

fn pair_from_refresh(response: TokenResponse, previous_refresh_token: &str) -> TokenPair {
    TokenPair {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .unwrap_or_else(|| previous_refresh_token.to_string()),
        expires_at: expiry(response.expires_in),
    }
}

fn expiry(expires_in: Option<i64>) -> Option<DateTime<Utc>> {
    expires_in.map(|secs| Utc::now() + Duration::seconds(secs))
}

fn form_encode(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
