// Cloud API HTTP client
//
// Wraps `reqwest::Client` with PowerManage URL construction, the
// two-token session cell, and the retrying authenticated-request
// primitive. Endpoint wrappers (status, events, etc.) are implemented
// as inherent methods in `endpoints.rs` to keep this module focused on
// transport mechanics.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{Credentials, SessionTokens};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Header carrying the account-level token from `POST /auth`.
pub const HEADER_USER_TOKEN: &str = "User-Token";
/// Header carrying the panel-level token from `POST /panel/login`.
pub const HEADER_SESSION_TOKEN: &str = "Session-Token";

/// Raw HTTP client for the PowerManage cloud API.
///
/// Owns the credentials and the token pair. All authenticated calls go
/// through [`execute`](Self::execute), which logs in lazily, retries on
/// failure, and keeps the two tokens valid-together-or-absent-together:
/// there is no representation of a half-authenticated session.
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    /// `None` = unauthenticated. Login-and-store happens under this
    /// lock, so concurrent callers cannot interleave a clear with a
    /// rewrite.
    session: Mutex<Option<SessionTokens>>,
    retry_attempts: u32,
    retry_backoff: std::time::Duration,
}

impl CloudClient {
    /// Create a new client from a [`TransportConfig`].
    ///
    /// `base_url` is the versioned API root, e.g.
    /// `https://visonic.stl.nu/rest_api/7.0`. No network I/O happens
    /// here; the first authenticated call performs the login.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            session: Mutex::new(None),
            retry_attempts: transport.retry_attempts.max(1),
            retry_backoff: transport.retry_backoff,
        })
    }

    /// The underlying HTTP client (used by the login flow).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build a full URL for an endpoint path, e.g. `"panel/login"`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Session management ───────────────────────────────────────────

    /// Perform the two-stage login and store the token pair.
    ///
    /// Any existing session is discarded first. A failure in either
    /// stage leaves the client unauthenticated -- the first stage's
    /// user token is never retained on its own.
    pub async fn login(&self) -> Result<(), Error> {
        let mut guard = self.session.lock().await;
        *guard = None;
        let tokens = self.authenticate().await?;
        *guard = Some(tokens);
        Ok(())
    }

    /// Drop the stored token pair. The vendor API has no logout
    /// endpoint; this only forgets the local session.
    pub async fn logout(&self) {
        *self.session.lock().await = None;
    }

    /// Whether a token pair is currently held.
    pub async fn has_session(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Return the current token pair, logging in first if there is none.
    async fn ensure_session(&self) -> Result<SessionTokens, Error> {
        let mut guard = self.session.lock().await;
        if let Some(tokens) = guard.as_ref() {
            return Ok(tokens.clone());
        }
        debug!("no session tokens held, logging in");
        let tokens = self.authenticate().await?;
        *guard = Some(tokens.clone());
        Ok(tokens)
    }

    async fn clear_session(&self) {
        *self.session.lock().await = None;
    }

    // ── Request primitive ────────────────────────────────────────────

    /// GET an endpoint through the retrying primitive.
    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, Error> {
        self.execute(path, None).await
    }

    /// POST a JSON body to an endpoint through the retrying primitive.
    pub(crate) async fn post_json(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.execute(path, Some(body)).await
    }

    /// The authenticated-request primitive.
    ///
    /// Loops over a fixed attempt budget. Each attempt: ensure a
    /// session (a login failure propagates immediately -- it is not a
    /// retryable request failure), send a GET (no body) or POST (JSON
    /// body) carrying both token headers, and accept 200/204. Any
    /// other outcome -- non-2xx status or transport failure -- clears
    /// the token pair, waits the fixed backoff, and consumes one
    /// attempt. Exhausting the budget yields
    /// [`Error::RetriesExhausted`] wrapping the final failure.
    ///
    /// The original mobile client retried HTTP failures but gave up on
    /// the first transport error; here both consume an attempt, one
    /// deliberate policy for both failure classes.
    async fn execute(&self, path: &str, body: Option<Value>) -> Result<Value, Error> {
        let url = self.api_url(path);
        let mut last: Option<Error> = None;

        for attempt in 1..=self.retry_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry_backoff).await;
            }

            let tokens = self.ensure_session().await?;

            match self.try_send(&url, body.as_ref(), &tokens).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!(%url, attempt, error = %err, "request attempt failed");
                    self.clear_session().await;
                    last = Some(err);
                }
            }
        }

        Err(Error::RetriesExhausted {
            attempts: self.retry_attempts,
            last: Box::new(last.unwrap_or(Error::Authentication {
                message: "no attempts were made".into(),
            })),
        })
    }

    /// One send: build, dispatch, triage the status, parse the body.
    async fn try_send(
        &self,
        url: &Url,
        body: Option<&Value>,
        tokens: &SessionTokens,
    ) -> Result<Value, Error> {
        let builder = match body {
            Some(json) => self.http.post(url.clone()).json(json),
            None => self.http.get(url.clone()),
        };

        let resp = builder
            .header(HEADER_USER_TOKEN, &tokens.user_token)
            .header(HEADER_SESSION_TOKEN, &tokens.session_token)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK && status != reqwest::StatusCode::NO_CONTENT {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }

        debug!(%url, %status, "request succeeded");

        let text = resp.text().await.map_err(Error::Transport)?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&text)),
        })
    }
}

/// Decode a JSON value into a typed wire model.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
    })
}

/// First ~200 bytes of a body for error messages, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
