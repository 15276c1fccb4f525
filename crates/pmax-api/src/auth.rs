// Two-stage authentication
//
// Stage one trades the account credentials for a user token
// (`POST /auth`); stage two trades the user token plus the panel user
// code and serial for a session token (`POST /panel/login`). Every
// authenticated call needs both tokens, and they expire together --
// a rejected request invalidates the pair, never one half.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::{CloudClient, HEADER_USER_TOKEN};
use crate::error::Error;

/// The `app_type` the panel-login endpoint expects.
pub const VENDOR_APP_TYPE: &str = "com.visonic.PowerMaxApp";

/// Everything needed to open a session. Immutable once the client is
/// constructed.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: SecretString,
    /// Installation identifier, registered with the vendor per app
    /// install (any UUID works).
    pub app_id: String,
    /// Panel user code (the code typed on the keypad).
    pub user_code: SecretString,
    /// Panel serial, e.g. `1B7EEB`.
    pub panel_serial: String,
}

/// The token pair. Held as `Option<SessionTokens>` inside the client,
/// so "half a session" is unrepresentable.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub user_token: String,
    pub session_token: String,
}

#[derive(Deserialize)]
struct UserTokenResponse {
    user_token: String,
}

#[derive(Deserialize)]
struct SessionTokenResponse {
    session_token: String,
}

impl CloudClient {
    /// Run both login stages and return the token pair.
    ///
    /// Does not touch the client's session cell -- the caller stores
    /// the result under the session lock. Failing the second stage
    /// discards the first stage's token with the error.
    pub(crate) async fn authenticate(&self) -> Result<SessionTokens, Error> {
        let credentials = self.credentials();

        // Stage one: account login.
        let url = self.api_url("auth");
        debug!(%url, "requesting user token");
        let resp = self
            .http()
            .post(url)
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password.expose_secret(),
                "app_id": credentials.app_id,
            }))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK && status != reqwest::StatusCode::NO_CONTENT {
            return Err(Error::Authentication {
                message: format!("user login failed (HTTP {status})"),
            });
        }

        let user: UserTokenResponse = resp.json().await.map_err(|e| Error::Authentication {
            message: format!("user login response malformed: {e}"),
        })?;

        // Stage two: panel login, carrying the stage-one token.
        let url = self.api_url("panel/login");
        debug!(%url, "requesting session token");
        let resp = self
            .http()
            .post(url)
            .header(HEADER_USER_TOKEN, &user.user_token)
            .json(&json!({
                "user_code": credentials.user_code.expose_secret(),
                "app_type": VENDOR_APP_TYPE,
                "app_id": credentials.app_id,
                "panel_serial": credentials.panel_serial,
            }))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK && status != reqwest::StatusCode::NO_CONTENT {
            return Err(Error::Authentication {
                message: format!("panel login failed (HTTP {status})"),
            });
        }

        let session: SessionTokenResponse =
            resp.json().await.map_err(|e| Error::Authentication {
                message: format!("panel login response malformed: {e}"),
            })?;

        debug!("login successful");
        Ok(SessionTokens {
            user_token: user.user_token,
            session_token: session.session_token,
        })
    }

    /// Validate the configured credentials by running the full login.
    ///
    /// Meant for hosts at configuration time (the "can we connect"
    /// probe before committing a config entry). On success the session
    /// is kept, so a follow-up fetch reuses it.
    pub async fn verify_credentials(&self) -> Result<(), Error> {
        self.login().await
    }
}
