//! Async Rust client for the Visonic PowerManage cloud alarm API.
//!
//! The PowerManage cloud fronts a physical alarm panel with a small
//! REST surface. Authentication is a two-stage token dance: account
//! credentials buy a `User-Token`, which together with the panel user
//! code and serial buys a `Session-Token`; every subsequent call
//! carries both headers and either token being rejected invalidates
//! the pair.
//!
//! [`CloudClient`] owns that session and exposes one retrying
//! authenticated-request primitive underneath thin endpoint wrappers:
//!
//! ```no_run
//! use pmax_api::{ArmCommand, CloudClient, Credentials, TransportConfig};
//!
//! # async fn demo() -> Result<(), pmax_api::Error> {
//! let credentials = Credentials {
//!     email: "user@example.com".into(),
//!     password: "hunter2".to_string().into(),
//!     app_id: "00000000-0000-0000-0000-000000000000".into(),
//!     user_code: "1234".to_string().into(),
//!     panel_serial: "1B7EEB".into(),
//! };
//! let client = CloudClient::new(
//!     "https://visonic.stl.nu/rest_api/7.0".parse().expect("url"),
//!     credentials,
//!     &TransportConfig::default(),
//! )?;
//!
//! let status = client.status().await?; // logs in lazily
//! println!("connected: {:?}", status.connected);
//! client.set_state(ArmCommand::Away).await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod endpoints;
mod error;
mod models;
mod transport;

pub use auth::{Credentials, SessionTokens, VENDOR_APP_TYPE};
pub use client::{CloudClient, HEADER_SESSION_TOKEN, HEADER_USER_TOKEN};
pub use error::Error;
pub use models::{
    ArmCommand, DeviceEntry, EventEntry, PanelInfo, PartitionEntry, PartitionState,
    PartitionStatus, SetStateResponse, StatusResponse,
};
pub use transport::{
    DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF, DEFAULT_TIMEOUT, TransportConfig,
    VENDOR_USER_AGENT,
};
