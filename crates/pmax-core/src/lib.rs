//! Domain layer between `pmax-api` and host consumers (CLI, bridges,
//! home-automation adapters).
//!
//! This crate owns the business logic and the reactive surface for the
//! pmax workspace:
//!
//! - **[`Monitor`]** — Central facade managing the full lifecycle:
//!   [`connect()`](Monitor::connect) authenticates, fetches an initial
//!   snapshot, then spawns a background polling task.
//!   The three arm commands (`arm_home` / `arm_away` / `disarm`)
//!   dispatch a set-state call and refresh the snapshot behind it.
//!
//! - **[`PanelSnapshot`]** — Last known panel state, published whole
//!   through a `tokio::sync::watch` channel. A failed refresh never
//!   publishes a partial view; the host keeps showing the previous
//!   snapshot while [`ConnectionState::Unavailable`] signals the gap.
//!
//! - **[`AlarmState`]** — The host-facing display vocabulary, a pure
//!   mapping from the vendor's partition state and transitional
//!   sub-status.
//!
//! - **[`PanelConfig`]** — Connection and polling configuration,
//!   constructed by the host; core never reads config files.

pub mod config;
pub mod error;
pub mod model;
pub mod monitor;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_SECS, PanelConfig};
pub use error::CoreError;
pub use monitor::{ConnectionState, Monitor};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AlarmState, ArmCommand, DeviceEntry, DoorSensor, EventEntry, PanelInfo, PanelSnapshot,
    PartitionState, PartitionStatus, changed_by,
};
