// ── Monitor abstraction ──
//
// Lifecycle management for one panel connection: authentication,
// background polling, command dispatch, and snapshot publication
// through a watch channel.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pmax_api::{ArmCommand, CloudClient, EventEntry};
use serde::Serialize;

use crate::config::PanelConfig;
use crate::error::CoreError;
use crate::model::{AlarmState, PanelSnapshot};

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
///
/// `Unavailable` means the last refresh cycle failed; the previous
/// snapshot stays visible until a cycle succeeds again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Unavailable,
}

// ── Monitor ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. [`connect()`](Self::connect)
/// authenticates, performs the initial refresh, and (when a poll
/// interval is configured) spawns the background refresh task. Hosts
/// read through [`snapshot()`](Self::snapshot) / the accessors and
/// mutate through the three arm commands.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: PanelConfig,
    client: CloudClient,
    snapshot_tx: watch::Sender<PanelSnapshot>,
    connection_tx: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
    /// Serializes refresh cycles so a command-triggered refresh and a
    /// scheduled one cannot interleave their fetches.
    refresh_gate: Mutex<()>,
}

impl Monitor {
    /// Create a new Monitor from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to authenticate and start the
    /// background task.
    pub fn new(config: PanelConfig) -> Result<Self, CoreError> {
        let client = CloudClient::new(
            config.base_url.clone(),
            config.credentials(),
            &config.transport(),
        )?;
        let (snapshot_tx, _) = watch::channel(PanelSnapshot::default());
        let (connection_tx, _) = watch::channel(ConnectionState::Disconnected);

        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                snapshot_tx,
                connection_tx,
                cancel: CancellationToken::new(),
                poll_handle: Mutex::new(None),
                refresh_gate: Mutex::new(()),
            }),
        })
    }

    /// Access the panel configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Authenticate, run the initial refresh, and start polling.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self.inner.connection_tx.send(ConnectionState::Connecting);

        if let Err(err) = self.inner.client.login().await {
            let _ = self.inner.connection_tx.send(ConnectionState::Unavailable);
            return Err(err.into());
        }
        debug!("panel session established");

        self.refresh().await?;

        let interval_secs = self.inner.config.poll_interval_secs;
        if interval_secs > 0 {
            let monitor = self.clone();
            let cancel = self.inner.cancel.clone();
            let handle = tokio::spawn(poll_task(monitor, interval_secs, cancel));
            *self.inner.poll_handle.lock().await = Some(handle);
            info!(interval_secs, "background polling started");
        }

        Ok(())
    }

    /// Stop the background task and forget the session.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.poll_handle.lock().await.take() {
            let _ = handle.await;
        }
        self.inner.client.logout().await;
        let _ = self.inner.connection_tx.send(ConnectionState::Disconnected);
    }

    // ── Refresh ──────────────────────────────────────────────────

    /// Run one full fetch cycle and publish the resulting snapshot.
    ///
    /// On any failure the previous snapshot is left untouched and the
    /// connection state flips to `Unavailable` until the next
    /// successful cycle.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let _gate = self.inner.refresh_gate.lock().await;

        match self.fetch_cycle().await {
            Ok(next) => {
                self.inner.snapshot_tx.send_replace(next);
                let _ = self.inner.connection_tx.send(ConnectionState::Connected);
                Ok(())
            }
            Err(err) => {
                let _ = self.inner.connection_tx.send(ConnectionState::Unavailable);
                Err(err)
            }
        }
    }

    /// Build the next snapshot from the previous one. Panel metadata
    /// is fetched only until the first success; everything else every
    /// cycle.
    async fn fetch_cycle(&self) -> Result<PanelSnapshot, CoreError> {
        let client = &self.inner.client;
        let mut next = self.inner.snapshot_tx.borrow().clone();

        if next.info.is_none() {
            next.info = Some(client.panel_info().await?);
        }

        let status = client.status().await?;
        next.apply_status(&status);

        let events = client.events().await?;
        next.apply_events(&events);

        let devices = client.devices().await?;
        next.apply_devices(&devices);

        next.refreshed_at = Some(Utc::now());
        Ok(next)
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Arm in home (perimeter) mode.
    pub async fn arm_home(&self) -> Result<(), CoreError> {
        self.command(ArmCommand::Home).await
    }

    /// Arm in away (full) mode.
    pub async fn arm_away(&self) -> Result<(), CoreError> {
        self.command(ArmCommand::Away).await
    }

    /// Disarm.
    pub async fn disarm(&self) -> Result<(), CoreError> {
        self.command(ArmCommand::Disarm).await
    }

    /// Issue a set-state call, then refresh so the snapshot reflects
    /// the command. Completion is not polled -- the panel reports the
    /// transitional status through the normal status feed.
    async fn command(&self, command: ArmCommand) -> Result<(), CoreError> {
        info!(state = command.vendor_state(), "dispatching arm command");
        self.inner
            .client
            .set_state(command)
            .await
            .map_err(|err| match err {
                pmax_api::Error::Api { status, message } => CoreError::CommandRejected {
                    message: format!("HTTP {status}: {message}"),
                },
                err @ pmax_api::Error::RetriesExhausted { .. } => CoreError::CommandRejected {
                    message: err.to_string(),
                },
                other => other.into(),
            })?;
        self.refresh().await
    }

    // ── Accessors ────────────────────────────────────────────────

    /// The current snapshot (cloned).
    pub fn snapshot(&self) -> PanelSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<PanelSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// The current display state.
    pub fn state(&self) -> AlarmState {
        self.inner.snapshot_tx.borrow().alarm_state()
    }

    /// Who last armed or disarmed the panel.
    pub fn changed_by(&self) -> String {
        self.inner
            .snapshot_tx
            .borrow()
            .changed_by
            .clone()
            .unwrap_or_else(|| crate::model::UNKNOWN_ACTOR.to_owned())
    }

    /// Whether the panel is reachable from the vendor cloud.
    pub fn online(&self) -> Option<bool> {
        self.inner.snapshot_tx.borrow().online
    }

    /// Whether the partition is ready to arm.
    pub fn ready(&self) -> Option<bool> {
        self.inner.snapshot_tx.borrow().ready
    }

    /// The current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        *self.inner.connection_tx.borrow()
    }

    /// Subscribe to connection-state changes.
    pub fn subscribe_connection(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_tx.subscribe()
    }

    // ── Ad-hoc queries (bypass the snapshot) ─────────────────────

    /// The raw event feed, oldest first.
    pub async fn events(&self) -> Result<Vec<EventEntry>, CoreError> {
        Ok(self.inner.client.events().await?)
    }

    /// Active alerts, loosely typed.
    pub async fn alerts(&self) -> Result<serde_json::Value, CoreError> {
        Ok(self.inner.client.alerts().await?)
    }

    /// Open trouble conditions, loosely typed.
    pub async fn troubles(&self) -> Result<serde_json::Value, CoreError> {
        Ok(self.inner.client.troubles().await?)
    }

    /// Validate the configured credentials with a full login.
    pub async fn verify(&self) -> Result<(), CoreError> {
        Ok(self.inner.client.verify_credentials().await?)
    }
}

// ── Background task ──────────────────────────────────────────────

async fn poll_task(monitor: Monitor, interval_secs: u64, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately; connect() already refreshed.
    ticker.tick().await;

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(error) = monitor.refresh().await {
                    warn!(%error, "scheduled refresh failed");
                }
            }
        }
    }
    debug!("poll task stopped");
}
