// Endpoint wrappers
//
// Thin typed methods over the retrying request primitive. One method
// per vendor endpoint; decoding is tolerant (see `models`), so a
// sparse response never fails a fetch.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::{CloudClient, decode};
use crate::error::Error;
use crate::models::{
    ArmCommand, DeviceEntry, EventEntry, PanelInfo, SetStateResponse, StatusResponse,
};

impl CloudClient {
    /// Panel metadata (model, serial).
    ///
    /// `GET /panel_info`
    pub async fn panel_info(&self) -> Result<PanelInfo, Error> {
        debug!("fetching panel info");
        decode(self.get_json("panel_info").await?)
    }

    /// Current partition state and panel connectivity.
    ///
    /// `GET /status`
    pub async fn status(&self) -> Result<StatusResponse, Error> {
        debug!("fetching status");
        decode(self.get_json("status").await?)
    }

    /// The event feed, oldest first.
    ///
    /// `GET /events`
    pub async fn events(&self) -> Result<Vec<EventEntry>, Error> {
        debug!("fetching events");
        decode(self.get_json("events").await?)
    }

    /// All enrolled devices (contacts, motion sensors, keyfobs, ...).
    ///
    /// `GET /devices`
    pub async fn devices(&self) -> Result<Vec<DeviceEntry>, Error> {
        debug!("fetching devices");
        decode(self.get_json("devices").await?)
    }

    /// Active alerts.
    ///
    /// `GET /alerts` -- loosely typed because the shape varies by
    /// panel firmware.
    pub async fn alerts(&self) -> Result<Value, Error> {
        debug!("fetching alerts");
        self.get_json("alerts").await
    }

    /// Open trouble conditions (low battery, tamper, ...).
    ///
    /// `GET /troubles` -- loosely typed, same reason as `alerts`.
    pub async fn troubles(&self) -> Result<Value, Error> {
        debug!("fetching troubles");
        self.get_json("troubles").await
    }

    /// Arm or disarm the panel.
    ///
    /// `POST /set_state` with `{"partition": -1, "state": ...}`.
    /// Returns the vendor's process token, which could be polled via
    /// `/process_status` for completion; callers are expected to
    /// refresh `status()` instead.
    pub async fn set_state(&self, command: ArmCommand) -> Result<SetStateResponse, Error> {
        debug!(state = command.vendor_state(), "setting alarm state");
        let body = json!({
            "partition": -1,
            "state": command,
        });
        let value = self.post_json("set_state", body).await?;
        if value.is_null() {
            return Ok(SetStateResponse::default());
        }
        decode(value)
    }
}
