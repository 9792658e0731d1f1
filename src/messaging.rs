//! Back-office messages. The MQTT client sits behind [`Transport`].

use serde::Serialize;
use thiserror::Error;

use crate::constants::{
    BACK_OFFICE_DEVICE_ID, CLIENT_ID_PREFIX, DEFAULT_BROKER_HOST, DEFAULT_BROKER_PORT,
};

/// Application state codes reported to the back office.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SoftState {
    Unknown = 0,
    Ready = 1,
    GameInLobby = 110,
    GameLaunched = 112,
    GameInParty = 115,
    GameChecking = 122,
    GameSafetying = 125,
    GameHostConnecting = 128,
}

impl SoftState {
    pub const ALL: [SoftState; 8] = [
        SoftState::Unknown,
        SoftState::Ready,
        SoftState::GameInLobby,
        SoftState::GameLaunched,
        SoftState::GameInParty,
        SoftState::GameChecking,
        SoftState::GameSafetying,
        SoftState::GameHostConnecting,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageItems {
    #[serde(rename = "SoftState")]
    pub soft_state: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BackOfficeMessage {
    #[serde(rename = "CallerDeviceID")]
    pub caller_device_id: i32,
    #[serde(rename = "TargetDeviceID")]
    pub target_device_id: i32,
    #[serde(rename = "sMethod")]
    pub method: String,
    #[serde(rename = "Items", skip_serializing_if = "Option::is_none")]
    pub items: Option<MessageItems>,
}

impl BackOfficeMessage {
    pub fn new(client_id: i32, method: impl Into<String>, soft_state: Option<i32>) -> Self {
        Self {
            caller_device_id: client_id,
            target_device_id: BACK_OFFICE_DEVICE_ID,
            method: method.into(),
            items: soft_state.map(|soft_state| MessageItems { soft_state }),
        }
    }

    pub fn to_json(&self) -> String {
        // plain struct of strings and integers, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// One-line JSON payload; `Items` is only present with a soft state.
pub fn format_message(client_id: i32, method: &str, soft_state: Option<i32>) -> String {
    BackOfficeMessage::new(client_id, method, soft_state).to_json()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_BROKER_PORT,
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BROKER_HOST)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

pub fn client_id_for(device_id: i32) -> String {
    format!("{CLIENT_ID_PREFIX}{device_id}")
}

/// Notifications a transport reports back to its owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Connected,
    Disconnected,
    Error { code: i32, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport is not connected")]
    NotConnected,
    #[error("transport error {code}: {message}")]
    Rejected { code: i32, message: String },
}

pub trait Transport {
    /// Start connecting; completion is reported as [`TransportEvent::Connected`].
    fn connect(&mut self, endpoint: &Endpoint, client_id: &str) -> Result<(), TransportError>;

    fn disconnect(&mut self);

    fn publish(&mut self, topic: Option<&str>, payload: &str) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool;
}

pub fn connect_device(
    transport: &mut impl Transport,
    endpoint: &Endpoint,
    device_id: i32,
) -> Result<(), TransportError> {
    let client_id = client_id_for(device_id);
    log::info!("connecting to {endpoint} (id: {client_id})");
    transport.connect(endpoint, &client_id)
}

/// Report `state` for device `client_id` to the back office.
pub fn publish_soft_state(
    transport: &mut impl Transport,
    client_id: i32,
    method: &str,
    state: SoftState,
) -> Result<(), TransportError> {
    if !transport.is_connected() {
        log::warn!("dropping {method} ({state:?}): transport not connected");
        return Err(TransportError::NotConnected);
    }
    let payload = format_message(client_id, method, Some(state.code()));
    log::debug!("publish {payload}");
    transport.publish(None, &payload)
}

/// Log a transport notification at the matching level.
pub fn log_event(event: &TransportEvent) {
    match event {
        TransportEvent::Connected => log::info!("back office connected"),
        TransportEvent::Disconnected => log::info!("back office disconnected"),
        TransportEvent::Error { code, message } => {
            log::error!("back office error {code}: {message}")
        }
    }
}
