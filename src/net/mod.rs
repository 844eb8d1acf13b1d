//! Wi-Fi association and HTTP over an ESP-AT modem.
//!
//! The nRF52840 has no radio for Wi-Fi, so an ESP32 running the stock
//! ESP-AT firmware hangs off UARTE0. [`modem::EspAt`] implements both the
//! [`Network`] capability used at startup and the
//! [`Transport`](crate::command::Transport) used for shutter commands.

pub mod at;
pub mod http;
pub mod modem;

pub use modem::EspAt;

use crate::error::TransportError;

/// Station credentials for the home network.
#[derive(Clone, Copy, Debug)]
pub struct Credentials<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
}

/// Joining the network the shutters live on.
#[allow(async_fn_in_trait)]
pub trait Network {
    /// Associate as a station. Returns once an address has been obtained.
    async fn join(&mut self, credentials: &Credentials<'_>) -> Result<(), TransportError>;
}
