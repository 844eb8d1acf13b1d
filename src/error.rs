//! Unified error type for shutter-remote.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for on-target logging when the `defmt`
//! feature is enabled.

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The network capability failed.
    Transport(TransportError),

    /// Joining the Wi-Fi network did not finish in time.
    JoinTimeout,

    /// SPI transaction to the display failed.
    Display,
}

/// Failures of the modem link and HTTP exchange (keeps the enum `Copy`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// UART read/write failed or the stream ended.
    Io,
    /// Reply or request did not fit its fixed buffer.
    BufferOverflow,
    /// URL is not `http://host[:port]/path`.
    InvalidUrl,
    /// Modem answered `ERROR` or `FAIL`.
    Rejected,
    /// Modem is still processing a previous command.
    Busy,
    /// TCP connection to the shutter could not be opened.
    Connect,
    /// Request bytes were not accepted.
    Send,
    /// Connection closed before an HTTP status line arrived.
    NoResponse,
    /// Response did not start with a parseable HTTP status line.
    MalformedResponse,
}

// Convenience conversions

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}
