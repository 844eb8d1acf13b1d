//! Minimal HTTP/1.0 framing for the shutter endpoint.
//!
//! Only what a one-shot GET needs: split the URL, write the request head
//! and read the status code off the first response line.

use core::fmt::Write;

use heapless::String;

use crate::config::HTTP_REQUEST_CAPACITY;
use crate::error::TransportError;

const SCHEME: &str = "http://";
const DEFAULT_PORT: u16 = 80;

/// Host, port and path of an `http://` URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub host: &'a str,
    pub port: u16,
    pub path: &'a str,
}

/// Split `http://host[:port][/path]`.
pub fn split_url(url: &str) -> Result<UrlParts<'_>, TransportError> {
    let rest = url.strip_prefix(SCHEME).ok_or(TransportError::InvalidUrl)?;
    let (authority, path) = match rest.find('/') {
        Some(slash) => (&rest[..slash], &rest[slash..]),
        None => (rest, "/"),
    };

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (
            host,
            port.parse::<u16>().map_err(|_| TransportError::InvalidUrl)?,
        ),
        None => (authority, DEFAULT_PORT),
    };

    if host.is_empty() {
        return Err(TransportError::InvalidUrl);
    }

    Ok(UrlParts { host, port, path })
}

/// Request head for a GET; the peer closes after answering.
pub fn build_request(parts: &UrlParts<'_>) -> Result<String<HTTP_REQUEST_CAPACITY>, TransportError> {
    let mut request = String::new();
    write!(
        request,
        "GET {} HTTP/1.0\r\nHost: {}\r\nConnection: close\r\n\r\n",
        parts.path, parts.host
    )
    .map_err(|_| TransportError::BufferOverflow)?;
    Ok(request)
}

/// Status code from `HTTP/1.x NNN ...`, once the whole line has arrived.
///
/// `Ok(None)` means more bytes are needed.
pub fn parse_status_line(head: &[u8]) -> Result<Option<u16>, TransportError> {
    let Some(end) = head.windows(2).position(|w| w == b"\r\n") else {
        return Ok(None);
    };
    let line = core::str::from_utf8(&head[..end]).map_err(|_| TransportError::MalformedResponse)?;

    let mut fields = line.split(' ');
    let version = fields.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(TransportError::MalformedResponse);
    }

    let code = fields
        .next()
        .filter(|c| c.len() == 3)
        .and_then(|c| c.parse::<u16>().ok())
        .ok_or(TransportError::MalformedResponse)?;
    Ok(Some(code))
}
