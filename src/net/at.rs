//! ESP-AT command builders and reply tokenizer.
//!
//! The modem speaks line-oriented AT over UART with two exceptions: the
//! `>` prompt after `AT+CIPSEND` has no line ending, and inbound TCP data
//! arrives as `+IPD,<len>:<len raw bytes>`.

use core::fmt::Write;

use heapless::String;

use crate::config::{MODEM_COMMAND_CAPACITY, MODEM_IPD_MAX_LEN};
use crate::error::TransportError;

/// One AT command line, CRLF included.
pub type Command = String<MODEM_COMMAND_CAPACITY>;

/// Final and unsolicited reply lines we act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    Ok,
    Error,
    Fail,
    SendOk,
    SendFail,
    /// `busy p...` / `busy s...`: previous command still running.
    Busy,
    AlreadyConnected,
    /// `CONNECT` or `<link>,CONNECT`.
    Connected,
    /// `CLOSED` or `<link>,CLOSED`.
    Closed,
    WifiGotIp,
    /// `+CWJAP:<code>` join failure reason.
    JoinFailed(u8),
    /// Anything else (echo, status chatter).
    Other,
}

/// One unit cut from the receive buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Reply(Reply),
    /// `>` data prompt.
    Prompt,
    /// `+IPD` payload at `buf[start..start + len]`.
    Data { start: usize, len: usize },
}

const IPD: &[u8] = b"+IPD,";

/// Cut the next token from the front of `buf`.
///
/// Returns the token and how many bytes it consumed, or `None` if `buf`
/// does not yet hold a complete token. Blank lines are consumed as
/// [`Reply::Other`].
pub fn next_token(buf: &[u8]) -> Option<(Token, usize)> {
    if buf.first() == Some(&b'>') {
        let consumed = if buf.get(1) == Some(&b' ') { 2 } else { 1 };
        return Some((Token::Prompt, consumed));
    }

    // A CRLF before any ':' means the header is garbage; it is dropped as
    // an ordinary line below.
    if buf.starts_with(IPD) && !has_crlf_before_colon(buf) {
        // Header may still be arriving.
        let colon = buf.iter().position(|&b| b == b':')?;
        let Some((start, len)) = ipd_header(buf) else {
            // Unparsable or impossible length: skip the header only.
            return Some((Token::Reply(Reply::Other), colon + 1));
        };
        let end = start.checked_add(len)?;
        if buf.len() < end {
            return None;
        }
        return Some((Token::Data { start, len }, end));
    }

    let end = buf.windows(2).position(|w| w == b"\r\n")?;
    Some((Token::Reply(classify(&buf[..end])), end + 2))
}

/// Payload offset and announced length of a `+IPD` frame at the front of
/// `buf`, once its header is complete. Lengths above
/// [`MODEM_IPD_MAX_LEN`] are rejected.
pub fn ipd_header(buf: &[u8]) -> Option<(usize, usize)> {
    if !buf.starts_with(IPD) {
        return None;
    }
    let colon = buf.iter().position(|&b| b == b':')?;
    let header = core::str::from_utf8(&buf[IPD.len()..colon]).ok()?;
    // Multi-link mode prefixes the link id: `+IPD,<id>,<len>:`.
    let len: usize = header.rsplit(',').next()?.parse().ok()?;
    if len > MODEM_IPD_MAX_LEN {
        return None;
    }
    Some((colon + 1, len))
}

fn has_crlf_before_colon(buf: &[u8]) -> bool {
    let crlf = buf.windows(2).position(|w| w == b"\r\n");
    let colon = buf.iter().position(|&b| b == b':');
    match (crlf, colon) {
        (Some(crlf), Some(colon)) => crlf < colon,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Classify a reply line (without CRLF).
pub fn classify(line: &[u8]) -> Reply {
    match line {
        b"OK" => Reply::Ok,
        b"ERROR" => Reply::Error,
        b"FAIL" => Reply::Fail,
        b"SEND OK" => Reply::SendOk,
        b"SEND FAIL" => Reply::SendFail,
        b"ALREADY CONNECTED" => Reply::AlreadyConnected,
        b"WIFI GOT IP" => Reply::WifiGotIp,
        _ if line.starts_with(b"busy ") => Reply::Busy,
        _ if line.starts_with(b"+CWJAP:") => core::str::from_utf8(&line[7..])
            .ok()
            .and_then(|code| code.parse().ok())
            .map_or(Reply::Other, Reply::JoinFailed),
        _ if line.ends_with(b"CONNECT") => Reply::Connected,
        _ if line.ends_with(b"CLOSED") => Reply::Closed,
        _ => Reply::Other,
    }
}

/// Plain command without parameters, e.g. `command("AT+CWMODE=1")`.
pub fn command(text: &str) -> Result<Command, TransportError> {
    let mut cmd = Command::new();
    cmd.push_str(text)
        .and_then(|_| cmd.push_str("\r\n"))
        .map_err(|_| TransportError::BufferOverflow)?;
    Ok(cmd)
}

/// `AT+CWJAP="<ssid>","<password>"`.
pub fn join(ssid: &str, password: &str) -> Result<Command, TransportError> {
    let mut cmd = Command::new();
    push(&mut cmd, "AT+CWJAP=\"")?;
    push_escaped(&mut cmd, ssid)?;
    push(&mut cmd, "\",\"")?;
    push_escaped(&mut cmd, password)?;
    push(&mut cmd, "\"\r\n")?;
    Ok(cmd)
}

/// `AT+CIPSTART="TCP","<host>",<port>`.
pub fn tcp_connect(host: &str, port: u16) -> Result<Command, TransportError> {
    let mut cmd = Command::new();
    write!(cmd, "AT+CIPSTART=\"TCP\",\"{}\",{}\r\n", host, port)
        .map_err(|_| TransportError::BufferOverflow)?;
    Ok(cmd)
}

/// `AT+CIPSEND=<len>`.
pub fn tcp_send(len: usize) -> Result<Command, TransportError> {
    let mut cmd = Command::new();
    write!(cmd, "AT+CIPSEND={}\r\n", len).map_err(|_| TransportError::BufferOverflow)?;
    Ok(cmd)
}

fn push(cmd: &mut Command, text: &str) -> Result<(), TransportError> {
    cmd.push_str(text).map_err(|_| TransportError::BufferOverflow)
}

/// ESP-AT string parameters need `\`, `"` and `,` escaped with `\`.
fn push_escaped(cmd: &mut Command, text: &str) -> Result<(), TransportError> {
    for c in text.chars() {
        if matches!(c, '\\' | '"' | ',') {
            cmd.push('\\').map_err(|_| TransportError::BufferOverflow)?;
        }
        cmd.push(c).map_err(|_| TransportError::BufferOverflow)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_replies() {
        assert_eq!(classify(b"OK"), Reply::Ok);
        assert_eq!(classify(b"ERROR"), Reply::Error);
        assert_eq!(classify(b"SEND OK"), Reply::SendOk);
        assert_eq!(classify(b"busy p..."), Reply::Busy);
        assert_eq!(classify(b"+CWJAP:3"), Reply::JoinFailed(3));
        assert_eq!(classify(b"0,CONNECT"), Reply::Connected);
        assert_eq!(classify(b"CLOSED"), Reply::Closed);
        assert_eq!(classify(b"WIFI CONNECTED"), Reply::Other);
        assert_eq!(classify(b"AT+CIPSTART"), Reply::Other);
    }

    #[test]
    fn lines_wait_for_crlf() {
        assert_eq!(next_token(b"OK"), None);
        assert_eq!(next_token(b"OK\r\nrest"), Some((Token::Reply(Reply::Ok), 4)));
        assert_eq!(next_token(b"\r\n"), Some((Token::Reply(Reply::Other), 2)));
    }

    #[test]
    fn prompt_has_no_line_ending() {
        assert_eq!(next_token(b"> "), Some((Token::Prompt, 2)));
        assert_eq!(next_token(b">"), Some((Token::Prompt, 1)));
    }

    #[test]
    fn ipd_frame_is_cut_by_length() {
        let buf = b"+IPD,17:HTTP/1.0 200 OK\r\nCLOSED\r\n";
        let (token, consumed) = next_token(buf).unwrap();
        assert_eq!(token, Token::Data { start: 8, len: 17 });
        assert_eq!(&buf[8..25], b"HTTP/1.0 200 OK\r\n");
        assert_eq!(next_token(&buf[consumed..]), Some((Token::Reply(Reply::Closed), 8)));
    }

    #[test]
    fn ipd_frame_with_link_id() {
        let buf = b"+IPD,0,2:hi";
        assert_eq!(next_token(buf), Some((Token::Data { start: 9, len: 2 }, 11)));
    }

    #[test]
    fn partial_ipd_frame_waits() {
        assert_eq!(next_token(b"+IPD,17:HTTP/1.0"), None);
        assert_eq!(next_token(b"+IPD,1"), None);
        assert_eq!(ipd_header(b"+IPD,17:HTTP/1.0"), Some((8, 17)));
        assert_eq!(ipd_header(b"OK\r\n"), None);
    }

    #[test]
    fn ipd_header_with_impossible_length_is_skipped() {
        let huge = b"+IPD,18446744073709551615:x";
        assert_eq!(ipd_header(huge), None);
        assert_eq!(next_token(huge), Some((Token::Reply(Reply::Other), 26)));

        let overflowing = b"+IPD,99999999999999999999999:x";
        assert_eq!(next_token(overflowing), Some((Token::Reply(Reply::Other), 29)));

        assert_eq!(ipd_header(b"+IPD,2921:"), None);
        assert_eq!(ipd_header(b"+IPD,2920:"), Some((10, 2920)));
        assert_eq!(next_token(b"+IPD,2920:abc"), None);
    }

    #[test]
    fn join_command_escapes_specials() {
        let cmd = join("my,net", "pa\"ss\\").unwrap();
        assert_eq!(cmd.as_str(), "AT+CWJAP=\"my\\,net\",\"pa\\\"ss\\\\\"\r\n");
    }

    #[test]
    fn tcp_commands() {
        assert_eq!(
            tcp_connect("shutter-a.lan", 80).unwrap().as_str(),
            "AT+CIPSTART=\"TCP\",\"shutter-a.lan\",80\r\n"
        );
        assert_eq!(tcp_send(64).unwrap().as_str(), "AT+CIPSEND=64\r\n");
        assert_eq!(command("ATE0").unwrap().as_str(), "ATE0\r\n");
    }

    #[test]
    fn oversized_credentials_overflow() {
        let bytes = [b'x'; 200];
        let ssid = core::str::from_utf8(&bytes).unwrap();
        assert_eq!(join(ssid, "pw"), Err(TransportError::BufferOverflow));
    }
}
