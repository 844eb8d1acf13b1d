//! ESP-AT modem driver.
//!
//! Generic over any `embedded-io-async` byte stream, so the firmware hands
//! it a `BufferedUarte` and the tests hand it a scripted fake.

use embedded_io_async::{Read, Write};
use heapless::Vec;

use super::at::{self, Reply, Token};
use super::http;
use super::{Credentials, Network};
use crate::command::Transport;
use crate::config::MODEM_RX_CAPACITY;
use crate::error::TransportError;

/// Bytes of response kept for status-line parsing.
const RESPONSE_HEAD_CAPACITY: usize = 64;

/// Single-connection ESP-AT client.
pub struct EspAt<IO> {
    io: IO,
    rx: Vec<u8, MODEM_RX_CAPACITY>,
    /// Payload bytes of an oversized `+IPD` frame still to be dropped.
    discard: usize,
}

impl<IO: Read + Write> EspAt<IO> {
    pub fn new(io: IO) -> Self {
        Self {
            io,
            rx: Vec::new(),
            discard: 0,
        }
    }

    pub fn into_inner(self) -> IO {
        self.io
    }

    async fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.io
            .write_all(bytes)
            .await
            .map_err(|_| TransportError::Io)?;
        self.io.flush().await.map_err(|_| TransportError::Io)
    }

    /// Append whatever the modem has sent next to the receive buffer.
    async fn fill(&mut self) -> Result<(), TransportError> {
        let len = self.rx.len();
        let _ = self.rx.resize_default(MODEM_RX_CAPACITY);
        let read = self.io.read(&mut self.rx[len..]).await;
        let n = match read {
            Ok(0) | Err(_) => {
                self.rx.truncate(len);
                return Err(TransportError::Io);
            }
            Ok(n) => n,
        };

        let dropped = n.min(self.discard);
        self.discard -= dropped;
        self.rx.copy_within(len + dropped..len + n, len);
        self.rx.truncate(len + n - dropped);
        Ok(())
    }

    /// Next token at the front of the buffer, reading more as needed.
    ///
    /// The token is not consumed; pass the returned length to
    /// [`EspAt::consume`] once done with it.
    async fn token(&mut self) -> Result<(Token, usize), TransportError> {
        loop {
            if let Some(found) = at::next_token(&self.rx) {
                return Ok(found);
            }
            if self.rx.is_full() {
                // A frame bigger than the buffer: hand out what fits and
                // drop the rest as it arrives.
                if let Some((start, len)) = at::ipd_header(&self.rx) {
                    let available = self.rx.len() - start;
                    self.discard = len.saturating_sub(available);
                    return Ok((Token::Data { start, len: available }, self.rx.len()));
                }
                self.rx.clear();
                return Err(TransportError::BufferOverflow);
            }
            self.fill().await?;
        }
    }

    fn consume(&mut self, n: usize) {
        let n = n.min(self.rx.len());
        self.rx.copy_within(n.., 0);
        self.rx.truncate(self.rx.len() - n);
    }

    /// Next reply line, skipping prompts and stray data.
    async fn reply(&mut self) -> Result<Reply, TransportError> {
        loop {
            let (token, consumed) = self.token().await?;
            self.consume(consumed);
            if let Token::Reply(reply) = token {
                return Ok(reply);
            }
        }
    }

    /// Send `cmd` and wait for its final `OK`.
    async fn expect_ok(&mut self, cmd: &str) -> Result<(), TransportError> {
        self.send(cmd.as_bytes()).await?;
        loop {
            match self.reply().await? {
                Reply::Ok => return Ok(()),
                Reply::Error | Reply::Fail => return Err(TransportError::Rejected),
                Reply::Busy => return Err(TransportError::Busy),
                Reply::JoinFailed(code) => warn!("modem: join failed, reason {}", code),
                _ => {}
            }
        }
    }

    async fn open(&mut self, host: &str, port: u16) -> Result<(), TransportError> {
        let cmd = at::tcp_connect(host, port)?;
        self.send(cmd.as_bytes()).await?;

        let mut already_connected = false;
        loop {
            match self.reply().await? {
                Reply::Ok => return Ok(()),
                Reply::AlreadyConnected => already_connected = true,
                // A leftover link answers ALREADY CONNECTED then ERROR.
                Reply::Error if already_connected => return Ok(()),
                Reply::Error | Reply::Fail => return Err(TransportError::Connect),
                Reply::Busy => return Err(TransportError::Busy),
                _ => {}
            }
        }
    }

    /// Push the request through `AT+CIPSEND` and read back the status code.
    async fn exchange(&mut self, request: &[u8]) -> Result<u16, TransportError> {
        let cmd = at::tcp_send(request.len())?;
        self.send(cmd.as_bytes()).await?;

        loop {
            let (token, consumed) = self.token().await?;
            self.consume(consumed);
            match token {
                Token::Prompt => break,
                Token::Reply(Reply::Error | Reply::Closed | Reply::SendFail) => {
                    return Err(TransportError::Send)
                }
                Token::Reply(Reply::Busy) => return Err(TransportError::Busy),
                _ => {}
            }
        }

        self.send(request).await?;

        let mut head: Vec<u8, RESPONSE_HEAD_CAPACITY> = Vec::new();
        let mut received = false;
        loop {
            let (token, consumed) = self.token().await?;
            match token {
                Token::Data { start, len } => {
                    received = true;
                    let take = len.min(head.capacity() - head.len());
                    let _ = head.extend_from_slice(&self.rx[start..start + take]);
                    self.consume(consumed);

                    if let Some(status) = http::parse_status_line(&head)? {
                        return Ok(status);
                    }
                    if head.is_full() {
                        return Err(TransportError::MalformedResponse);
                    }
                }
                Token::Reply(Reply::SendFail | Reply::Error) => {
                    self.consume(consumed);
                    return Err(TransportError::Send);
                }
                Token::Reply(Reply::Closed) => {
                    self.consume(consumed);
                    return Err(if received {
                        TransportError::MalformedResponse
                    } else {
                        TransportError::NoResponse
                    });
                }
                _ => self.consume(consumed),
            }
        }
    }

    /// Drop the link; the shutter usually closes first, so ERROR is fine.
    async fn close(&mut self) -> Result<(), TransportError> {
        let cmd = at::command("AT+CIPCLOSE")?;
        match self.expect_ok(&cmd).await {
            Ok(()) | Err(TransportError::Rejected) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl<IO: Read + Write> Network for EspAt<IO> {
    async fn join(&mut self, credentials: &Credentials<'_>) -> Result<(), TransportError> {
        self.rx.clear();
        self.discard = 0;

        for line in ["AT", "ATE0", "AT+CWMODE=1"] {
            let cmd = at::command(line)?;
            self.expect_ok(&cmd).await?;
        }
        debug!("modem: station mode set");

        let cmd = at::join(credentials.ssid, credentials.password)?;
        self.expect_ok(&cmd).await?;
        info!("modem: joined network");
        Ok(())
    }
}

impl<IO: Read + Write> Transport for EspAt<IO> {
    async fn get(&mut self, url: &str) -> Result<u16, TransportError> {
        let parts = http::split_url(url)?;
        let request = http::build_request(&parts)?;

        self.open(parts.host, parts.port).await?;
        let status = self.exchange(request.as_bytes()).await;
        if let Err(e) = self.close().await {
            debug!("modem: close failed: {:?}", e);
        }
        status
    }
}
