//! Transports that carry command lines to the device.
//!
//! - [`SerialTransport`]: the real link, a serial port opened with the
//!   `serialport` crate at a fixed baud rate.
//! - [`StdoutTransport`]: writes lines to standard output.  Piping it into
//!   `hidlink-device --stdin` on the same machine gives a full loop without
//!   hardware.
//! - [`mock::RecordingTransport`]: in-memory recorder for tests.
//!
//! # Why `spawn_blocking`? (for beginners)
//!
//! `serialport` writes are ordinary blocking calls that may wait up to the
//! port's write timeout.  Calling them directly inside an `async fn` would
//! stall the Tokio worker thread, so each line is written on Tokio's blocking
//! pool and the async caller simply awaits the result.

pub mod mock;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serialport::SerialPort;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::application::send_commands::{CommandTransport, TransportError};

/// Write timeout of the serial port.
pub const SERIAL_WRITE_TIMEOUT: Duration = Duration::from_millis(100);

/// Serial link to the device.
pub struct SerialTransport {
    port: Arc<Mutex<Box<dyn SerialPort>>>,
}

impl SerialTransport {
    /// Opens `port` at `baud_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] if the port does not exist, is busy or
    /// rejects the settings.
    pub fn open(port: &str, baud_rate: u32) -> Result<Self, TransportError> {
        let handle = serialport::new(port, baud_rate)
            .timeout(SERIAL_WRITE_TIMEOUT)
            .open()
            .map_err(|e| TransportError::Open {
                port: port.to_string(),
                reason: e.to_string(),
            })?;
        info!(port, baud_rate, "serial port open");
        Ok(Self {
            port: Arc::new(Mutex::new(handle)),
        })
    }
}

#[async_trait]
impl CommandTransport for SerialTransport {
    async fn write_line(&self, line: &str) -> Result<(), TransportError> {
        write_blocking(Arc::clone(&self.port), line.as_bytes().to_vec()).await
    }
}

/// Writes and flushes `bytes` on the blocking pool.
async fn write_blocking<W>(sink: Arc<Mutex<W>>, bytes: Vec<u8>) -> Result<(), TransportError>
where
    W: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || -> io::Result<()> {
        let mut sink = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sink.write_all(&bytes)?;
        sink.flush()
    })
    .await
    .map_err(|join| TransportError::Write(io::Error::other(join)))??;
    Ok(())
}

/// Writes command lines to standard output.
pub struct StdoutTransport {
    out: tokio::sync::Mutex<tokio::io::Stdout>,
}

impl StdoutTransport {
    pub fn new() -> Self {
        Self {
            out: tokio::sync::Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandTransport for StdoutTransport {
    async fn write_line(&self, line: &str) -> Result<(), TransportError> {
        let mut out = self.out.lock().await;
        out.write_all(line.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}
