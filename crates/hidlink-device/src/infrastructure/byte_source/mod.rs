//! Byte sources the device reads commands from.
//!
//! - [`SerialByteSource`] – the USB CDC serial port the host writes to.
//! - [`StdinByteSource`] – standard input, for driving the device by hand
//!   (`printf 'k,enter\n' | hidlink-device --stdin --emulator log`).

use std::io::{self, Read};
use std::time::Duration;

use crate::application::serve::{ByteSource, ReadStatus};

/// How long one serial read waits before reporting [`ReadStatus::Idle`].
pub const SERIAL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Serial-port byte source backed by the `serialport` crate.
pub struct SerialByteSource {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialByteSource {
    /// Opens `path` at `baud_rate` (8N1, no flow control).
    ///
    /// # Errors
    ///
    /// Returns the `serialport` error if the port does not exist or is busy.
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, baud_rate)
            .timeout(SERIAL_POLL_INTERVAL)
            .open()?;
        tracing::info!(port = path, baud_rate, "serial port opened");
        Ok(Self { port })
    }
}

impl ByteSource for SerialByteSource {
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<ReadStatus> {
        match self.port.read(buf) {
            Ok(0) => Ok(ReadStatus::Idle),
            Ok(n) => Ok(ReadStatus::Bytes(n)),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(ReadStatus::Idle),
            Err(e) => Err(e),
        }
    }
}

/// Byte source reading the process's standard input.
pub struct StdinByteSource<R = io::Stdin> {
    input: R,
}

impl StdinByteSource {
    pub fn new() -> Self {
        Self { input: io::stdin() }
    }
}

impl Default for StdinByteSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read + Send> StdinByteSource<R> {
    /// Reads from any reader instead of the real stdin.
    pub fn from_reader(input: R) -> Self {
        Self { input }
    }
}

impl<R: Read + Send> ByteSource for StdinByteSource<R> {
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<ReadStatus> {
        match self.input.read(buf)? {
            0 => Ok(ReadStatus::Closed),
            n => Ok(ReadStatus::Bytes(n)),
        }
    }
}
