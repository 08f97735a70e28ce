//! Recording transport for tests.
//!
//! `RecordingTransport` keeps every written line in order.  When built with
//! [`RecordingTransport::driving`], it also applies each `m,<dx>,<dy>` line to
//! a [`SimulatedCursor`], standing in for the device plus the OS pointer so
//! the motion loop can be run end to end.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use hidlink_core::{parse_line, Action, Step};

use crate::application::send_commands::{CommandTransport, TransportError};
use crate::infrastructure::cursor::mock::SimulatedCursor;

#[derive(Default)]
pub struct RecordingTransport {
    lines: Mutex<Vec<String>>,
    cursor: Option<Arc<SimulatedCursor>>,
    /// Number of writes that succeed before every further write fails.
    fail_after: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that also moves `cursor` for every move line.
    pub fn driving(cursor: Arc<SimulatedCursor>) -> Self {
        Self {
            cursor: Some(cursor),
            ..Self::default()
        }
    }

    /// A recorder whose writes fail once `count` lines were accepted.
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }

    /// Snapshot of all written lines, terminators included.
    pub fn lines(&self) -> Vec<String> {
        self.log().clone()
    }

    /// Written lines parsed back into actions.
    pub fn actions(&self) -> Vec<Action> {
        self.log()
            .iter()
            .filter_map(|line| parse_line(line.trim_end_matches('\n')).ok())
            .collect()
    }

    fn log(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CommandTransport for RecordingTransport {
    async fn write_line(&self, line: &str) -> Result<(), TransportError> {
        let mut log = self.log();
        if self.fail_after.is_some_and(|limit| log.len() >= limit) {
            return Err(TransportError::Write(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "recording transport closed",
            )));
        }
        log.push(line.to_string());

        if let Some(cursor) = &self.cursor {
            if let Ok(Action::Move { dx, dy }) = parse_line(line.trim_end_matches('\n')) {
                cursor.apply(Step::new(dx, dy));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::move_pointer::CursorSource;
    use hidlink_core::ScreenPoint;

    #[tokio::test]
    async fn test_records_lines_in_order() {
        let transport = RecordingTransport::new();

        transport.write_line("c\n").await.unwrap();
        transport.write_line("k,enter\n").await.unwrap();

        assert_eq!(transport.lines(), vec!["c\n", "k,enter\n"]);
    }

    #[tokio::test]
    async fn test_driving_applies_moves_to_cursor() {
        let cursor = Arc::new(SimulatedCursor::at(ScreenPoint::new(10, 10)));
        let transport = RecordingTransport::driving(Arc::clone(&cursor));

        transport.write_line("m,5,-3\n").await.unwrap();
        transport.write_line("c\n").await.unwrap();

        assert_eq!(cursor.cursor_position(), ScreenPoint::new(15, 7));
    }

    #[tokio::test]
    async fn test_failing_after_rejects_further_writes() {
        let transport = RecordingTransport::failing_after(1);

        assert!(transport.write_line("c\n").await.is_ok());
        assert!(transport.write_line("c\n").await.is_err());
        assert_eq!(transport.lines().len(), 1);
    }
}
