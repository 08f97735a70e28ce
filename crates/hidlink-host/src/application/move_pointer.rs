//! MovePointerUseCase: steers the remote pointer onto a screen coordinate.
//!
//! The device only understands relative moves, and the host cannot know how
//! the remote OS accelerates them.  The use case therefore closes the loop
//! itself: read the real cursor, plan one damped step with
//! [`plan_step`], send it, wait one tick, repeat.
//!
//! ```text
//! loop (at most max_iterations):
//!     diff = target - cursor_position()
//!     within tolerance? → stop
//!     send m,<step>      sleep tick
//! diff = target - cursor_position()
//! diff ≠ 0 → send one exact corrective m,<diff>
//! ```
//!
//! The final correction runs after *both* exits (tolerance reached or cap
//! hit), so the pointer ends exactly on target.

use std::sync::Arc;

use hidlink_core::{plan_step, MotionProfile, ScreenPoint};
use tracing::{debug, warn};

use super::send_commands::{CommandWriter, SendError};

/// Source of the host's current absolute cursor position.
///
/// Infrastructure implementations query the OS; tests script or simulate it.
#[cfg_attr(test, mockall::automock)]
pub trait CursorSource: Send + Sync {
    fn cursor_position(&self) -> ScreenPoint;
}

/// What a call to [`MovePointerUseCase::move_to`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Damped steps sent before the loop ended.
    pub iterations: u32,
    /// `true` if the loop stopped on the iteration cap rather than tolerance.
    pub hit_cap: bool,
    /// `true` if a final corrective move was sent.
    pub corrected: bool,
}

pub struct MovePointerUseCase {
    cursor: Arc<dyn CursorSource>,
    writer: Arc<CommandWriter>,
    profile: MotionProfile,
}

impl MovePointerUseCase {
    pub fn new(cursor: Arc<dyn CursorSource>, writer: Arc<CommandWriter>, profile: MotionProfile) -> Self {
        Self {
            cursor,
            writer,
            profile,
        }
    }

    /// Moves the pointer to `target`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SendError`]; the pointer is left wherever the
    /// last delivered step put it.
    pub async fn move_to(&self, target: ScreenPoint) -> Result<MoveReport, SendError> {
        let mut iterations = 0;
        let mut hit_cap = false;

        loop {
            let diff = target.delta_from(self.cursor.cursor_position());
            let Some(step) = plan_step(diff, &self.profile) else {
                break;
            };
            if iterations >= self.profile.max_iterations {
                hit_cap = true;
                warn!(
                    ?target,
                    remaining = ?diff,
                    "motion cap of {} steps reached; correcting",
                    self.profile.max_iterations
                );
                break;
            }
            self.writer.send_move(step.dx, step.dy).await?;
            iterations += 1;
            tokio::time::sleep(self.profile.tick).await;
        }

        let remaining = target.delta_from(self.cursor.cursor_position());
        let corrected = !remaining.is_zero();
        if corrected {
            self.writer.send_move(remaining.dx, remaining.dy).await?;
        }

        debug!(?target, iterations, hit_cap, corrected, "pointer move finished");
        Ok(MoveReport {
            iterations,
            hit_cap,
            corrected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use hidlink_core::{parse_line, Action};

    use crate::application::send_commands::{CommandTransport, PacingProfile, TransportError};

    /// Cursor plus transport: every move line is applied to the cursor,
    /// optionally scaled to imitate pointer acceleration.
    struct Desk {
        position: Mutex<ScreenPoint>,
        moves: Mutex<Vec<(i32, i32)>>,
        gain: f64,
    }

    impl Desk {
        fn at(x: i32, y: i32, gain: f64) -> Arc<Self> {
            Arc::new(Self {
                position: Mutex::new(ScreenPoint::new(x, y)),
                moves: Mutex::new(Vec::new()),
                gain,
            })
        }
    }

    impl CursorSource for Desk {
        fn cursor_position(&self) -> ScreenPoint {
            *self.position.lock().unwrap()
        }
    }

    #[async_trait]
    impl CommandTransport for Desk {
        async fn write_line(&self, line: &str) -> Result<(), TransportError> {
            if let Ok(Action::Move { dx, dy }) = parse_line(line.trim_end()) {
                self.moves.lock().unwrap().push((dx, dy));
                let mut pos = self.position.lock().unwrap();
                pos.x += (f64::from(dx) * self.gain) as i32;
                pos.y += (f64::from(dy) * self.gain) as i32;
            }
            Ok(())
        }
    }

    fn use_case(desk: &Arc<Desk>, profile: MotionProfile) -> MovePointerUseCase {
        let writer = Arc::new(CommandWriter::new(
            Arc::clone(desk) as Arc<dyn CommandTransport>,
            PacingProfile::default(),
            Arc::new(AtomicBool::new(false)),
        ));
        MovePointerUseCase::new(Arc::clone(desk) as Arc<dyn CursorSource>, writer, profile)
    }

    #[tokio::test(start_paused = true)]
    async fn test_lands_exactly_on_target() {
        // Arrange
        let desk = Desk::at(0, 0, 1.0);
        let target = ScreenPoint::new(640, -215);

        // Act
        let report = use_case(&desk, MotionProfile::default())
            .move_to(target)
            .await
            .unwrap();

        // Assert
        assert_eq!(desk.cursor_position(), target);
        assert!(!report.hit_cap);
        assert!(report.iterations <= 300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_steps_never_exceed_clamp() {
        let desk = Desk::at(0, 0, 1.0);

        use_case(&desk, MotionProfile::default())
            .move_to(ScreenPoint::new(-900, 900))
            .await
            .unwrap();

        let moves = desk.moves.lock().unwrap().clone();
        // All but the final correction are damped steps.
        for (dx, dy) in &moves[..moves.len() - 1] {
            assert!(dx.abs() <= 15 && dy.abs() <= 15, "step ({dx}, {dy}) too large");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_within_tolerance_sends_only_correction() {
        let desk = Desk::at(100, 100, 1.0);

        let report = use_case(&desk, MotionProfile::default())
            .move_to(ScreenPoint::new(102, 97))
            .await
            .unwrap();

        assert_eq!(report.iterations, 0);
        assert!(report.corrected);
        assert_eq!(*desk.moves.lock().unwrap(), vec![(2, -3)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_on_target_sends_nothing() {
        let desk = Desk::at(5, 5, 1.0);

        let report = use_case(&desk, MotionProfile::default())
            .move_to(ScreenPoint::new(5, 5))
            .await
            .unwrap();

        assert_eq!(
            report,
            MoveReport {
                iterations: 0,
                hit_cap: false,
                corrected: false
            }
        );
        assert!(desk.moves.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_cursor_hits_cap_then_corrects() {
        // Arrange: the cursor never moves, so the loop can only end on the cap.
        let mut cursor = MockCursorSource::new();
        cursor
            .expect_cursor_position()
            .returning(|| ScreenPoint::new(0, 0));
        let desk = Desk::at(0, 0, 1.0);
        let writer = Arc::new(CommandWriter::new(
            Arc::clone(&desk) as Arc<dyn CommandTransport>,
            PacingProfile::default(),
            Arc::new(AtomicBool::new(false)),
        ));
        let profile = MotionProfile {
            max_iterations: 10,
            ..MotionProfile::default()
        };
        let use_case = MovePointerUseCase::new(Arc::new(cursor), writer, profile);

        // Act
        let report = use_case.move_to(ScreenPoint::new(50, 0)).await.unwrap();

        // Assert
        assert_eq!(report.iterations, 10);
        assert!(report.hit_cap);
        assert!(report.corrected);
        assert_eq!(desk.moves.lock().unwrap().last(), Some(&(50, 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_accelerated_pointer_still_converges() {
        let desk = Desk::at(0, 0, 1.8);
        let target = ScreenPoint::new(333, 77);

        use_case(&desk, MotionProfile::default())
            .move_to(target)
            .await
            .unwrap();

        // The correction is scaled too, so only tolerance is guaranteed here.
        let end = desk.cursor_position();
        assert!(MotionProfile::default().is_arrived(target.delta_from(end)) || end == target);
    }
}
