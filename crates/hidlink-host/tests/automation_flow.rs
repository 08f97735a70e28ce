//! Integration tests for the host automation flow.
//!
//! A `SimulatedCursor` driven by a `RecordingTransport` stands in for the
//! device and the OS pointer, so a whole acquire → move → click → type run
//! executes against the public API under Tokio's paused clock.

use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use hidlink_core::{Action, ImeProfile, KeyName, MotionProfile, ScreenPoint};
use hidlink_host::application::{
    automation::{
        AutomationError, AutomationSession, AutomationSettings, RunOutcome, TargetLocator,
    },
    move_pointer::{CursorSource, MovePointerUseCase},
    send_commands::{CommandTransport, CommandWriter, PacingProfile, SendError},
    type_text::TypeTextUseCase,
};
use hidlink_host::infrastructure::{
    cursor::mock::SimulatedCursor, transport::mock::RecordingTransport,
    vision::mock::ScriptedTargetLocator,
};

struct Rig {
    cursor: Arc<SimulatedCursor>,
    transport: Arc<RecordingTransport>,
    locator: Arc<ScriptedTargetLocator>,
    session: AutomationSession,
}

/// Builds a session whose cursor starts at `start`; `transport` receives
/// that cursor so it can drive it.
fn rig(
    start: ScreenPoint,
    transport: impl FnOnce(Arc<SimulatedCursor>) -> RecordingTransport,
    locator: ScriptedTargetLocator,
    settings: AutomationSettings,
) -> Rig {
    let cursor = Arc::new(SimulatedCursor::at(start));
    let transport = Arc::new(transport(Arc::clone(&cursor)));
    let locator = Arc::new(locator);
    let writer = Arc::new(CommandWriter::new(
        Arc::clone(&transport) as Arc<dyn CommandTransport>,
        PacingProfile::default(),
        Arc::new(AtomicBool::new(false)),
    ));
    let session = AutomationSession::new(
        Arc::clone(&locator) as Arc<dyn TargetLocator>,
        Arc::clone(&writer),
        MovePointerUseCase::new(
            Arc::clone(&cursor) as Arc<dyn CursorSource>,
            Arc::clone(&writer),
            MotionProfile::default(),
        ),
        TypeTextUseCase::new(Arc::clone(&writer), ImeProfile::default()),
        settings,
    );
    Rig {
        cursor,
        transport,
        locator,
        session,
    }
}

fn exact_settings() -> AutomationSettings {
    AutomationSettings {
        click_jitter: 0,
        ..AutomationSettings::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_run_lands_on_target_then_clicks_then_types() {
    // Arrange: the target appears on the third poll.
    let target = ScreenPoint::new(400, 300);
    let r = rig(
        ScreenPoint::new(0, 0),
        RecordingTransport::driving,
        ScriptedTargetLocator::new([None, None], Some(target)),
        exact_settings(),
    );

    // Act
    let outcome = r.session.run_once().await.unwrap();

    // Assert
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(r.locator.calls(), 3);
    assert_eq!(r.cursor.cursor_position(), target);

    let actions = r.transport.actions();
    let first_click = actions
        .iter()
        .position(|a| *a == Action::Click)
        .expect("a click was sent");
    assert!(actions[..first_click]
        .iter()
        .all(|a| matches!(a, Action::Move { .. })));
    assert_eq!(actions[first_click + 1], Action::Click);

    let typed: Vec<String> = actions[first_click + 2..]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        typed,
        [
            "w,1#",
            "w,Aa",
            "k,enter",
            "combo,shift,u",
            "w,7518",
            "k,space",
            "combo,shift,u",
            "w,84dd",
            "k,space",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_jittered_click_stays_within_three_pixels() {
    let target = ScreenPoint::new(-120, 75);
    let r = rig(
        ScreenPoint::new(500, 500),
        RecordingTransport::driving,
        ScriptedTargetLocator::always(target),
        AutomationSettings {
            payload: String::new(),
            ..AutomationSettings::default()
        },
    );

    r.session.run_once().await.unwrap();

    let end = r.cursor.cursor_position();
    assert!((end.x - target.x).abs() <= 3, "x off by {}", end.x - target.x);
    assert!((end.y - target.y).abs() <= 3, "y off by {}", end.y - target.y);
}

#[tokio::test(start_paused = true)]
async fn test_search_timeout_polls_for_full_timeout_and_sends_nothing() {
    // Arrange
    let r = rig(
        ScreenPoint::default(),
        |_| RecordingTransport::new(),
        ScriptedTargetLocator::never(),
        AutomationSettings {
            search_timeout: Duration::from_secs(5),
            search_poll: Duration::from_millis(500),
            ..exact_settings()
        },
    );
    let started = tokio::time::Instant::now();

    // Act
    let outcome = r.session.run_once().await.unwrap();

    // Assert
    assert_eq!(outcome, RunOutcome::TargetNotFound);
    assert_eq!(r.locator.calls(), 10);
    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert!(r.transport.lines().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_ends_run_with_error() {
    // Arrange: the cursor is already on target, so the first lines are the
    // two clicks; the third write (typing) fails.
    let target = ScreenPoint::new(10, 10);
    let r = rig(
        target,
        |_| RecordingTransport::failing_after(2),
        ScriptedTargetLocator::always(target),
        exact_settings(),
    );

    // Act
    let result = r.session.run_once().await;

    // Assert
    assert!(matches!(
        result,
        Err(AutomationError::Send(SendError::Transport(_)))
    ));
    assert_eq!(r.transport.lines(), vec!["c\n", "c\n"]);
}

#[tokio::test(start_paused = true)]
async fn test_key_and_chord_lines_parse_back_to_actions() {
    let r = rig(
        ScreenPoint::default(),
        |_| RecordingTransport::new(),
        ScriptedTargetLocator::never(),
        exact_settings(),
    );
    let writer = CommandWriter::new(
        Arc::clone(&r.transport) as Arc<dyn CommandTransport>,
        PacingProfile::default(),
        Arc::new(AtomicBool::new(false)),
    );

    writer.send_key(KeyName::SPACE).await.unwrap();
    writer.send_combo(&[KeyName::SHIFT], KeyName::U).await.unwrap();

    assert_eq!(
        r.transport.actions(),
        vec![
            Action::PressKey {
                name: KeyName::SPACE
            },
            Action::Combo {
                modifiers: vec![KeyName::SHIFT],
                target: KeyName::U
            },
        ]
    );
}
