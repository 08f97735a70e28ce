//! Integration tests for the device read path.
//!
//! These tests push host-encoded command lines through the public API in
//! arbitrary chunk sizes and verify the emitted HID events, exercising the
//! line protocol, the interpreter and the mock emulator together.

use std::io::Cursor;
use std::sync::{atomic::AtomicBool, Arc};

use hidlink_core::{encode_line, plan_typing, Action, HidKeyCode, ImeProfile};
use hidlink_device::application::{
    interpret::{CommandInterpreter, HidEmulator, LineOutcome},
    serve::serve,
};
use hidlink_device::infrastructure::{
    byte_source::StdinByteSource,
    input_emulation::mock::{EmulatedEvent, MockHidEmulator},
};

fn setup() -> (CommandInterpreter, Arc<MockHidEmulator>) {
    let emulator = Arc::new(MockHidEmulator::new());
    let interpreter = CommandInterpreter::new(Arc::clone(&emulator) as Arc<dyn HidEmulator>);
    (interpreter, emulator)
}

/// Encodes the typing plan for `input` into one byte stream.
fn wire_bytes(input: &str) -> Vec<u8> {
    plan_typing(input, &ImeProfile::default())
        .iter()
        .flat_map(|step| encode_line(&step.action).into_bytes())
        .collect()
}

#[test]
fn test_byte_at_a_time_delivery_matches_bulk_delivery() {
    // Arrange
    let bytes = wire_bytes("1#Aa甘蓝");
    let (mut bulk, bulk_em) = setup();
    let (mut trickle, trickle_em) = setup();

    // Act
    let bulk_outcomes = bulk.feed(&bytes);
    let trickle_outcomes: Vec<LineOutcome> =
        bytes.iter().flat_map(|b| trickle.feed(std::slice::from_ref(b))).collect();

    // Assert
    assert_eq!(bulk_outcomes, trickle_outcomes);
    assert_eq!(bulk_em.events(), trickle_em.events());
    assert!(bulk_outcomes
        .iter()
        .all(|o| matches!(o, LineOutcome::Executed(_))));
}

#[test]
fn test_default_payload_emits_expected_key_sequence() {
    // Arrange
    let (mut interp, em) = setup();

    // Act
    interp.feed(&wire_bytes("1#Aa甘"));

    // Assert
    use HidKeyCode::*;
    assert_eq!(
        em.key_downs(),
        vec![
            Digit1, ShiftLeft, Digit3, // "1#"
            ShiftLeft, KeyA, KeyA,     // "Aa"
            Enter,                     // letter confirm
            ShiftLeft, KeyU,           // code-entry chord
            Digit7, Digit5, Digit1, Digit8, // "7518"
            Space,                     // commit
        ]
    );
}

#[test]
fn test_every_press_is_matched_by_a_release() {
    let (mut interp, em) = setup();

    interp.feed(&wire_bytes("Hello, 世界! ok"));

    let events = em.events();
    let downs = events
        .iter()
        .filter(|e| matches!(e, EmulatedEvent::KeyDown(_)))
        .count();
    let ups = events
        .iter()
        .filter(|e| matches!(e, EmulatedEvent::KeyUp(_)))
        .count();
    assert_eq!(downs, ups);
}

#[test]
fn test_move_displacement_equals_command() {
    let (mut interp, em) = setup();

    for (dx, dy) in [(-500, 3), (0, 128), (15, -15)] {
        interp.feed(encode_line(&Action::Move { dx, dy }).as_bytes());
    }

    let (sx, sy) = em
        .pointer_moves()
        .iter()
        .fold((0i32, 0i32), |acc, &(x, y)| (acc.0 + i32::from(x), acc.1 + i32::from(y)));
    assert_eq!((sx, sy), (-485, 116));
}

#[test]
fn test_serve_over_reader_runs_every_line_then_stops() {
    // Arrange
    let (mut interp, em) = setup();
    let mut source = StdinByteSource::from_reader(Cursor::new(b"c\nbogus\nk,esc\n".to_vec()));
    let running = AtomicBool::new(true);

    // Act
    let stats = serve(&mut source, &mut interp, &running);

    // Assert
    assert_eq!(stats.executed, 2);
    assert_eq!(stats.dropped, 1);
    assert_eq!(
        em.events().last(),
        Some(&EmulatedEvent::KeyUp(HidKeyCode::Escape))
    );
}
