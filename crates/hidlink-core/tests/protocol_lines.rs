//! Integration tests for the hidlink-core line protocol.
//!
//! These tests drive the public API the way the two binaries do: the host
//! builds a typing plan and encodes it, the device parses each received line.

use hidlink_core::{
    encode_line, parse_line, plan_typing,
    protocol::{parse_line_bytes, KeyName, MAX_LINE_LEN, MAX_TEXT_LEN},
    Action, ImeProfile, ParseError,
};

/// Encodes every step of a typing plan and parses it back as the device would.
fn through_the_wire(input: &str) -> Vec<Action> {
    plan_typing(input, &ImeProfile::default())
        .into_iter()
        .map(|step| parse_line(&encode_line(&step.action)).expect("planned line must parse"))
        .collect()
}

#[test]
fn test_every_planned_line_parses_back_to_the_same_action() {
    // Arrange
    // Whitespace only inside runs; run edges are trimmed on the wire.
    let input = "Hi,甘蓝#4 2ok";
    let planned: Vec<Action> = plan_typing(input, &ImeProfile::default())
        .into_iter()
        .map(|s| s.action)
        .collect();

    // Act
    let received = through_the_wire(input);

    // Assert
    assert_eq!(received, planned);
}

#[test]
fn test_whitespace_at_run_edges_is_trimmed_on_the_wire() {
    let received = through_the_wire("ok, go");

    assert_eq!(
        received,
        [
            Action::WriteText {
                text: "ok".to_string()
            },
            Action::PressKey {
                name: KeyName::ENTER
            },
            Action::WriteText {
                text: ",".to_string()
            },
            Action::WriteText {
                text: "go".to_string()
            },
            Action::PressKey {
                name: KeyName::ENTER
            },
        ]
    );
}

#[test]
fn test_every_planned_line_fits_the_device_buffer() {
    // Arrange
    let input = format!("{}甘{}", "a".repeat(MAX_TEXT_LEN * 2), "#".repeat(MAX_TEXT_LEN + 1));

    // Act
    let lines: Vec<String> = plan_typing(&input, &ImeProfile::default())
        .iter()
        .map(|step| encode_line(&step.action))
        .collect();

    // Assert: terminator excluded, no line exceeds what the device buffers.
    assert!(lines.iter().all(|l| l.len() - 1 <= MAX_LINE_LEN));
    let typed: usize = through_the_wire(&input)
        .iter()
        .filter_map(|a| match a {
            Action::WriteText { text } if text != "7518" => Some(text.len()),
            _ => None,
        })
        .sum();
    assert_eq!(typed, MAX_TEXT_LEN * 3 + 1);
}

#[test]
fn test_text_with_commas_survives_the_wire() {
    let received = through_the_wire("1,2,,3");
    assert_eq!(
        received,
        [Action::WriteText {
            text: "1,2,,3".to_string()
        }]
    );
}

#[test]
fn test_cjk_entry_chord_resolves_to_shift_and_u() {
    let received = through_the_wire("甘");
    assert_eq!(
        received[0],
        Action::Combo {
            modifiers: vec![KeyName::SHIFT],
            target: KeyName::U,
        }
    );
}

#[test]
fn test_move_line_round_trips_extreme_values() {
    for (dx, dy) in [(i32::MIN, i32::MAX), (0, -1), (127, -128)] {
        let action = Action::Move { dx, dy };
        assert_eq!(parse_line(&encode_line(&action)), Ok(action));
    }
}

#[test]
fn test_malformed_lines_are_reported_not_panicked() {
    let cases: &[&[u8]] = &[
        b"",
        b"xyz,1,2",
        b"m,1",
        b"m,one,two",
        b"k",
        b"k,super-key",
        b"combo,foo,u",
        b"combo,shift",
        b"\xc3\x28",
    ];
    for line in cases {
        assert!(parse_line_bytes(line).is_err(), "{line:?} must not parse");
    }
}

#[test]
fn test_line_limit_is_large_enough_for_long_text() {
    let text = "x".repeat(MAX_TEXT_LEN);
    let line = encode_line(&Action::WriteText { text: text.clone() });
    assert_eq!(line.len(), MAX_LINE_LEN + 1);
    assert_eq!(parse_line(&line), Ok(Action::WriteText { text }));
}

#[test]
fn test_tolerated_chord_target_is_distinguishable_from_malformed() {
    assert_eq!(
        parse_line("combo,shift,#"),
        Err(ParseError::UnresolvedTarget('#'))
    );
    assert!(matches!(
        parse_line("combo,shift,##"),
        Err(ParseError::UnknownKey(_))
    ));
}
