//! Typing plan: turning an arbitrary string into an ordered command sequence.
//!
//! # Why not just send `w,<text>`? (for beginners)
//!
//! The device types characters by pressing keys on a US keyboard layout, so it
//! can only produce what that layout can produce: ASCII.  Ideographs are
//! entered instead through the remote input method's *Unicode code entry*
//! mode: a chord (`shift`+`u`) opens the mode, the code point is typed as
//! lowercase hex digits, and `space` commits the first candidate.
//!
//! Latin letters have the opposite problem: with a CJK input method active,
//! typed letters land in its candidate panel.  Each letter run is therefore
//! followed by `enter`, which commits the letters verbatim and closes the
//! panel.  Everything else is typed as-is.
//!
//! ```text
//! "1#Aa甘"  →  w,1#            (other)
//!              w,Aa  k,enter   (latin)
//!              combo,shift,u  w,7518  k,space   (cjk, per character)
//! ```
//!
//! Each [`TypingStep`] carries a *settle* delay the host waits after the
//! command's own pacing; remote candidate UIs are slower than plain keys.

use std::time::Duration;

use crate::domain::text::{runs, ScriptClass};
use crate::protocol::command::{Action, MAX_TEXT_LEN};
use crate::protocol::keys::KeyName;

/// One command of a typing plan plus the extra wait that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingStep {
    pub action: Action,
    pub settle: Duration,
}

/// The designated keys and settle delays of the remote input method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImeProfile {
    /// Modifiers of the chord that opens code-entry mode.
    pub entry_modifiers: Vec<KeyName>,
    /// Target key of the code-entry chord.
    pub entry_target: KeyName,
    /// Key that commits the first candidate after a code.
    pub commit_key: KeyName,
    /// Key sent after a letter run to close the candidate panel.
    pub letter_confirm_key: KeyName,
    pub after_entry_chord: Duration,
    pub after_code: Duration,
    pub after_commit: Duration,
    pub after_letters: Duration,
    pub after_letter_confirm: Duration,
    pub after_other: Duration,
}

impl Default for ImeProfile {
    fn default() -> Self {
        Self {
            entry_modifiers: vec![KeyName::SHIFT],
            entry_target: KeyName::U,
            commit_key: KeyName::SPACE,
            letter_confirm_key: KeyName::ENTER,
            after_entry_chord: Duration::from_millis(100),
            after_code: Duration::from_millis(100),
            after_commit: Duration::from_millis(200),
            after_letters: Duration::from_millis(100),
            after_letter_confirm: Duration::from_millis(100),
            after_other: Duration::from_millis(100),
        }
    }
}

/// Lowercase hexadecimal code point of `c`, without prefix or padding.
pub fn hex_code(c: char) -> String {
    format!("{:x}", u32::from(c))
}

/// Builds the full command sequence that types `input` on the remote side.
///
/// An empty input yields an empty plan.  Letter and other runs longer than
/// [`MAX_TEXT_LEN`] bytes are split over several `w,` lines at character
/// boundaries; a letter run still gets a single `enter`, after its last part.
///
/// The device trims every received line, so whitespace at either end of an
/// other run is lost in transit: a run made only of spaces (the gap in
/// `"a b"`) arrives as `w,` with empty text and types nothing.
///
/// # Examples
///
/// ```rust
/// use hidlink_core::{encode_line, plan_typing, ImeProfile};
///
/// let lines: Vec<String> = plan_typing("Aa甘", &ImeProfile::default())
///     .iter()
///     .map(|step| encode_line(&step.action))
///     .collect();
/// assert_eq!(
///     lines,
///     ["w,Aa\n", "k,enter\n", "combo,shift,u\n", "w,7518\n", "k,space\n"]
/// );
/// ```
pub fn plan_typing(input: &str, ime: &ImeProfile) -> Vec<TypingStep> {
    let mut plan = Vec::new();

    for run in runs(input) {
        match run.class {
            ScriptClass::Cjk => {
                for c in run.text.chars() {
                    plan.push(step(
                        Action::Combo {
                            modifiers: ime.entry_modifiers.clone(),
                            target: ime.entry_target,
                        },
                        ime.after_entry_chord,
                    ));
                    plan.push(step(text(hex_code(c)), ime.after_code));
                    plan.push(step(
                        Action::PressKey {
                            name: ime.commit_key,
                        },
                        ime.after_commit,
                    ));
                }
            }
            ScriptClass::Latin => {
                for part in text_parts(run.text) {
                    plan.push(step(text(part.to_string()), ime.after_letters));
                }
                plan.push(step(
                    Action::PressKey {
                        name: ime.letter_confirm_key,
                    },
                    ime.after_letter_confirm,
                ));
            }
            ScriptClass::Other => {
                for part in text_parts(run.text) {
                    plan.push(step(text(part.to_string()), ime.after_other));
                }
            }
        }
    }

    tracing::trace!(input, commands = plan.len(), "typing plan built");
    plan
}

fn step(action: Action, settle: Duration) -> TypingStep {
    TypingStep { action, settle }
}

fn text(text: String) -> Action {
    Action::WriteText { text }
}

/// Splits `run` into consecutive slices of at most [`MAX_TEXT_LEN`] bytes,
/// never inside a character.
fn text_parts(run: &str) -> impl Iterator<Item = &str> {
    let mut rest = run;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let mut end = rest.len().min(MAX_TEXT_LEN);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (part, tail) = rest.split_at(end);
        rest = tail;
        Some(part)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::command::{encode_line, parse_line, MAX_LINE_LEN};

    fn lines(input: &str) -> Vec<String> {
        plan_typing(input, &ImeProfile::default())
            .iter()
            .map(|s| s.action.to_string())
            .collect()
    }

    #[test]
    fn test_empty_input_produces_no_commands() {
        assert!(plan_typing("", &ImeProfile::default()).is_empty());
    }

    #[test]
    fn test_other_only_input_is_single_text_command() {
        assert_eq!(lines("123, 4!"), ["w,123, 4!"]);
    }

    #[test]
    fn test_single_cjk_character_uses_code_entry() {
        assert_eq!(lines("甘"), ["combo,shift,u", "w,7518", "k,space"]);
    }

    #[test]
    fn test_cjk_hex_round_trips_to_the_same_character() {
        for c in ['一', '甘', '蓝', '\u{9FFF}'] {
            let code = hex_code(c);
            assert_eq!(code, code.to_lowercase());
            let back = u32::from_str_radix(&code, 16)
                .ok()
                .and_then(char::from_u32);
            assert_eq!(back, Some(c));
        }
    }

    #[test]
    fn test_cjk_run_is_emitted_per_character() {
        assert_eq!(
            lines("甘蓝"),
            [
                "combo,shift,u",
                "w,7518",
                "k,space",
                "combo,shift,u",
                "w,84dd",
                "k,space",
            ]
        );
    }

    #[test]
    fn test_letters_then_cjk_do_not_interleave() {
        assert_eq!(
            lines("Aa甘"),
            ["w,Aa", "k,enter", "combo,shift,u", "w,7518", "k,space"]
        );
    }

    #[test]
    fn test_default_payload_plan() {
        assert_eq!(
            lines("1#Aa甘蓝"),
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

    #[test]
    fn test_settle_delays_follow_run_class() {
        // Arrange
        let ime = ImeProfile::default();

        // Act
        let plan = plan_typing("a甘.", &ime);

        // Assert
        let settles: Vec<u64> = plan.iter().map(|s| s.settle.as_millis() as u64).collect();
        assert_eq!(settles, [100, 100, 100, 100, 200, 100]);
    }

    #[test]
    fn test_non_cjk_scripts_are_sent_verbatim_as_other() {
        assert_eq!(lines("héllo"), ["w,h", "k,enter", "w,é", "w,llo", "k,enter"]);
    }

    #[test]
    fn test_whitespace_only_run_arrives_as_empty_text() {
        // Arrange
        let plan = plan_typing("a b", &ImeProfile::default());
        let gap = &plan[2].action;

        // Act
        let received = parse_line(&encode_line(gap));

        // Assert: the space is planned but trimmed away by the device.
        assert_eq!(lines("a b"), ["w,a", "k,enter", "w, ", "w,b", "k,enter"]);
        assert_eq!(
            received,
            Ok(Action::WriteText {
                text: String::new()
            })
        );
    }

    #[test]
    fn test_long_letter_run_is_split_and_confirmed_once() {
        // Arrange
        let input = "a".repeat(MAX_TEXT_LEN + 10);

        // Act
        let plan = plan_typing(&input, &ImeProfile::default());

        // Assert
        let encoded: Vec<String> = plan.iter().map(|s| encode_line(&s.action)).collect();
        assert_eq!(encoded.len(), 3);
        assert_eq!(encoded[0].len() - 1, MAX_LINE_LEN);
        assert_eq!(encoded[1], format!("w,{}\n", "a".repeat(10)));
        assert_eq!(encoded[2], "k,enter\n");
    }

    #[test]
    fn test_long_other_run_splits_on_character_boundaries() {
        // Arrange: three-byte characters do not divide MAX_TEXT_LEN evenly.
        let input = "€".repeat(MAX_TEXT_LEN);

        // Act
        let plan = plan_typing(&input, &ImeProfile::default());

        // Assert
        let mut rebuilt = String::new();
        for step in &plan {
            let Action::WriteText { text } = &step.action else {
                panic!("unexpected {:?}", step.action);
            };
            assert!(text.len() <= MAX_TEXT_LEN);
            rebuilt.push_str(text);
        }
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_plan_lines_are_newline_terminated_when_encoded() {
        let plan = plan_typing("x", &ImeProfile::default());
        assert_eq!(encode_line(&plan[0].action), "w,x\n");
    }
}
