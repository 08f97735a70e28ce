//! Script classification and run partitioning of input strings.
//!
//! Every character belongs to exactly one [`ScriptClass`], decided purely by
//! code point.  [`runs`] walks a string once and yields maximal same-class
//! substrings in order; concatenating the yielded runs reproduces the input
//! exactly.

use std::iter::FusedIterator;

/// The three disjoint character classes the typing planner distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptClass {
    /// CJK Unified Ideographs, U+4E00..=U+9FFF.
    Cjk,
    /// ASCII letters `a`–`z` and `A`–`Z`.
    Latin,
    /// Everything else: digits, punctuation, whitespace, other scripts.
    Other,
}

impl ScriptClass {
    /// Classifies a single character.
    pub fn of(c: char) -> Self {
        match c {
            '\u{4E00}'..='\u{9FFF}' => ScriptClass::Cjk,
            'a'..='z' | 'A'..='Z' => ScriptClass::Latin,
            _ => ScriptClass::Other,
        }
    }
}

/// A maximal run of same-class characters borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub class: ScriptClass,
    pub text: &'a str,
}

/// Lazy iterator over the runs of a string; see [`runs`].
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    rest: &'a str,
}

/// Partitions `input` into maximal same-class runs.
///
/// # Examples
///
/// ```rust
/// use hidlink_core::{runs, ScriptClass};
///
/// let parts: Vec<_> = runs("1#Aa甘蓝").map(|r| (r.class, r.text)).collect();
/// assert_eq!(
///     parts,
///     [
///         (ScriptClass::Other, "1#"),
///         (ScriptClass::Latin, "Aa"),
///         (ScriptClass::Cjk, "甘蓝"),
///     ]
/// );
/// ```
pub fn runs(input: &str) -> Runs<'_> {
    Runs { rest: input }
}

impl<'a> Iterator for Runs<'a> {
    type Item = TextRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let class = ScriptClass::of(first);

        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| ScriptClass::of(c) != class)
            .map_or(self.rest.len(), |(i, _)| i);

        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(TextRun { class, text })
    }
}

impl FusedIterator for Runs<'_> {}
