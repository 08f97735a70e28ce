//! Scripted target locator for tests.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use hidlink_core::ScreenPoint;

use crate::application::automation::TargetLocator;

/// Answers `locate` calls from a script, then with `fallback`.
#[derive(Debug, Default)]
pub struct ScriptedTargetLocator {
    script: Mutex<VecDeque<Option<ScreenPoint>>>,
    fallback: Option<ScreenPoint>,
    calls: AtomicUsize,
}

impl ScriptedTargetLocator {
    pub fn new(script: impl IntoIterator<Item = Option<ScreenPoint>>, fallback: Option<ScreenPoint>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// A locator that always reports `point`.
    pub fn always(point: ScreenPoint) -> Self {
        Self::new(Vec::new(), Some(point))
    }

    /// A locator that never finds anything.
    pub fn never() -> Self {
        Self::default()
    }

    /// Number of `locate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl TargetLocator for ScriptedTargetLocator {
    fn locate(&self, _template: &Path, _threshold: f64) -> Option<ScreenPoint> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.script
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or(self.fallback)
    }
}
