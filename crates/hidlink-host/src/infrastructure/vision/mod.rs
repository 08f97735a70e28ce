//! Target locators.
//!
//! Image search itself lives outside this crate; anything that implements
//! [`TargetLocator`] can be plugged into the automation session.  Shipped
//! here:
//!
//! - [`StaticTargetLocator`]: always reports one configured coordinate
//!   (`[target] fixed_x` / `fixed_y` or `--target x,y`).
//! - [`mock::ScriptedTargetLocator`]: replays a scripted sequence of answers
//!   in tests.

pub mod mock;

use std::path::Path;

use hidlink_core::ScreenPoint;
use tracing::trace;

use crate::application::automation::TargetLocator;

/// Locator that ignores the template and returns a fixed coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticTargetLocator {
    point: ScreenPoint,
}

impl StaticTargetLocator {
    pub fn new(point: ScreenPoint) -> Self {
        Self { point }
    }
}

impl TargetLocator for StaticTargetLocator {
    fn locate(&self, template: &Path, _threshold: f64) -> Option<ScreenPoint> {
        trace!(template = %template.display(), point = ?self.point, "static target");
        Some(self.point)
    }
}
