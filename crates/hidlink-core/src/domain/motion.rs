//! Damped pointer-motion planning.
//!
//! The host moves the remote pointer only through relative `m,<dx>,<dy>`
//! commands, so it steers toward the target the way a person would: large
//! distances are covered in small fractions, short distances in larger ones,
//! and no single step exceeds a fixed clamp.  The planner never accumulates
//! its own position; every step is computed from a freshly read difference.
//!
//! ```text
//! distance > 100 px  → 15 % of the difference
//! distance >  20 px  → 30 %
//! otherwise          → 60 %
//! each axis truncated toward zero, clamped to ±15, never 0 while off-target
//! ```

use std::time::Duration;

/// An absolute position on the host screen, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Difference `self - other` per axis.
    pub fn delta_from(self, other: ScreenPoint) -> Step {
        Step {
            dx: self.x.saturating_sub(other.x),
            dy: self.y.saturating_sub(other.y),
        }
    }

    /// This point shifted by `step`.
    pub fn offset(self, step: Step) -> ScreenPoint {
        ScreenPoint {
            x: self.x.saturating_add(step.dx),
            y: self.y.saturating_add(step.dy),
        }
    }
}

/// One relative pointer displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Tuning constants of the motion planner.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionProfile {
    /// Per-axis distance at or below which the pointer counts as arrived.
    pub tolerance: i32,
    /// Distance above which `far_factor` applies.
    pub far_distance: f64,
    /// Distance above which `mid_factor` applies (and at or below `far_distance`).
    pub mid_distance: f64,
    pub far_factor: f64,
    pub mid_factor: f64,
    pub near_factor: f64,
    /// Largest magnitude of a single step on either axis.
    pub max_step: i32,
    /// Hard cap on planning iterations before the corrective move.
    pub max_iterations: u32,
    /// Pause between consecutive steps.
    pub tick: Duration,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            tolerance: 3,
            far_distance: 100.0,
            mid_distance: 20.0,
            far_factor: 0.15,
            mid_factor: 0.30,
            near_factor: 0.60,
            max_step: 15,
            max_iterations: 300,
            tick: Duration::from_millis(15),
        }
    }
}

impl MotionProfile {
    /// Speed factor for a Euclidean `distance`.
    pub fn speed_factor(&self, distance: f64) -> f64 {
        if distance > self.far_distance {
            self.far_factor
        } else if distance > self.mid_distance {
            self.mid_factor
        } else {
            self.near_factor
        }
    }

    /// `true` when `diff` is within tolerance on both axes.
    pub fn is_arrived(&self, diff: Step) -> bool {
        diff.dx.unsigned_abs() <= self.tolerance.unsigned_abs()
            && diff.dy.unsigned_abs() <= self.tolerance.unsigned_abs()
    }
}

/// Computes the next step toward a target that is `diff` away.
///
/// Returns `None` once the pointer is within tolerance.  A returned step is
/// never zero on an axis whose difference is non-zero.
///
/// # Examples
///
/// ```rust
/// use hidlink_core::{plan_step, MotionProfile, Step};
///
/// let profile = MotionProfile::default();
/// // 500 px away: 15 % would be 75, clamped to 15.
/// assert_eq!(plan_step(Step::new(500, 0), &profile), Some(Step::new(15, 0)));
/// // Close enough.
/// assert_eq!(plan_step(Step::new(2, -3), &profile), None);
/// ```
pub fn plan_step(diff: Step, profile: &MotionProfile) -> Option<Step> {
    if profile.is_arrived(diff) {
        return None;
    }

    let (fx, fy) = (f64::from(diff.dx), f64::from(diff.dy));
    let factor = profile.speed_factor(fx.hypot(fy));

    Some(Step {
        dx: axis_step(diff.dx, factor, profile.max_step),
        dy: axis_step(diff.dy, factor, profile.max_step),
    })
}

fn axis_step(diff: i32, factor: f64, max_step: i32) -> i32 {
    // `as` truncates toward zero, matching integer conversion of the product.
    let step = ((f64::from(diff) * factor) as i32).clamp(-max_step, max_step);
    if step == 0 && diff != 0 {
        diff.signum()
    } else {
        step
    }
}
