//! Easing Curves
//!
//! The fixed curve set used by reel motion and win presentation.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Easing curve, mapping normalized progress `t ∈ [0, 1]` to an output value.
///
/// `evaluate` deliberately does not clamp: the back curves overshoot outside
/// `[0, 1]` and that overshoot is what produces the reel settle bounce. The
/// formulas are defined for all real `t`; only `[0, 1]` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// Constant rate, `y = t`
    Linear,
    /// Pull back before accelerating, `y = t²((k+1)t − k)`
    BackIn { amount: f64 },
    /// Overshoot then settle, `y = (t−1)²((k+1)(t−1) + k) + 1`
    BackOut { amount: f64 },
    /// Folded sine pulse, `y = 1 − |sin(π·t·k − π/2)|`
    ///
    /// Zero at both ends for integer `k`; `k` controls pulse count.
    Sin { amount: f64 },
}

impl Easing {
    /// Evaluate the curve at progress `t`.
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        match *self {
            Easing::Linear => t,
            Easing::BackIn { amount } => t * t * ((amount + 1.0) * t - amount),
            Easing::BackOut { amount } => {
                let u = t - 1.0;
                u * u * ((amount + 1.0) * u + amount) + 1.0
            }
            Easing::Sin { amount } => 1.0 - (PI * t * amount - FRAC_PI_2).sin().abs(),
        }
    }
}

/// Linear interpolation between `a` and `b`.
///
/// `lerp(a, b, 0) == a` and `lerp(a, b, 1) == b`; `t` outside `[0, 1]`
/// extrapolates, which the back curves rely on.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
