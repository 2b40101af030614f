//! Wait-time cost curves.
//!
//! Every vehicle carries a [`FrustrationFn`] mapping its wait in simulated
//! seconds to a non-negative cost.  All variants are
//! non-decreasing in wait, so longer waits never cost less.

use crate::{TsError, TsResult};

/// Cost of waiting, as a function of wait duration.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum FrustrationFn {
    /// `(wait / 60)²` — waiting minutes, squared.
    #[default]
    Quadratic,
    /// `exp(k · wait / 60) − 1`.
    Exponential { k: f64 },
    /// `(wait / 60)^power`, `power ≥ 1`.
    Polynomial { power: f64 },
}

impl FrustrationFn {
    /// Reject parameters that would break non-negativity or monotonicity.
    pub fn validate(&self) -> TsResult<()> {
        match *self {
            FrustrationFn::Quadratic => Ok(()),
            FrustrationFn::Exponential { k } if k.is_finite() && k > 0.0 => Ok(()),
            FrustrationFn::Exponential { k } => {
                Err(TsError::InvalidParameter { name: "frustration.k", value: k })
            }
            FrustrationFn::Polynomial { power } if power.is_finite() && power >= 1.0 => Ok(()),
            FrustrationFn::Polynomial { power } => {
                Err(TsError::InvalidParameter { name: "frustration.power", value: power })
            }
        }
    }

    /// Cost of a wait of `wait_secs` simulated seconds.
    #[inline]
    pub fn eval(&self, wait_secs: u64) -> f64 {
        let minutes = wait_secs as f64 / 60.0;
        match *self {
            FrustrationFn::Quadratic => minutes * minutes,
            FrustrationFn::Exponential { k } => (k * minutes).exp_m1(),
            FrustrationFn::Polynomial { power } => minutes.powf(power),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrustrationFn::Quadratic => "quadratic",
            FrustrationFn::Exponential { .. } => "exponential",
            FrustrationFn::Polynomial { .. } => "polynomial",
        }
    }
}

impl std::fmt::Display for FrustrationFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrustrationFn::Quadratic => f.write_str("(w/60)^2"),
            FrustrationFn::Exponential { k } => write!(f, "exp({k}·w/60) - 1"),
            FrustrationFn::Polynomial { power } => write!(f, "(w/60)^{power}"),
        }
    }
}
