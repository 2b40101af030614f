//! Time-of-day arrival rates for rate-driven lanes.
//!
//! A [`RateFn`] maps the hour of the simulated day (`[0, 24)`) to an
//! expected number of arrivals per minute.  Each tick a rate-driven lane
//! draws `Poisson(rate / ticks_per_minute)` new vehicles.

use crate::{TsError, TsResult};

/// One Gaussian rush-hour bump on top of a base rate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RushPeak {
    /// Hour of the day at which the bump peaks.
    pub hour: f64,
    /// Extra vehicles/minute at the peak.
    pub height: f64,
    /// Standard deviation of the bump, in hours.
    pub width: f64,
}

/// Arrival rate (vehicles/minute) as a function of the hour of day.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RateFn {
    Constant { per_minute: f64 },
    /// `base + Σ height · exp(−d² / 2·width²)` with `d` the circular hour
    /// distance to each peak.
    RushHour { base: f64, peaks: Vec<RushPeak> },
    /// Step function over `(hour, per_minute)` points sorted by hour.  Before
    /// the first point the last point's rate applies (the day wraps).
    Schedule { points: Vec<(f64, f64)> },
}

impl RateFn {
    pub fn validate(&self) -> TsResult<()> {
        let check = |name: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TsError::InvalidParameter { name, value })
            }
        };
        match self {
            RateFn::Constant { per_minute } => check("rate.per_minute", *per_minute),
            RateFn::RushHour { base, peaks } => {
                check("rate.base", *base)?;
                for p in peaks {
                    check("rate.peaks.hour", p.hour)?;
                    check("rate.peaks.height", p.height)?;
                    if !(p.width.is_finite() && p.width > 0.0) {
                        return Err(TsError::InvalidParameter { name: "rate.peaks.width", value: p.width });
                    }
                }
                Ok(())
            }
            RateFn::Schedule { points } => {
                if points.is_empty() {
                    return Err(TsError::Config("rate schedule needs at least one point".into()));
                }
                for &(hour, rate) in points {
                    check("rate.points.hour", hour)?;
                    check("rate.points.per_minute", rate)?;
                }
                if points.windows(2).any(|w| w[0].0 > w[1].0) {
                    return Err(TsError::Config("rate schedule points must be sorted by hour".into()));
                }
                Ok(())
            }
        }
    }

    /// Expected arrivals per minute at `hour` (any real; wrapped into a day).
    pub fn per_minute(&self, hour: f64) -> f64 {
        let hour = hour.rem_euclid(24.0);
        match self {
            RateFn::Constant { per_minute } => *per_minute,
            RateFn::RushHour { base, peaks } => {
                base + peaks
                    .iter()
                    .map(|p| {
                        let d = (hour - p.hour).rem_euclid(24.0);
                        let d = d.min(24.0 - d);
                        p.height * (-(d * d) / (2.0 * p.width * p.width)).exp()
                    })
                    .sum::<f64>()
            }
            RateFn::Schedule { points } => points
                .iter()
                .rev()
                .find(|(h, _)| *h <= hour)
                .or_else(|| points.last())
                .map_or(0.0, |&(_, r)| r),
        }
    }
}
