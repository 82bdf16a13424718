//! Contour level selection.
//!
//! Levels come from three places, in priority order: explicit minor/major
//! lists in the options, interval stepping anchored at the base value, or
//! a "nice" interval derived from the data range when nothing is
//! configured.

use surface_common::{ContourCalcOptions, SurfaceError, SurfaceResult};
use tracing::debug;

/// One contour level in tracing space (log space for log-scaled data).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub value: f64,
    pub major: bool,
}

/// Roughly how many levels the derived interval targets.
const TARGET_LEVELS: f64 = 20.0;

/// Levels closer to zero than this fraction of the range snap to 0.
const ZERO_SNAP: f64 = 1e-8;

/// Hard cap so a bad interval cannot produce a runaway level list.
const MAX_LEVELS: usize = 10_000;

/// Build the level list for a data range.
///
/// `zmin`/`zmax` are in tracing space: already log-converted for
/// log-scaled data and already clamped by the hard min/max. Returns an
/// empty list for a constant field.
pub fn build_levels(
    zmin: f64,
    zmax: f64,
    opts: &ContourCalcOptions,
) -> SurfaceResult<Vec<Level>> {
    validate(opts)?;
    if !(zmax > zmin) {
        return Ok(Vec::new());
    }

    if opts.has_explicit_levels() {
        let mut levels: Vec<Level> = opts
            .minor_levels
            .iter()
            .map(|&v| Level {
                value: v,
                major: false,
            })
            .chain(opts.major_levels.iter().map(|&v| Level {
                value: v,
                major: true,
            }))
            .filter(|l| l.value >= zmin && l.value <= zmax)
            .collect();
        levels.sort_by(|a, b| a.value.total_cmp(&b.value));
        return Ok(levels);
    }

    let first = opts.first_contour.unwrap_or(zmin).max(zmin);
    let last = opts.last_contour.unwrap_or(zmax).min(zmax);
    if first > last {
        return Ok(Vec::new());
    }

    let (interval, major_spacing) = match opts.interval {
        Some(v) => (v, opts.major_spacing),
        None => match opts.effective_log_base() {
            // Fixed steps in log space for the common bases.
            Some(b) if (b - 2.0).abs() < 1e-9 => (0.5, opts.major_spacing),
            Some(b) if (b - 10.0).abs() < 1e-9 => (0.2, opts.major_spacing),
            _ => nice_interval(last - first),
        },
    };

    let base = opts.base_value;
    let range = zmax - zmin;
    let start = ((first - base) / interval).ceil() * interval + base;

    let mut levels = Vec::new();
    let mut k = 0usize;
    loop {
        let mut value = start + k as f64 * interval;
        if value > last + interval * 1e-9 {
            break;
        }
        if k > MAX_LEVELS {
            return Err(SurfaceError::InvalidOptions(format!(
                "interval {} produces more than {} levels",
                interval, MAX_LEVELS
            )));
        }
        if value.abs() < ZERO_SNAP * range {
            value = 0.0;
        }
        let step = ((value - base) / interval).round().abs() as u64;
        let major = major_spacing > 0 && step % major_spacing as u64 == 0;
        levels.push(Level { value, major });
        k += 1;
    }
    debug!(
        count = levels.len(),
        interval, zmin, zmax, "built contour levels"
    );
    Ok(levels)
}

fn validate(opts: &ContourCalcOptions) -> SurfaceResult<()> {
    if let Some(interval) = opts.interval {
        if !(interval > 0.0) || !interval.is_finite() {
            return Err(SurfaceError::InvalidOptions(format!(
                "contour interval must be positive and finite, got {}",
                interval
            )));
        }
    }
    if let (Some(first), Some(last)) = (opts.first_contour, opts.last_contour) {
        if first > last {
            return Err(SurfaceError::InvalidOptions(format!(
                "first contour {} is above last contour {}",
                first, last
            )));
        }
    }
    if let (Some(lo), Some(hi)) = (opts.hard_min, opts.hard_max) {
        if lo >= hi {
            return Err(SurfaceError::InvalidOptions(format!(
                "hard min {} is not below hard max {}",
                lo, hi
            )));
        }
    }
    if !opts.base_value.is_finite() {
        return Err(SurfaceError::InvalidOptions(
            "base value must be finite".into(),
        ));
    }
    Ok(())
}

/// Derive a "nice" interval for a range: a power of ten scaled by 1, 2,
/// 4, 5 or 10, targeting about [`TARGET_LEVELS`] levels, with a major
/// spacing that keeps major contours on round values.
fn nice_interval(range: f64) -> (f64, u32) {
    let raw = range / TARGET_LEVELS;
    let pow = 10f64.powf(raw.log10().floor());
    for (mult, spacing) in [(1.0, 5u32), (2.0, 4), (4.0, 5), (5.0, 5), (10.0, 5)] {
        let interval = pow * mult;
        if interval >= raw - 1e-12 * range {
            return (interval, spacing);
        }
    }
    (pow * 10.0, 5)
}
