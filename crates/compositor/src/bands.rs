//! Slot-table color lookup built from an ordered band list.

use surface_common::{ColorBand, Rgba, SurfaceError, SurfaceResult};
use tracing::debug;

/// Number of value slots in a built table.
pub const BAND_SLOTS: usize = 10_000;

/// Fraction of the band range padded on each side, so values at the
/// extremes never fall off the table through rounding.
const RANGE_PAD: f64 = 0.01;

/// Precomputed value-to-color table.
///
/// Bands are burned into evenly spaced slots over the padded band range;
/// each band edge widens by one slot so adjacent bands abut without a
/// hairline gap. On overlap the first band in list order wins. Values
/// outside every band map to transparent.
#[derive(Debug, Clone)]
pub struct BandTable {
    lo: f64,
    zinc: f64,
    slots: Vec<Rgba>,
}

impl BandTable {
    /// Burn a band list into a lookup table.
    pub fn new(bands: &[ColorBand]) -> SurfaceResult<Self> {
        if bands.is_empty() {
            return Err(SurfaceError::InvalidOptions("no color bands".into()));
        }
        let mut lo = f64::MAX;
        let mut hi = f64::MIN;
        for band in bands {
            if !band.min.is_finite() || !band.max.is_finite() || band.min > band.max {
                return Err(SurfaceError::InvalidOptions(format!(
                    "color band [{}, {}] is not a valid range",
                    band.min, band.max
                )));
            }
            lo = lo.min(band.min);
            hi = hi.max(band.max);
        }
        let pad = if hi > lo { (hi - lo) * RANGE_PAD } else { 1.0 };
        let lo = lo - pad;
        let zinc = (hi + pad - lo) / BAND_SLOTS as f64;

        let mut slots = vec![Rgba::transparent(); BAND_SLOTS + 1];
        let mut filled = vec![false; BAND_SLOTS + 1];
        for band in bands {
            let i0 = (((band.min - lo) / zinc).floor() as isize - 1).max(0) as usize;
            let i1 = ((((band.max - lo) / zinc).ceil() as isize) + 1)
                .min(BAND_SLOTS as isize) as usize;
            for slot in i0..=i1 {
                if !filled[slot] {
                    slots[slot] = band.color;
                    filled[slot] = true;
                }
            }
        }
        debug!(bands = bands.len(), lo, zinc, "built band table");
        Ok(Self { lo, zinc, slots })
    }

    /// Color for a value; transparent when no band covers it.
    #[inline]
    pub fn lookup(&self, value: f64) -> Rgba {
        let slot = (value - self.lo) / self.zinc;
        if slot < 0.0 || slot > BAND_SLOTS as f64 {
            return Rgba::transparent();
        }
        self.slots[slot as usize]
    }
}
