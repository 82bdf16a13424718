//! Color-band rasterization of surfaces into RGBA images.
//!
//! The single-attribute path resamples a grid to image resolution, fixes
//! bicubic overshoots against plateau cells, and colors each pixel
//! through a precomputed band table. The multi-attribute (NDP) path
//! blends per-node attribute colors into component grids first and
//! resamples those. Both paths honor an optional clip polygon: pixels
//! outside it come out fully transparent.

pub mod bands;
pub mod ndp;

pub use bands::{BandTable, BAND_SLOTS};
pub use ndp::{composite_ndp, build_ndp_components, NdpComponents, NdpGrid};

use polygon::{build_clip_mask, ClipMask};
use rayon::prelude::*;
use regrid::{resample, FaultIndex, ResampleMethod};
use surface_common::{
    is_null, ClipPolygon, ColorBand, Grid, GridGeometry, ImageRequest, RasterImage, Rgba,
    SurfaceResult, ThicknessMode,
};
use tracing::{debug, warn};

/// Rasterize a grid into a color-banded image at the requested view
/// rectangle and resolution.
///
/// Returns `Ok(None)` with a warning when there are no bands to draw
/// with. Faulted grids resample in two stages: fault-aware to half the
/// output resolution, then plain bicubic up to full, which keeps the
/// expensive blocked-interpolation pass off the per-pixel loop.
pub fn composite_grid(
    grid: &Grid,
    faults: Option<&FaultIndex>,
    band_list: &[ColorBand],
    thickness: ThicknessMode,
    clip: Option<&ClipPolygon>,
    request: &ImageRequest,
) -> SurfaceResult<Option<RasterImage>> {
    if band_list.is_empty() {
        warn!("no color bands configured, skipping image");
        return Ok(None);
    }
    let table = BandTable::new(band_list)?;
    let target = GridGeometry::axis_aligned(
        request.ncol,
        request.nrow,
        request.x1,
        request.y1,
        request.x2 - request.x1,
        request.y2 - request.y1,
    )?;

    let mut values = match faults {
        Some(index) => {
            let half = GridGeometry::axis_aligned(
                (request.ncol / 2).max(2),
                (request.nrow / 2).max(2),
                request.x1,
                request.y1,
                request.x2 - request.x1,
                request.y2 - request.y1,
            )?;
            let coarse = resample(grid, half, ResampleMethod::Bicubic, Some(index))?;
            resample(&coarse, target, ResampleMethod::Bicubic, None)?
        }
        None => resample(grid, target, ResampleMethod::Bicubic, None)?,
    };

    fix_plateau_overshoot(&mut values, grid);

    match thickness {
        ThicknessMode::None => {}
        ThicknessMode::Positive => {
            for v in &mut values.data {
                if !is_null(*v) && *v < 0.0 {
                    *v = 0.0;
                }
            }
        }
        ThicknessMode::Negative => {
            for v in &mut values.data {
                if !is_null(*v) && *v > 0.0 {
                    *v = 0.0;
                }
            }
        }
    }

    let mask = build_mask(clip, request)?;
    let image = assemble(request, |k| {
        let v = values.data[k];
        if is_null(v) {
            return Rgba::transparent();
        }
        table.lookup(v as f64)
    });
    let image = apply_mask(image, mask.as_ref());
    debug!(
        ncol = request.ncol,
        nrow = request.nrow,
        faulted = faults.is_some(),
        "composited grid image"
    );
    Ok(Some(image))
}

/// Pull bicubic overshoots back onto plateaus and valley floors.
///
/// Inside a source cell whose four corners carry one identical value the
/// surface is flat, but bicubic interpolation can ring past that value
/// from the outer 4x4 neighborhood. Such pixels are reset to the corner
/// value so flat regions band uniformly.
fn fix_plateau_overshoot(values: &mut Grid, source: &Grid) {
    let sg = source.geom;
    let vg = values.geom;
    let (xs, ys) = (sg.xspace(), sg.yspace());

    values
        .data
        .par_chunks_mut(vg.ncol)
        .enumerate()
        .for_each(|(row, out_row)| {
            let y = vg.node_y(row);
            let fr = (y - sg.ymin) / ys;
            if fr < 0.0 || fr > (sg.nrow - 1) as f64 {
                return;
            }
            let r0 = (fr as usize).min(sg.nrow - 2);
            for (col, out) in out_row.iter_mut().enumerate() {
                if is_null(*out) {
                    continue;
                }
                let x = vg.node_x(col);
                let fc = (x - sg.xmin) / xs;
                if fc < 0.0 || fc > (sg.ncol - 1) as f64 {
                    continue;
                }
                let c0 = (fc as usize).min(sg.ncol - 2);
                let v = source.value(r0, c0);
                if is_null(v) {
                    continue;
                }
                if source.value(r0, c0 + 1) == v
                    && source.value(r0 + 1, c0) == v
                    && source.value(r0 + 1, c0 + 1) == v
                    && *out != v
                {
                    *out = v;
                }
            }
        });
}

/// Rasterize the clip region at image resolution, when one is present.
pub(crate) fn build_mask(
    clip: Option<&ClipPolygon>,
    request: &ImageRequest,
) -> SurfaceResult<Option<ClipMask>> {
    match clip {
        Some(region) if !region.is_empty() => Ok(Some(build_clip_mask(
            region,
            request.x1,
            request.y1,
            request.x2,
            request.y2,
            request.ncol,
            request.nrow,
        )?)),
        _ => Ok(None),
    }
}

/// Fill an image by evaluating a pixel color function in parallel rows.
pub(crate) fn assemble<F>(request: &ImageRequest, color_at: F) -> RasterImage
where
    F: Fn(usize) -> Rgba + Sync,
{
    let mut image = RasterImage::transparent(request);
    let ncol = request.ncol;
    image
        .r
        .par_chunks_mut(ncol)
        .zip(image.g.par_chunks_mut(ncol))
        .zip(image.b.par_chunks_mut(ncol))
        .zip(image.a.par_chunks_mut(ncol))
        .enumerate()
        .for_each(|(row, (((rr, gg), bb), aa))| {
            let base = row * ncol;
            for col in 0..ncol {
                let c = color_at(base + col);
                rr[col] = c.r;
                gg[col] = c.g;
                bb[col] = c.b;
                aa[col] = c.a;
            }
        });
    image
}

/// Force pixels outside the clip mask fully transparent.
pub(crate) fn apply_mask(mut image: RasterImage, mask: Option<&ClipMask>) -> RasterImage {
    let Some(mask) = mask else {
        return image;
    };
    for k in 0..image.len() {
        if mask.data[k] == 0 {
            image.r[k] = 0;
            image.g[k] = 0;
            image.b[k] = 0;
            image.a[k] = 0;
        }
    }
    image
}
