//! Multi-attribute (NDP) surface compositing.
//!
//! NDP surfaces carry up to four attribute ids per node with fractional
//! weights. The node color is the weight-blended mix of the attribute
//! colors; blending happens once at source resolution into r/g/b/a
//! component grids, which then resample bilinearly to the image.

use crate::{apply_mask, assemble, build_mask};
use regrid::{resample, ResampleMethod};
use surface_common::{
    is_null, AttributeColorTable, ClipPolygon, Grid, GridGeometry, ImageRequest, RasterImage,
    Rgba, SurfaceError, SurfaceResult, NULL_VALUE,
};
use tracing::{debug, warn};

/// Nodes whose usable attribute weight falls below this are transparent.
pub const MIN_BLEND_WEIGHT: f32 = 0.001;

/// Per-node attribute ids and fractions on a grid layout.
#[derive(Debug, Clone, PartialEq)]
pub struct NdpGrid {
    pub geom: GridGeometry,
    /// Up to four attribute ids per node; unused corners carry any id
    /// with a zero fraction.
    pub attributes: Vec<[i32; 4]>,
    /// Fractional weight of each attribute, typically summing to 1.
    pub fractions: Vec<[f32; 4]>,
}

impl NdpGrid {
    pub fn new(
        geom: GridGeometry,
        attributes: Vec<[i32; 4]>,
        fractions: Vec<[f32; 4]>,
    ) -> SurfaceResult<Self> {
        if attributes.len() != geom.len() || fractions.len() != geom.len() {
            return Err(SurfaceError::DataLengthMismatch {
                expected: geom.len(),
                actual: attributes.len().min(fractions.len()),
            });
        }
        Ok(Self {
            geom,
            attributes,
            fractions,
        })
    }
}

/// Blended r/g/b/a component grids at source resolution.
#[derive(Debug, Clone)]
pub struct NdpComponents {
    pub r: Grid,
    pub g: Grid,
    pub b: Grid,
    pub a: Grid,
}

/// Blend attribute colors into component grids, one pass over the nodes.
///
/// A node with total usable weight under [`MIN_BLEND_WEIGHT`] gets null
/// components, which propagate through resampling into transparent
/// pixels. Attributes missing from the color table contribute nothing.
pub fn build_ndp_components(
    ndp: &NdpGrid,
    table: &AttributeColorTable,
) -> SurfaceResult<NdpComponents> {
    let n = ndp.geom.len();
    let mut r = vec![NULL_VALUE; n];
    let mut g = vec![NULL_VALUE; n];
    let mut b = vec![NULL_VALUE; n];
    let mut a = vec![NULL_VALUE; n];

    let mut blended = 0usize;
    for k in 0..n {
        let mut total = 0.0f32;
        let mut acc = [0.0f32; 4];
        for slot in 0..4 {
            let w = ndp.fractions[k][slot];
            if w <= 0.0 {
                continue;
            }
            let Some(color) = table.color_for(ndp.attributes[k][slot]) else {
                continue;
            };
            total += w;
            acc[0] += w * color.r as f32;
            acc[1] += w * color.g as f32;
            acc[2] += w * color.b as f32;
            acc[3] += w * color.a as f32;
        }
        if total < MIN_BLEND_WEIGHT {
            continue;
        }
        r[k] = acc[0] / total;
        g[k] = acc[1] / total;
        b[k] = acc[2] / total;
        a[k] = acc[3] / total;
        blended += 1;
    }
    debug!(nodes = n, blended, "built ndp component grids");

    Ok(NdpComponents {
        r: Grid::new(r, ndp.geom)?,
        g: Grid::new(g, ndp.geom)?,
        b: Grid::new(b, ndp.geom)?,
        a: Grid::new(a, ndp.geom)?,
    })
}

/// Rasterize an NDP surface at the requested view and resolution.
///
/// Returns `Ok(None)` with a warning when the color table is empty.
pub fn composite_ndp(
    ndp: &NdpGrid,
    table: &AttributeColorTable,
    clip: Option<&ClipPolygon>,
    request: &ImageRequest,
) -> SurfaceResult<Option<RasterImage>> {
    if table.is_empty() {
        warn!("ndp color table is empty, skipping image");
        return Ok(None);
    }
    let components = build_ndp_components(ndp, table)?;
    composite_ndp_components(&components, clip, request).map(Some)
}

/// Resample prebuilt component grids and assemble the image planes.
pub fn composite_ndp_components(
    components: &NdpComponents,
    clip: Option<&ClipPolygon>,
    request: &ImageRequest,
) -> SurfaceResult<RasterImage> {
    let target = GridGeometry::axis_aligned(
        request.ncol,
        request.nrow,
        request.x1,
        request.y1,
        request.x2 - request.x1,
        request.y2 - request.y1,
    )?;

    let r = resample(&components.r, target, ResampleMethod::Bilinear, None)?;
    let g = resample(&components.g, target, ResampleMethod::Bilinear, None)?;
    let b = resample(&components.b, target, ResampleMethod::Bilinear, None)?;
    let a = resample(&components.a, target, ResampleMethod::Bilinear, None)?;

    let mask = build_mask(clip, request)?;
    let image = assemble(request, |k| {
        let (vr, vg, vb, va) = (r.data[k], g.data[k], b.data[k], a.data[k]);
        if is_null(vr) || is_null(vg) || is_null(vb) || is_null(va) {
            return Rgba::transparent();
        }
        Rgba::new(channel(vr), channel(vg), channel(vb), channel(va))
    });
    Ok(apply_mask(image, mask.as_ref()))
}

#[inline]
fn channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_attr_table() -> AttributeColorTable {
        AttributeColorTable::new(
            vec![1, 2],
            vec![Rgba::opaque(200, 0, 0), Rgba::opaque(0, 100, 0)],
        )
    }

    fn uniform_ndp(frac: [f32; 4]) -> NdpGrid {
        let geom = GridGeometry::axis_aligned(4, 4, 0.0, 0.0, 3.0, 3.0).unwrap();
        NdpGrid::new(
            geom,
            vec![[1, 2, 0, 0]; 16],
            vec![frac; 16],
        )
        .unwrap()
    }

    #[test]
    fn test_blend_two_attributes() {
        let ndp = uniform_ndp([0.5, 0.5, 0.0, 0.0]);
        let comps = build_ndp_components(&ndp, &two_attr_table()).unwrap();
        assert_eq!(comps.r.data[0], 100.0);
        assert_eq!(comps.g.data[0], 50.0);
        assert_eq!(comps.b.data[0], 0.0);
        assert_eq!(comps.a.data[0], 255.0);
    }

    #[test]
    fn test_tiny_weight_is_null() {
        let ndp = uniform_ndp([0.0004, 0.0004, 0.0, 0.0]);
        let comps = build_ndp_components(&ndp, &two_attr_table()).unwrap();
        assert!(is_null(comps.r.data[0]));
    }

    #[test]
    fn test_unknown_attribute_ignored() {
        let geom = GridGeometry::axis_aligned(2, 2, 0.0, 0.0, 1.0, 1.0).unwrap();
        let ndp = NdpGrid::new(geom, vec![[9, 1, 0, 0]; 4], vec![[0.5, 0.5, 0.0, 0.0]; 4])
            .unwrap();
        let comps = build_ndp_components(&ndp, &two_attr_table()).unwrap();
        // Only attribute 1 contributes; renormalized to its own color
        assert_eq!(comps.r.data[0], 200.0);
        assert_eq!(comps.g.data[0], 0.0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let geom = GridGeometry::axis_aligned(3, 3, 0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(NdpGrid::new(geom, vec![[0; 4]; 4], vec![[0.0; 4]; 9]).is_err());
    }

    #[test]
    fn test_empty_table_yields_nothing() {
        let ndp = uniform_ndp([1.0, 0.0, 0.0, 0.0]);
        let request = ImageRequest::new(0.0, 0.0, 3.0, 3.0, 8, 8).unwrap();
        let out = composite_ndp(&ndp, &AttributeColorTable::default(), None, &request).unwrap();
        assert!(out.is_none());
    }
}
