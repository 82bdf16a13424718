//! End-to-end walkthrough: install a grid surface, apply display
//! properties, then pull contours, an image and node markers from it.
//!
//! Run with `cargo run -p surface-state --example surface_demo`.

use surface_common::{ColorBand, GridGeometry, ImageRequest, Rgba, SurfaceProperties};
use surface_state::Surface;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // A 61x61 grid over a 60x60 area: two gaussian bumps on a ramp.
    let geom = GridGeometry::axis_aligned(61, 61, 0.0, 0.0, 60.0, 60.0)?;
    let mut data = Vec::with_capacity(geom.len());
    for row in 0..geom.nrow {
        for col in 0..geom.ncol {
            let (x, y) = (col as f64, row as f64);
            let bump = |cx: f64, cy: f64, h: f64, s: f64| {
                h * (-((x - cx).powi(2) + (y - cy).powi(2)) / s).exp()
            };
            let z = 0.1 * x + bump(20.0, 20.0, 30.0, 80.0) + bump(42.0, 38.0, 18.0, 120.0);
            data.push(z as f32);
        }
    }

    let mut surface = Surface::new();
    surface.set_grid_data(data, geom, Vec::new())?;

    let props = SurfaceProperties {
        contour_interval: Some(2.0),
        major_spacing: 5,
        contour_smoothing: 3,
        show_node_symbols: true,
        show_node_values: true,
        major_label_size: 1.2,
        bands: vec![
            ColorBand::new(0.0, 10.0, Rgba::opaque(49, 54, 149)),
            ColorBand::new(10.0, 20.0, Rgba::opaque(116, 173, 209)),
            ColorBand::new(20.0, 30.0, Rgba::opaque(254, 224, 144)),
            ColorBand::new(30.0, 40.0, Rgba::opaque(215, 48, 39)),
        ],
        ..Default::default()
    };
    surface.set_contour_properties(&props)?;

    let contours = surface.calc_contours()?;
    let labeled = contours.iter().filter(|c| !c.label_spots.is_empty()).count();
    info!(lines = contours.len(), labeled, "extracted contours");

    let request = ImageRequest::new(0.0, 0.0, 60.0, 60.0, 512, 512)?;
    if let Some(image) = surface.calc_image(&request)? {
        let opaque = image.a.iter().filter(|&&a| a > 0).count();
        info!(
            ncol = image.ncol,
            nrow = image.nrow,
            opaque,
            "composited image"
        );
    }

    let nodes = surface.calc_nodes()?;
    info!(markers = nodes.len(), "node markers");

    // Doubling the z scale rescales in place; nothing re-smooths.
    let rescaled = SurfaceProperties {
        z_scale: 2.0,
        ..props
    };
    surface.set_contour_properties(&rescaled)?;
    let contours = surface.calc_contours()?;
    info!(
        lines = contours.len(),
        stats = ?surface.cache_stats(),
        "contours after z rescale"
    );

    Ok(())
}
