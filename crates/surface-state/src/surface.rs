//! Per-surface state: one master representation plus lazily derived
//! products behind the invalidation graph.

use crate::derived::{Axis, AxisClock, Derived};
use crate::primitives;
use compositor::{composite_grid, composite_ndp, NdpGrid};
use contour::{contour_grid, contour_mesh_grid};
use mesh_ops::{outline_mesh, smooth_mesh};
use polygon::nest_rings;
use regrid::{grid_from_mesh_faces, grid_from_mesh_nodes, rotate_to_axis_aligned, FaultIndex};
use surface_common::{
    AttributeColorTable, ClipPolygon, ColorBand, ContourCalcOptions, ContourDrawOptions,
    ContourLine, EdgeLine, FaultLine, FaultTrace, Grid, GridGeometry, ImageRequest, NodeMarker,
    RasterImage, Ring, SurfaceError, SurfaceProperties, SurfaceResult, TriMesh,
};
use tracing::{debug, warn};

/// Z-scale factors this close to 1 are ignored.
const ZSCALE_DEADBAND: (f64, f64) = (0.9999, 1.0001);

/// The master representation a surface owns.
#[derive(Debug, Clone)]
enum Master {
    Grid(Grid),
    Mesh(TriMesh),
}

/// Axis-aligned working grid with its fault data and lookup index.
#[derive(Debug)]
struct PlanarProduct {
    grid: Grid,
    faults: Vec<FaultLine>,
    index: Option<FaultIndex>,
}

/// Counts of how often each derived product has been rebuilt. Exposed so
/// callers (and tests) can verify the invalidation contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub planar_builds: u64,
    pub smoothed_builds: u64,
    pub aux_builds: u64,
    pub boundary_builds: u64,
}

/// One logical surface: master data, display properties and the derived
/// products needed to emit drawable primitives.
///
/// All mutation goes through `&mut self`; the engine assumes a single
/// writer per surface and does no locking.
#[derive(Debug)]
pub struct Surface {
    master: Option<Master>,
    faults: Vec<FaultLine>,

    calc: ContourCalcOptions,
    draw: ContourDrawOptions,
    bands: Vec<ColorBand>,
    zscale: f64,

    ndp: Option<NdpGrid>,
    ndp_table: AttributeColorTable,
    boundary_override: Option<ClipPolygon>,

    clock: AxisClock,
    planar: Derived<PlanarProduct>,
    smoothed: Derived<TriMesh>,
    aux: Derived<Grid>,
    boundary: Derived<Option<ClipPolygon>>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        Self {
            master: None,
            faults: Vec::new(),
            calc: ContourCalcOptions::default(),
            draw: ContourDrawOptions::default(),
            bands: Vec::new(),
            zscale: 1.0,
            ndp: None,
            ndp_table: AttributeColorTable::default(),
            boundary_override: None,
            clock: AxisClock::default(),
            planar: Derived::new(&[Axis::Geometry]),
            smoothed: Derived::new(&[Axis::Geometry, Axis::DisplayProps]),
            aux: Derived::new(&[Axis::Geometry, Axis::DisplayProps]),
            boundary: Derived::new(&[Axis::Geometry]),
        }
    }

    // ---- master data -------------------------------------------------

    /// Install a grid master. Mesh-derived caches drop; everything else
    /// goes stale through the Geometry axis.
    pub fn set_grid_data(
        &mut self,
        data: Vec<f32>,
        geom: GridGeometry,
        faults: Vec<FaultLine>,
    ) -> SurfaceResult<()> {
        let grid = Grid::new(data, geom)?;
        debug!(
            ncol = geom.ncol,
            nrow = geom.nrow,
            rotated = geom.is_rotated(),
            faults = faults.len(),
            "installing grid master"
        );
        self.master = Some(Master::Grid(grid));
        self.faults = faults;
        self.planar.clear();
        self.smoothed.clear();
        self.aux.clear();
        self.boundary.clear();
        self.clock.touch(Axis::Geometry);
        Ok(())
    }

    /// Install a trimesh master, dropping any grid master and its caches.
    pub fn set_tri_mesh(&mut self, mesh: TriMesh) -> SurfaceResult<()> {
        debug!(
            nodes = mesh.nodes.len(),
            edges = mesh.edges.len(),
            triangles = mesh.triangles.len(),
            "installing mesh master"
        );
        self.master = Some(Master::Mesh(mesh));
        self.faults.clear();
        self.planar.clear();
        self.smoothed.clear();
        self.aux.clear();
        self.boundary.clear();
        self.clock.touch(Axis::Geometry);
        Ok(())
    }

    // ---- properties --------------------------------------------------

    /// Apply a display-properties blob.
    ///
    /// A z-scale move outside the deadband rescales all data values in
    /// place exactly once; it does not stale any product slot, so a
    /// z-scale-only change re-smooths nothing and keeps the cached
    /// boundary. Color bands feed compositing directly and are not
    /// memoized anywhere, so a bands-only change stales nothing either.
    /// A calc/draw option change touches the DisplayProps axis.
    pub fn set_contour_properties(&mut self, props: &SurfaceProperties) -> SurfaceResult<()> {
        if !(props.z_scale > 0.0) || !props.z_scale.is_finite() {
            return Err(SurfaceError::PropertiesError(format!(
                "z scale must be positive and finite, got {}",
                props.z_scale
            )));
        }
        let (calc, draw) = props.split();
        let display_changed = calc != self.calc || draw != self.draw;
        self.calc = calc;
        self.draw = draw;
        self.bands = props.bands.clone();

        let factor = props.z_scale / self.zscale;
        if factor < ZSCALE_DEADBAND.0 || factor > ZSCALE_DEADBAND.1 {
            debug!(factor, "rescaling surface z in place");
            self.apply_zscale(factor);
            self.zscale = props.z_scale;
            self.clock.touch(Axis::ZScale);
        }
        if display_changed {
            self.clock.touch(Axis::DisplayProps);
        }
        Ok(())
    }

    fn apply_zscale(&mut self, factor: f64) {
        match &mut self.master {
            Some(Master::Grid(grid)) => grid.scale_values(factor as f32),
            Some(Master::Mesh(mesh)) => mesh.scale_z(factor),
            None => {}
        }
        for fault in &mut self.faults {
            for p in &mut fault.points {
                p.z *= factor;
            }
        }
        if let Some(planar) = self.planar.get_mut() {
            planar.grid.scale_values(factor as f32);
            for fault in &mut planar.faults {
                for p in &mut fault.points {
                    p.z *= factor;
                }
            }
        }
        if let Some(mesh) = self.smoothed.get_mut() {
            mesh.scale_z(factor);
        }
        if let Some(grid) = self.aux.get_mut() {
            grid.scale_values(factor as f32);
        }
    }

    /// Install the per-node attribute/fraction data of an NDP surface.
    pub fn set_ndp_grid_data(
        &mut self,
        geom: GridGeometry,
        attributes: Vec<[i32; 4]>,
        fractions: Vec<[f32; 4]>,
    ) -> SurfaceResult<()> {
        self.ndp = Some(NdpGrid::new(geom, attributes, fractions)?);
        self.clock.touch(Axis::Geometry);
        Ok(())
    }

    pub fn set_ndp_color_table(&mut self, table: AttributeColorTable) {
        self.ndp_table = table;
        self.clock.touch(Axis::DisplayProps);
    }

    /// Install a caller-supplied clip boundary, overriding the mesh
    /// outline. Rings nest automatically (holes under their outer ring);
    /// an empty list clears the override.
    pub fn set_boundary(&mut self, rings: Vec<Ring>) -> SurfaceResult<()> {
        if rings.is_empty() {
            self.boundary_override = None;
            return Ok(());
        }
        let bbox = surface_common::BoundingBox::from_points(
            rings.iter().flat_map(|r| r.points.iter()),
        );
        let tol = (bbox.width() + bbox.height()) * 1e-9;
        match nest_rings(rings, tol) {
            Some(clip) => {
                self.boundary_override = Some(clip);
                Ok(())
            }
            None => Err(SurfaceError::InvalidBounds(
                "boundary rings do not nest into a clip region".into(),
            )),
        }
    }

    // ---- derived products --------------------------------------------

    fn ensure_planar(&mut self) -> SurfaceResult<()> {
        if self.planar.is_fresh(&self.clock) {
            return Ok(());
        }
        let Some(Master::Grid(grid)) = &self.master else {
            return Err(SurfaceError::InvalidGeometry(
                "surface has no grid master".into(),
            ));
        };
        let (grid, faults) = rotate_to_axis_aligned(grid, &self.faults)?;
        let index = if faults.iter().any(|f| !f.is_empty()) {
            Some(FaultIndex::new(&grid.geom, &faults)?)
        } else {
            None
        };
        self.planar.store(
            PlanarProduct {
                grid,
                faults,
                index,
            },
            &self.clock,
        );
        Ok(())
    }

    fn ensure_smoothed(&mut self) -> SurfaceResult<()> {
        if self.smoothed.is_fresh(&self.clock) {
            return Ok(());
        }
        let Some(Master::Mesh(mesh)) = &self.master else {
            return Err(SurfaceError::InvalidMesh(
                "surface has no mesh master".into(),
            ));
        };
        let smoothed = smooth_mesh(mesh, self.calc.smoothing_clamped());
        self.smoothed.store(smoothed, &self.clock);
        Ok(())
    }

    fn ensure_aux(&mut self) -> SurfaceResult<()> {
        if self.aux.is_fresh(&self.clock) {
            return Ok(());
        }
        self.ensure_smoothed()?;
        let Some(mesh) = self.smoothed.get() else {
            return Err(SurfaceError::InvalidMesh(
                "surface has no mesh master".into(),
            ));
        };
        let aux = grid_from_mesh_nodes(mesh)?;
        self.aux.store(aux, &self.clock);
        Ok(())
    }

    fn ensure_boundary(&mut self) -> SurfaceResult<()> {
        if self.boundary.is_fresh(&self.clock) {
            return Ok(());
        }
        let Some(Master::Mesh(mesh)) = &self.master else {
            return Err(SurfaceError::InvalidMesh(
                "surface has no mesh master".into(),
            ));
        };
        let boundary = outline_mesh(mesh)?;
        self.boundary.store(boundary, &self.clock);
        Ok(())
    }

    /// The clip region in effect: a caller-supplied override wins over
    /// the cached mesh outline.
    fn clip_region(&self) -> Option<&ClipPolygon> {
        self.boundary_override
            .as_ref()
            .or_else(|| self.boundary.get().and_then(|b| b.as_ref()))
    }

    // ---- primitive extraction ----------------------------------------

    /// Contour polylines for the master surface, empty when contour
    /// drawing is disabled.
    pub fn calc_contours(&mut self) -> SurfaceResult<Vec<ContourLine>> {
        if !self.draw.show_contours {
            return Ok(Vec::new());
        }
        match &self.master {
            Some(Master::Grid(_)) => {
                self.ensure_planar()?;
                let Some(planar) = self.planar.get() else {
                    return Ok(Vec::new());
                };
                contour_grid(&planar.grid, planar.index.as_ref(), &self.calc, &self.draw)
            }
            Some(Master::Mesh(_)) => {
                self.ensure_aux()?;
                self.ensure_boundary()?;
                let Some(aux) = self.aux.get() else {
                    return Ok(Vec::new());
                };
                contour_mesh_grid(aux, self.clip_region(), &self.calc, &self.draw)
            }
            None => Err(SurfaceError::InvalidGeometry(
                "surface has no master data".into(),
            )),
        }
    }

    /// Color-banded raster at the requested view rectangle. `Ok(None)`
    /// when there is nothing to draw (no bands, empty NDP table).
    pub fn calc_image(&mut self, request: &ImageRequest) -> SurfaceResult<Option<RasterImage>> {
        if let Some(ndp) = &self.ndp {
            return composite_ndp(ndp, &self.ndp_table, self.clip_region(), request);
        }
        match &self.master {
            Some(Master::Grid(_)) => {
                self.ensure_planar()?;
                let Some(planar) = self.planar.get() else {
                    return Ok(None);
                };
                composite_grid(
                    &planar.grid,
                    planar.index.as_ref(),
                    &self.bands,
                    self.calc.thickness,
                    self.boundary_override.as_ref(),
                    request,
                )
            }
            Some(Master::Mesh(_)) => {
                self.ensure_smoothed()?;
                self.ensure_boundary()?;
                let Some(mesh) = self.smoothed.get() else {
                    return Ok(None);
                };
                let target = GridGeometry::axis_aligned(
                    request.ncol,
                    request.nrow,
                    request.x1,
                    request.y1,
                    request.x2 - request.x1,
                    request.y2 - request.y1,
                )?;
                let faces = grid_from_mesh_faces(mesh, target)?;
                composite_grid(
                    &faces,
                    None,
                    &self.bands,
                    self.calc.thickness,
                    self.clip_region(),
                    request,
                )
            }
            None => Err(SurfaceError::InvalidGeometry(
                "surface has no master data".into(),
            )),
        }
    }

    /// Node markers, with value text when node values are enabled.
    pub fn calc_nodes(&mut self) -> SurfaceResult<Vec<NodeMarker>> {
        if !self.draw.show_node_symbols && !self.draw.show_node_values {
            return Ok(Vec::new());
        }
        let with_text = self.draw.show_node_values;
        match &self.master {
            Some(Master::Grid(grid)) => Ok(primitives::grid_node_markers(grid, with_text)),
            Some(Master::Mesh(mesh)) => Ok(primitives::mesh_node_markers(mesh, with_text)),
            None => Err(SurfaceError::InvalidGeometry(
                "surface has no master data".into(),
            )),
        }
    }

    /// Cell-edge polylines (grid lattice rows/columns or mesh edges).
    pub fn calc_edges(&mut self) -> SurfaceResult<Vec<EdgeLine>> {
        if !self.draw.show_cell_edges {
            return Ok(Vec::new());
        }
        match &self.master {
            Some(Master::Grid(grid)) => Ok(primitives::grid_cell_edges(grid)),
            Some(Master::Mesh(mesh)) => Ok(primitives::mesh_cell_edges(mesh)),
            None => Err(SurfaceError::InvalidGeometry(
                "surface has no master data".into(),
            )),
        }
    }

    /// Fault polylines: stored fault lines for a grid, chained
    /// fault-flagged edges for a mesh.
    pub fn calc_fault_lines(&mut self) -> SurfaceResult<Vec<FaultTrace>> {
        if !self.draw.show_fault_lines {
            return Ok(Vec::new());
        }
        match &self.master {
            Some(Master::Grid(_)) => Ok(primitives::grid_fault_traces(&self.faults)),
            Some(Master::Mesh(mesh)) => {
                let traces = primitives::mesh_fault_traces(mesh);
                if traces.is_empty() {
                    warn!("mesh carries no drawable fault edges");
                }
                Ok(traces)
            }
            None => Err(SurfaceError::InvalidGeometry(
                "surface has no master data".into(),
            )),
        }
    }

    // ---- introspection -----------------------------------------------

    pub fn z_scale(&self) -> f64 {
        self.zscale
    }

    /// Rebuild counts per derived product.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            planar_builds: self.planar.builds(),
            smoothed_builds: self.smoothed.builds(),
            aux_builds: self.aux.builds(),
            boundary_builds: self.boundary.builds(),
        }
    }

    /// The cached smoothed mesh, if one has been built.
    pub fn smoothed_mesh(&self) -> Option<&TriMesh> {
        self.smoothed.get()
    }

    /// The cached boundary outline, if one has been built.
    pub fn cached_boundary(&self) -> Option<&ClipPolygon> {
        self.boundary.get().and_then(|b| b.as_ref())
    }
}
