//! Explicit invalidation graph for derived surface products.
//!
//! Each derived product declares which input axes it depends on and is
//! rebuilt lazily when any of them has been touched since the product
//! was last stored. This replaces ad hoc dirty flags: "rotation pending"
//! and "smoothing pending" are simply the absent/stale states of the
//! planar grid and smoothed mesh slots.

/// Input axes a derived product can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Master data content and placement (grid values, mesh tables,
    /// fault lines).
    Geometry,
    /// Vertical exaggeration. No product slot depends on it: a z-scale
    /// change rescales data in place instead of invalidating.
    ZScale,
    /// Contour calculation and draw options. Color bands are read
    /// fresh at composite time and never pass through this axis.
    DisplayProps,
}

const AXES: usize = 3;

/// Monotonic change counters, one per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisClock {
    ticks: [u64; AXES],
}

impl AxisClock {
    /// Record a change on one axis, staling every product that depends
    /// on it.
    pub fn touch(&mut self, axis: Axis) {
        self.ticks[axis as usize] += 1;
    }

    fn tick(&self, axis: Axis) -> u64 {
        self.ticks[axis as usize]
    }
}

/// A memoized product slot with declared axis dependencies.
#[derive(Debug)]
pub struct Derived<T> {
    deps: &'static [Axis],
    slot: Option<(T, [u64; AXES])>,
    builds: u64,
}

impl<T> Derived<T> {
    pub fn new(deps: &'static [Axis]) -> Self {
        Self {
            deps,
            slot: None,
            builds: 0,
        }
    }

    /// Drop the cached value outright (master representation replaced).
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// True when a value is cached and none of the declared dependencies
    /// moved since it was stored.
    pub fn is_fresh(&self, clock: &AxisClock) -> bool {
        match &self.slot {
            Some((_, seen)) => self
                .deps
                .iter()
                .all(|&axis| seen[axis as usize] == clock.tick(axis)),
            None => false,
        }
    }

    /// Store a freshly built value stamped against the current clock.
    pub fn store(&mut self, value: T, clock: &AxisClock) {
        let mut seen = [0u64; AXES];
        for &axis in self.deps {
            seen[axis as usize] = clock.tick(axis);
        }
        self.slot = Some((value, seen));
        self.builds += 1;
    }

    /// The cached value, fresh or not.
    pub fn get(&self) -> Option<&T> {
        self.slot.as_ref().map(|(v, _)| v)
    }

    /// Mutable access for in-place adjustment (z-scale rescaling) that
    /// deliberately does not count as a rebuild.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slot.as_mut().map(|(v, _)| v)
    }

    /// How many times this slot has been (re)built.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}
