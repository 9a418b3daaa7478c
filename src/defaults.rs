//! Numeric constants and default settings.
//!
//! These values are shared by the conversion formulas, the seed finder and
//! both tracers. Changing them changes which configurations are treated as
//! degenerate.

use crate::types::Viewport;

/// Below this, two points are the same point, a determinant is singular,
/// and a coordinate is zero.
pub const ARBITRARILY_SMALL: f64 = 1.0e-10;

/// Default precision for the nearest-point search and seed routines.
pub const COMPUTATION_TOLERANCE: f64 = 1.0e-12;

/// Hard cap on steps per arm of a directional trace.
pub const MAX_TRACE_STEPS: usize = 15_000;

/// Smallest hyperbolic radius a `Circle` accepts.
pub const MIN_RADIUS: f64 = 1.0e-3;

/// Iteration cap for the nearest-point search. The search narrows its
/// bracket by a third per round, so this is far more than any tolerance
/// above `f64::EPSILON` needs.
pub const MAX_SEARCH_ITERATIONS: usize = 500;

/// Stand-in for a coordinate at infinity (PUHP image of the disk's north pole).
pub const INFINITE: f64 = 1.0e100;

pub const GRID_TOLERANCE: f64 = 0.01;
pub const STEP: f64 = 0.005;

pub const UHP_VIEWPORT: Viewport = Viewport::new(-3.0, 3.0, 0.0, 4.0);
pub const DISK_VIEWPORT: Viewport = Viewport::UNIT_SQUARE;
