//! Hyperbolic lines (geodesics) and their per-model parameterizations.
//!
//! Each model represents a geodesic differently, and each has one shape that
//! its generic form cannot express: vertical half-plane lines, disk diameters
//! and vertical Klein chords. Those are separate variants, so no formula can
//! do arithmetic on a sentinel value.

use std::cell::OnceCell;
use std::f64::consts::PI;

use glam::{DVec2, dvec2};

use super::point::Point;
use super::{ideal_to_uhp, uhp_to_ideal};
use crate::defaults::{ARBITRARILY_SMALL, INFINITE, MAX_SEARCH_ITERATIONS};
use crate::errors::SeedError;
use crate::log::debug;
use crate::types::Model;

/// A geodesic in the Poincaré upper half plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UhpLine {
    /// Type I: the vertical line `x = x`.
    TypeI { x: f64 },
    /// Type II: the upper semicircle centered at `(center, 0)`.
    TypeII { center: f64, radius: f64 },
}

/// A chord of the Klein disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KleinLine {
    Vertical { x: f64 },
    Sloped { slope: f64, intercept: f64 },
}

/// A geodesic of the Poincaré disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DiskLine {
    /// A Euclidean diameter with unit `direction`.
    Diameter { direction: DVec2 },
    /// An arc of the circle orthogonal to the unit circle.
    Orthogonal { center: DVec2, radius: f64 },
}

/// One model's parameters for a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineShape {
    Uhp(UhpLine),
    Klein(KleinLine),
    Disk(DiskLine),
}

impl LineShape {
    pub fn model(&self) -> Model {
        match self {
            LineShape::Uhp(_) => Model::PoincareUhp,
            LineShape::Klein(_) => Model::KleinDisk,
            LineShape::Disk(_) => Model::PoincareDisk,
        }
    }
}

impl KleinLine {
    /// Coefficients `(a, b, c)` of the chord `a·x + b·y = c`.
    fn coefficients(self) -> (f64, f64, f64) {
        match self {
            KleinLine::Vertical { x } => (1.0, 0.0, x),
            KleinLine::Sloped { slope, intercept } => (slope, -1.0, -intercept),
        }
    }

    /// Where the chord's supporting line crosses the unit circle.
    fn ideal_points(self) -> [DVec2; 2] {
        match self {
            KleinLine::Vertical { x } => {
                let h = (1.0 - x * x).abs().sqrt();
                [dvec2(x, -h), dvec2(x, h)]
            }
            KleinLine::Sloped { slope: m, intercept: b } => {
                let disc = 1.0 + m * m - b * b;
                crate::invariant!(
                    disc >= -ARBITRARILY_SMALL,
                    "Klein line y = {m}x + {b} misses the disk"
                );
                let root = disc.abs().sqrt();
                let den = 1.0 + m * m;
                let x1 = (-m * b - root) / den;
                let x2 = (-m * b + root) / den;
                [dvec2(x1, m * x1 + b), dvec2(x2, m * x2 + b)]
            }
        }
    }
}

/// Every model's parameters for one line, computed together.
#[derive(Clone, Copy, Debug)]
struct Shapes {
    uhp: UhpLine,
    klein: KleinLine,
    disk: DiskLine,
    /// Ideal endpoints on the unit circle (identical in both disk models).
    ideal: [DVec2; 2],
}

impl Shapes {
    /// Derive the Poincaré-disk circle from two disk points, then the other
    /// models from it.
    fn from_disk_points(p: DVec2, q: DVec2) -> Self {
        crate::invariant!(
            p.distance(q) >= ARBITRARILY_SMALL,
            "line through coincident points {p} and {q}"
        );
        // The circle orthogonal to the unit circle through p and q has center c
        // with 2c·p = |p|² + 1 and 2c·q = |q|² + 1.
        let det = p.x * q.y - p.y * q.x;
        let disk = if det.abs() < ARBITRARILY_SMALL {
            let direction = [q - p, p, q]
                .into_iter()
                .max_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
                .and_then(|d| d.try_normalize())
                .unwrap_or(DVec2::X);
            debug!(?direction, "line through the disk origin is a diameter");
            DiskLine::Diameter { direction }
        } else {
            let bp = (p.length_squared() + 1.0) / 2.0;
            let bq = (q.length_squared() + 1.0) / 2.0;
            let center = dvec2(bp * q.y - bq * p.y, p.x * bq - q.x * bp) / det;
            let radius = (center.length_squared() - 1.0).abs().sqrt();
            DiskLine::Orthogonal { center, radius }
        };
        Self::from_disk(disk)
    }

    fn from_disk(disk: DiskLine) -> Self {
        let (klein, ideal) = match disk {
            DiskLine::Diameter { direction } => {
                let klein = if direction.x.abs() < ARBITRARILY_SMALL {
                    KleinLine::Vertical { x: 0.0 }
                } else {
                    KleinLine::Sloped { slope: direction.y / direction.x, intercept: 0.0 }
                };
                (klein, [-direction, direction])
            }
            DiskLine::Orthogonal { center, radius } => {
                // The chord joining the ideal endpoints is the radical axis of
                // the two circles: c·k = 1.
                let klein = if center.y.abs() < ARBITRARILY_SMALL {
                    debug!(x = 1.0 / center.x, "Klein chord is vertical");
                    KleinLine::Vertical { x: 1.0 / center.x }
                } else {
                    KleinLine::Sloped { slope: -center.x / center.y, intercept: 1.0 / center.y }
                };
                let c2 = center.length_squared();
                let foot = center / c2;
                let along = center.perp() * (radius / c2);
                (klein, [foot - along, foot + along])
            }
        };
        let uhp = match (ideal_to_uhp(ideal[0]), ideal_to_uhp(ideal[1])) {
            (Some(a), Some(b)) => {
                UhpLine::TypeII { center: (a + b) / 2.0, radius: (a - b).abs() / 2.0 }
            }
            (Some(x), None) | (None, Some(x)) => UhpLine::TypeI { x },
            (None, None) => UhpLine::TypeI { x: 0.0 },
        };
        Shapes { uhp, klein, disk, ideal }
    }
}

/// A hyperbolic line or segment through two defining points.
///
/// The per-model shapes and ideal endpoints are computed on first use and
/// dropped whenever a defining point changes.
#[derive(Clone, Debug)]
pub struct Line {
    points: [Point; 2],
    segment: bool,
    shapes: OnceCell<Shapes>,
}

impl Line {
    /// The full geodesic through `p` and `q`.
    ///
    /// The points must be distinct; using the line's shape otherwise panics.
    pub fn through(p: Point, q: Point) -> Self {
        Line { points: [p, q], segment: false, shapes: OnceCell::new() }
    }

    /// The geodesic segment from `p` to `q`.
    pub fn segment(p: Point, q: Point) -> Self {
        Line { points: [p, q], segment: true, shapes: OnceCell::new() }
    }

    /// The full geodesic described by `shape`.
    pub fn from_shape(shape: LineShape) -> Self {
        let chord = |[a, b]: [DVec2; 2]| {
            [Point::klein_lerp(a, b, 1.0 / 3.0), Point::klein_lerp(a, b, 2.0 / 3.0)]
        };
        let [p, q] = match shape {
            LineShape::Uhp(UhpLine::TypeI { x }) => [Point::uhp(x, 1.0), Point::uhp(x, 2.0)],
            LineShape::Uhp(UhpLine::TypeII { center, radius }) => {
                let at = |t: f64| Point::uhp(center + radius * t.cos(), radius * t.sin());
                [at(PI / 3.0), at(2.0 * PI / 3.0)]
            }
            LineShape::Klein(klein) => chord(klein.ideal_points()),
            LineShape::Disk(DiskLine::Diameter { direction }) => {
                let half = 0.5 * direction;
                [Point::disk(-half.x, -half.y), Point::disk(half.x, half.y)]
            }
            LineShape::Disk(disk) => chord(Shapes::from_disk(disk).ideal),
        };
        Line::through(p, q)
    }

    pub fn points(&self) -> &[Point; 2] {
        &self.points
    }

    pub fn is_segment(&self) -> bool {
        self.segment
    }

    pub fn set_segment(&mut self, segment: bool) {
        self.segment = segment;
    }

    /// Move the defining points.
    pub fn set_points(&mut self, p: Point, q: Point) {
        self.points = [p, q];
        self.shapes = OnceCell::new();
    }

    fn shapes(&self) -> &Shapes {
        self.shapes.get_or_init(|| {
            Shapes::from_disk_points(
                self.points[0].get(Model::PoincareDisk),
                self.points[1].get(Model::PoincareDisk),
            )
        })
    }

    pub fn uhp(&self) -> UhpLine {
        self.shapes().uhp
    }

    pub fn klein(&self) -> KleinLine {
        self.shapes().klein
    }

    pub fn disk(&self) -> DiskLine {
        self.shapes().disk
    }

    /// This line's parameters in `model`.
    pub fn shape(&self, model: Model) -> LineShape {
        match model {
            Model::PoincareUhp => LineShape::Uhp(self.uhp()),
            Model::KleinDisk => LineShape::Klein(self.klein()),
            Model::PoincareDisk => LineShape::Disk(self.disk()),
        }
    }

    /// Ideal endpoints in `model` coordinates.
    ///
    /// In the half plane the endpoint at infinity is reported at height
    /// [`INFINITE`] above the other one.
    pub fn ideal_endpoints(&self, model: Model) -> [DVec2; 2] {
        let ideal = self.shapes().ideal;
        match model {
            Model::KleinDisk | Model::PoincareDisk => ideal,
            Model::PoincareUhp => match self.uhp() {
                UhpLine::TypeI { x } => [dvec2(x, 0.0), dvec2(x, INFINITE)],
                UhpLine::TypeII { .. } => {
                    ideal.map(|e| dvec2(ideal_to_uhp(e).unwrap_or(INFINITE), 0.0))
                }
            },
        }
    }

    /// Endpoints to draw: the defining points for a segment, the ideal
    /// endpoints otherwise.
    pub fn draw_endpoints(&self, model: Model) -> [DVec2; 2] {
        if self.segment {
            [self.points[0].get(model), self.points[1].get(model)]
        } else {
            self.ideal_endpoints(model)
        }
    }

    /// Hyperbolic distance from `x` to this (full) line.
    ///
    /// Closed form in the Klein disk: for the chord `a·u + b·v = c`,
    /// `sinh d = |a·x + b·y − c| / (sqrt(1 − |x|²) · sqrt(a² + b² − c²))`.
    pub fn distance_to(&self, x: &Point) -> f64 {
        let k = x.get(Model::KleinDisk);
        let (a, b, c) = self.klein().coefficients();
        let num = (a * k.x + b * k.y - c).abs();
        let den = (1.0 - k.length_squared()).abs().sqrt() * (a * a + b * b - c * c).abs().sqrt();
        if den == 0.0 {
            return f64::INFINITY;
        }
        (num / den).asinh()
    }

    /// Point of this line nearest to `target`, by bracketing search.
    ///
    /// Half-plane Type II lines are searched along the semicircle's angle;
    /// every other case is searched along the Klein chord between the ideal
    /// endpoints. The search stops once the bracket is narrower than
    /// `tolerance`.
    pub fn nearest_point(
        &self,
        target: &Point,
        model: Model,
        tolerance: f64,
    ) -> Result<Point, SeedError> {
        match (model, self.uhp()) {
            (Model::PoincareUhp, UhpLine::TypeII { center, radius }) => {
                let at = |t: f64| Point::uhp(center + radius * t.cos(), radius * t.sin());
                let t = narrow_bracket(|t| target.distance(&at(t)), 0.0, PI, tolerance)?;
                Ok(at(t))
            }
            _ => {
                let [a, b] = self.shapes().ideal;
                let t = narrow_bracket(
                    |t| target.distance(&Point::klein_lerp(a, b, t)),
                    0.0,
                    1.0,
                    tolerance,
                )?;
                Ok(Point::klein_lerp(a, b, t))
            }
        }
    }
}

impl Point {
    fn klein_lerp(a: DVec2, b: DVec2, t: f64) -> Point {
        let k = a.lerp(b, t);
        Point::klein(k.x, k.y)
    }
}

/// Minimize a unimodal `f` over `[lo, hi]`.
///
/// Tracks four abscissae `lo < m1 < m2 < hi` and drops an outer one each
/// round: `hi` when `f(m1) < f(m2)`, otherwise `lo`. Ties drop `lo`, which
/// keeps converged points reproducible.
pub fn narrow_bracket(
    f: impl Fn(f64) -> f64,
    lo: f64,
    hi: f64,
    tolerance: f64,
) -> Result<f64, SeedError> {
    let (mut lo, mut hi) = (lo, hi);
    for _ in 0..MAX_SEARCH_ITERATIONS {
        if hi - lo <= tolerance {
            return Ok((lo + hi) / 2.0);
        }
        let third = (hi - lo) / 3.0;
        let m1 = lo + third;
        let m2 = hi - third;
        if f(m1) < f(m2) {
            hi = m2;
        } else {
            lo = m1;
        }
    }
    Err(SeedError::NonConvergence { iterations: MAX_SEARCH_ITERATIONS, width: hi - lo })
}
