//! Analytic seed points for the directional tracer.
//!
//! The directional tracer has no global view of a curve, so it has to start
//! exactly on it. Every routine here works in the Poincaré half plane, where a
//! hyperbolic circle is a Euclidean circle and a geodesic is a vertical line or
//! a semicircle. A seed is then the intersection of a hyperbolic circle of a
//! known radius with the right geodesic.

use glam::DVec2;

use crate::defaults::ARBITRARILY_SMALL;
use crate::errors::SeedError;
use crate::model::{Line, Point, UhpLine, uhp_circle};
use crate::types::Model;

/// One starting point per curve branch.
///
/// Single-branch curves, and ellipses, carry the same point twice.
#[derive(Clone, Debug)]
pub struct Seeds {
    points: [Point; 2],
}

impl Seeds {
    pub fn single(p: Point) -> Self {
        Seeds { points: [p.clone(), p] }
    }

    pub fn pair(first: Point, second: Point) -> Self {
        Seeds { points: [first, second] }
    }

    pub fn first(&self) -> &Point {
        &self.points[0]
    }

    pub fn second(&self) -> &Point {
        &self.points[1]
    }

    pub fn points(&self) -> &[Point; 2] {
        &self.points
    }

    /// Whether both branch seeds are the same point.
    pub fn is_single(&self) -> bool {
        self.points[0].distance(&self.points[1]) < ARBITRARILY_SMALL
    }

    /// The seeds with the duplicate dropped.
    pub fn distinct(&self) -> &[Point] {
        if self.is_single() { &self.points[..1] } else { &self.points }
    }
}

fn checked_root(value: f64, slack: f64) -> Result<f64, SeedError> {
    if value < -slack {
        return Err(SeedError::NoIntersection { discriminant: value });
    }
    Ok(value.abs().sqrt())
}

/// Intersect the Euclidean circle `(center, radius)` with a half-plane
/// geodesic's defining curve.
///
/// Discriminants that are negative by less than `tolerance` (scaled to the
/// circles) are treated as tangency.
pub fn circle_intersection(
    center: DVec2,
    radius: f64,
    line: UhpLine,
    tolerance: f64,
) -> Result<[DVec2; 2], SeedError> {
    match line {
        UhpLine::TypeI { x } => {
            let dx = x - center.x;
            let s = checked_root(radius * radius - dx * dx, tolerance * radius.max(1.0).powi(2))?;
            Ok([DVec2::new(x, center.y - s), DVec2::new(x, center.y + s)])
        }
        UhpLine::TypeII { center: a, radius: r } => {
            // Subtracting the two circle equations leaves the linear radical
            // axis; `along` is its offset from `center` toward the arc center.
            let delta = DVec2::new(a, 0.0) - center;
            let d = delta.length();
            if d < ARBITRARILY_SMALL {
                return Err(SeedError::NoIntersection { discriminant: -(radius - r).powi(2) });
            }
            let along = (radius * radius - r * r + d * d) / (2.0 * d);
            let slack = tolerance * radius.max(r).max(1.0).powi(2);
            let h = checked_root(radius * radius - along * along, slack)?;
            let u = delta / d;
            let base = center + u * along;
            Ok([base - u.perp() * h, base + u.perp() * h])
        }
    }
}

/// The point on the geodesic through `from` and `toward` at hyperbolic
/// distance `distance` from `from`, on the side selected by `between`.
pub fn point_on_geodesic(
    from: &Point,
    toward: &Point,
    distance: f64,
    between: bool,
    tolerance: f64,
) -> Result<Point, SeedError> {
    let line = Line::through(from.clone(), toward.clone());
    let (center, radius) = uhp_circle(from.get(Model::PoincareUhp), distance);
    let [a, b] = circle_intersection(center, radius, line.uhp(), tolerance)?;
    let (pa, pb) = (Point::new(Model::PoincareUhp, a), Point::new(Model::PoincareUhp, b));
    let (da, db) = (toward.distance(&pa), toward.distance(&pb));
    let take_a = if between { da <= db } else { da >= db };
    Ok(if take_a { pa } else { pb })
}

/// Seed of a circle: straight above the center in the half plane.
pub fn circle_seeds(center: &Point, radius: f64) -> Seeds {
    let c = center.get(Model::PoincareUhp);
    Seeds::single(Point::uhp(c.x, c.y * radius.exp()))
}

/// Seeds of the ellipse or hyperbola with foci `f1`, `f2` and constant `scalar`.
///
/// An ellipse (`scalar` above the focal distance `d`) gets one seed on the
/// focal geodesic beyond `f1`, at `(scalar - d) / 2` from it. A hyperbola gets
/// one vertex per branch: the focal-geodesic point at `(d - scalar) / 2` from
/// each focus, on that focus's side of the midpoint.
pub fn hyp_ellipse_seeds(
    f1: &Point,
    f2: &Point,
    scalar: f64,
    tolerance: f64,
) -> Result<Seeds, SeedError> {
    let d = f1.distance(f2);
    if d < ARBITRARILY_SMALL {
        if scalar <= ARBITRARILY_SMALL {
            return Err(SeedError::CoincidentPoints);
        }
        return Ok(circle_seeds(f1, scalar / 2.0));
    }
    if scalar > d {
        let p = point_on_geodesic(f1, f2, (scalar - d) / 2.0, false, tolerance)?;
        Ok(Seeds::single(p))
    } else {
        let t = (d - scalar) / 2.0;
        let first = point_on_geodesic(f1, f2, t, true, tolerance)?;
        let second = point_on_geodesic(f2, f1, t, true, tolerance)?;
        Ok(Seeds::pair(first, second))
    }
}

/// Seed of a parabola: the vertex, halfway between the focus and its foot on
/// the directrix.
pub fn parabola_seeds(focus: &Point, line: &Line, tolerance: f64) -> Result<Seeds, SeedError> {
    let gap = line.distance_to(focus);
    if gap < ARBITRARILY_SMALL {
        return Err(SeedError::FocusOnLine);
    }
    let foot = line.nearest_point(focus, Model::PoincareUhp, tolerance)?;
    let vertex = point_on_geodesic(focus, &foot, gap / 2.0, true, tolerance)?;
    Ok(Seeds::single(vertex))
}

/// Seeds of the two branches of the curve at `distance` from `line`.
///
/// For a semicircle, the points straight above and below its crest. A vertical
/// line's equidistant curves are unbounded, so those seeds sit at the
/// caller's `reference_y`.
pub fn equidistant_seeds(line: &Line, distance: f64, reference_y: f64) -> Seeds {
    match line.uhp() {
        UhpLine::TypeII { center, radius } => Seeds::pair(
            Point::uhp(center, radius * distance.exp()),
            Point::uhp(center, radius * (-distance).exp()),
        ),
        UhpLine::TypeI { x } => {
            let h = reference_y * distance.sinh();
            Seeds::pair(Point::uhp(x + h, reference_y), Point::uhp(x - h, reference_y))
        }
    }
}
