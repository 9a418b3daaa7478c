use super::{ImplicitCurve, SeedCache};
use crate::config::TraceConfig;
use crate::defaults::MIN_RADIUS;
use crate::errors::SeedError;
use crate::model::Point;
use crate::seed::{Seeds, circle_seeds};

/// The points at hyperbolic distance `radius` from `center`.
#[derive(Clone, Debug)]
pub struct Circle {
    center: Point,
    radius: f64,
    seeds: SeedCache,
}

impl Circle {
    /// Radii below [`MIN_RADIUS`] are raised to it.
    pub fn new(center: Point, radius: f64) -> Self {
        Circle { center, radius: radius.max(MIN_RADIUS), seeds: SeedCache::default() }
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
        self.seeds.invalidate();
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.max(MIN_RADIUS);
        self.seeds.invalidate();
    }
}

impl ImplicitCurve for Circle {
    fn defining_function(&self, x: &Point) -> f64 {
        self.center.distance(x) - self.radius
    }

    fn seeds(&self, config: &TraceConfig) -> Result<Seeds, SeedError> {
        self.seeds.get_or_compute(config, || Ok(circle_seeds(&self.center, self.radius)))
    }
}
