use super::{ImplicitCurve, SeedCache};
use crate::config::TraceConfig;
use crate::errors::SeedError;
use crate::model::{Line, Point};
use crate::seed::{Seeds, equidistant_seeds};

/// Points at a fixed hyperbolic distance from a line, on both sides.
#[derive(Clone, Debug)]
pub struct EquidistantCurve {
    line: Line,
    distance: f64,
    seeds: SeedCache,
}

impl EquidistantCurve {
    pub fn new(line: Line, distance: f64) -> Self {
        EquidistantCurve { line, distance: distance.abs(), seeds: SeedCache::default() }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn set_line(&mut self, line: Line) {
        self.line = line;
        self.seeds.invalidate();
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance.abs();
        self.seeds.invalidate();
    }
}

impl ImplicitCurve for EquidistantCurve {
    fn defining_function(&self, x: &Point) -> f64 {
        self.line.distance_to(x) - self.distance
    }

    fn seeds(&self, config: &TraceConfig) -> Result<Seeds, SeedError> {
        let (line, distance, reference_y) = (&self.line, self.distance, config.reference_y());
        self.seeds.get_or_compute(config, || Ok(equidistant_seeds(line, distance, reference_y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineShape, UhpLine};
    use crate::types::{Model, Viewport};

    #[test]
    fn vertical_line_seeds_follow_reference_height() {
        let line = Line::from_shape(LineShape::Uhp(UhpLine::TypeI { x: 0.0 }));
        let curve = EquidistantCurve::new(line, 0.8);
        let viewport = Viewport::new(-2.0, 2.0, 0.0, 2.0);
        let cfg = TraceConfig::default().with_viewport(Model::PoincareUhp, viewport);
        let seeds = curve.seeds(&cfg).unwrap();
        for p in seeds.points() {
            assert!((p.get(Model::PoincareUhp).y - 1.0).abs() < 1e-12);
            assert!(curve.defining_function(p).abs() < 1e-9);
        }

        let taller = cfg.with_viewport(Model::PoincareUhp, Viewport::new(-2.0, 2.0, 0.0, 6.0));
        let moved = curve.seeds(&taller).unwrap();
        assert!((moved.first().get(Model::PoincareUhp).y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn disk_diameter_equidistant() {
        let line = Line::through(Point::klein(-0.5, 0.0), Point::klein(0.5, 0.0));
        let curve = EquidistantCurve::new(line, 0.4);
        let seeds = curve.seeds(&TraceConfig::default()).unwrap();
        assert!(!seeds.is_single());
        for p in seeds.points() {
            assert!(curve.defining_function(p).abs() < 1e-9);
        }
    }
}
