use super::{ImplicitCurve, SeedCache};
use crate::config::TraceConfig;
use crate::errors::SeedError;
use crate::model::{Line, Point};
use crate::seed::{Seeds, parabola_seeds};

/// Points equidistant from a focus and a line (the directrix).
#[derive(Clone, Debug)]
pub struct Parabola {
    focus: Point,
    line: Line,
    seeds: SeedCache,
}

impl Parabola {
    pub fn new(focus: Point, line: Line) -> Self {
        Parabola { focus, line, seeds: SeedCache::default() }
    }

    pub fn focus(&self) -> &Point {
        &self.focus
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn set_focus(&mut self, focus: Point) {
        self.focus = focus;
        self.seeds.invalidate();
    }

    pub fn set_line(&mut self, line: Line) {
        self.line = line;
        self.seeds.invalidate();
    }
}

impl ImplicitCurve for Parabola {
    fn defining_function(&self, x: &Point) -> f64 {
        self.focus.distance(x) - self.line.distance_to(x)
    }

    fn seeds(&self, config: &TraceConfig) -> Result<Seeds, SeedError> {
        let tolerance = config.computation_tolerance;
        self.seeds.get_or_compute(config, || parabola_seeds(&self.focus, &self.line, tolerance))
    }
}
