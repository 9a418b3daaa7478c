use super::{ImplicitCurve, SeedCache};
use crate::config::TraceConfig;
use crate::errors::SeedError;
use crate::model::Point;
use crate::seed::{Seeds, hyp_ellipse_seeds};

/// Ellipse or hyperbola, by two foci and a distance constant.
///
/// When `scalar` exceeds the distance between the foci this is the ellipse
/// `d(f1, X) + d(f2, X) = scalar`; otherwise it is the hyperbola
/// `|d(f1, X) - d(f2, X)| = scalar`.
#[derive(Clone, Debug)]
pub struct HypEllipse {
    focus1: Point,
    focus2: Point,
    scalar: f64,
    seeds: SeedCache,
}

impl HypEllipse {
    pub fn new(focus1: Point, focus2: Point, scalar: f64) -> Self {
        HypEllipse { focus1, focus2, scalar: scalar.abs(), seeds: SeedCache::default() }
    }

    pub fn foci(&self) -> (&Point, &Point) {
        (&self.focus1, &self.focus2)
    }

    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    pub fn is_ellipse(&self) -> bool {
        self.scalar > self.focus1.distance(&self.focus2)
    }

    pub fn set_foci(&mut self, focus1: Point, focus2: Point) {
        self.focus1 = focus1;
        self.focus2 = focus2;
        self.seeds.invalidate();
    }

    pub fn set_scalar(&mut self, scalar: f64) {
        self.scalar = scalar.abs();
        self.seeds.invalidate();
    }
}

impl ImplicitCurve for HypEllipse {
    fn defining_function(&self, x: &Point) -> f64 {
        let d1 = self.focus1.distance(x);
        let d2 = self.focus2.distance(x);
        if self.is_ellipse() {
            d1 + d2 - self.scalar
        } else {
            (d1 - d2).abs() - self.scalar
        }
    }

    fn seeds(&self, config: &TraceConfig) -> Result<Seeds, SeedError> {
        self.seeds.get_or_compute(config, || {
            hyp_ellipse_seeds(&self.focus1, &self.focus2, self.scalar, config.computation_tolerance)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyperbola_seeds_are_one_per_focus() {
        let f1 = Point::uhp(-0.5, 1.0);
        let f2 = Point::uhp(0.5, 1.0);
        let h = HypEllipse::new(f1.clone(), f2.clone(), 0.3);
        assert!(!h.is_ellipse());
        let seeds = h.seeds(&TraceConfig::default()).unwrap();
        assert!(!seeds.is_single());
        assert!(seeds.first().distance(&f1) < seeds.first().distance(&f2));
        assert!(seeds.second().distance(&f2) < seeds.second().distance(&f1));
        for p in seeds.points() {
            assert!(h.defining_function(p).abs() < 1e-9);
        }
    }

    #[test]
    fn coincident_foci_make_a_circle() {
        let f = Point::klein(0.2, 0.2);
        let e = HypEllipse::new(f.clone(), f.clone(), 1.0);
        let seeds = e.seeds(&TraceConfig::default()).unwrap();
        assert!((seeds.first().distance(&f) - 0.5).abs() < 1e-10);
        assert!(e.defining_function(seeds.first()).abs() < 1e-9);
    }

    #[test]
    fn fully_degenerate_curve_is_rejected() {
        let f = Point::klein(0.2, 0.2);
        let e = HypEllipse::new(f.clone(), f, 0.0);
        assert_eq!(e.seeds(&TraceConfig::default()).unwrap_err(), SeedError::CoincidentPoints);
    }
}
