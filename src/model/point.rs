//! A hyperbolic point known in one or more models at once.

use std::cell::OnceCell;

use glam::{DVec2, dvec2};

use super::{clamp_to_model, convert, klein_distance};
use crate::types::Model;

/// A point of the hyperbolic plane.
///
/// Coordinates are cached per model. At least one model is always filled in;
/// reading any other model converts from a filled one and caches the result.
/// Setting coordinates in one model drops every other cached model, so a
/// stale conversion is never read after a mutation.
#[derive(Clone, Debug)]
pub struct Point {
    coords: [OnceCell<DVec2>; 3],
}

impl Point {
    /// A point with coordinates `xy` in `model`.
    pub fn new(model: Model, xy: DVec2) -> Self {
        let coords: [OnceCell<DVec2>; 3] = Default::default();
        let _ = coords[model.index()].set(clamp_to_model(xy, model));
        Point { coords }
    }

    pub fn uhp(x: f64, y: f64) -> Self {
        Self::new(Model::PoincareUhp, dvec2(x, y))
    }

    pub fn klein(x: f64, y: f64) -> Self {
        Self::new(Model::KleinDisk, dvec2(x, y))
    }

    pub fn disk(x: f64, y: f64) -> Self {
        Self::new(Model::PoincareDisk, dvec2(x, y))
    }

    /// Coordinates in `model`, converting and caching on first access.
    pub fn get(&self, model: Model) -> DVec2 {
        *self.coords[model.index()].get_or_init(|| {
            let source = Model::ALL
                .into_iter()
                .find(|m| self.coords[m.index()].get().is_some());
            crate::invariant!(source.is_some(), "point has no valid model");
            let source = source.unwrap_or(model);
            let xy = self.coords[source.index()].get().copied().unwrap_or_default();
            convert(xy, source, model)
        })
    }

    /// Replace the point's position with `xy` in `model`.
    pub fn set(&mut self, model: Model, xy: DVec2) {
        *self = Self::new(model, xy);
    }

    /// Whether coordinates for `model` are currently cached.
    pub fn is_valid(&self, model: Model) -> bool {
        self.coords[model.index()].get().is_some()
    }

    /// Hyperbolic distance, computed in the Klein disk.
    pub fn distance(&self, other: &Point) -> f64 {
        klein_distance(self.get(Model::KleinDisk), other.get(Model::KleinDisk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_other_model_fills_cache() {
        let p = Point::uhp(0.0, 1.0);
        assert!(p.is_valid(Model::PoincareUhp));
        assert!(!p.is_valid(Model::PoincareDisk));
        assert!(p.get(Model::PoincareDisk).length() < 1e-12);
        assert!(p.is_valid(Model::PoincareDisk));
    }

    #[test]
    fn set_invalidates_other_models() {
        let mut p = Point::klein(0.1, 0.2);
        p.get(Model::PoincareUhp);
        p.set(Model::PoincareDisk, dvec2(0.0, 0.0));
        assert!(!p.is_valid(Model::KleinDisk));
        assert!(!p.is_valid(Model::PoincareUhp));
        assert!((p.get(Model::PoincareUhp) - dvec2(0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn half_plane_points_are_clamped() {
        let p = Point::uhp(2.0, -0.5);
        assert_eq!(p.get(Model::PoincareUhp), dvec2(2.0, 0.0));
    }

    #[test]
    fn distance_is_model_independent() {
        let a = Point::uhp(0.5, 0.75);
        let b = Point::disk(-0.2, 0.1);
        let direct = a.distance(&b);
        let via_disk = super::super::distance(
            a.get(Model::PoincareDisk),
            b.get(Model::PoincareDisk),
            Model::PoincareDisk,
        );
        assert!((direct - via_disk).abs() < 1e-10);
    }
}
