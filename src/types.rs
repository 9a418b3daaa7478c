//! Model discriminator and viewport rectangles.

use std::fmt;

use glam::DVec2;

/// The three models of the hyperbolic plane the crate works in.
///
/// Used pervasively as the discriminator for which conversion or metric
/// branch to take. The discriminant doubles as an index into per-model
/// arrays (`Point` caches, `TraceConfig::viewports`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Model {
    /// Poincaré upper half plane: `y > 0`, geodesics are vertical lines
    /// (Type I) and semicircles centered on the x axis (Type II).
    #[default]
    PoincareUhp,
    /// Beltrami–Klein disk: open unit disk, geodesics are straight chords.
    KleinDisk,
    /// Poincaré disk: open unit disk, geodesics are diameters and arcs of
    /// circles orthogonal to the boundary.
    PoincareDisk,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::PoincareUhp, Model::KleinDisk, Model::PoincareDisk];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Model::PoincareUhp => 0,
            Model::KleinDisk => 1,
            Model::PoincareDisk => 2,
        }
    }

    /// Whether the model's domain is the open unit disk.
    #[inline]
    pub const fn is_disk(self) -> bool {
        !matches!(self, Model::PoincareUhp)
    }

    /// Whether `p` is strictly inside the model's domain.
    pub fn contains(self, p: DVec2) -> bool {
        match self {
            Model::PoincareUhp => p.y > 0.0,
            Model::KleinDisk | Model::PoincareDisk => p.length_squared() < 1.0,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Model::PoincareUhp => "PUHP",
            Model::KleinDisk => "KD",
            Model::PoincareDisk => "PD",
        })
    }
}

/// Axis-aligned visible region, in model coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Viewport { x_min, x_max, y_min, y_max }
    }

    /// The square circumscribing the unit disk.
    pub const UNIT_SQUARE: Viewport = Viewport::new(-1.0, 1.0, -1.0, 1.0);

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    pub fn is_empty(&self) -> bool {
        !(self.x_min < self.x_max && self.y_min < self.y_max)
    }

    pub fn is_finite(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max].iter().all(|v| v.is_finite())
    }

    /// Vertical midpoint of the region.
    #[inline]
    pub fn mid_y(&self) -> f64 {
        (self.y_min + self.y_max) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn model_indices_are_dense() {
        for (i, m) in Model::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn domain_membership() {
        assert!(Model::PoincareUhp.contains(dvec2(-12.0, 0.1)));
        assert!(!Model::PoincareUhp.contains(dvec2(0.0, 0.0)));
        assert!(Model::KleinDisk.contains(dvec2(0.6, 0.6)));
        assert!(!Model::PoincareDisk.contains(dvec2(1.0, 0.0)));
    }

    #[test]
    fn viewport_mid_and_containment() {
        let vp = Viewport::new(-2.0, 2.0, 0.0, 3.0);
        assert_eq!(vp.mid_y(), 1.5);
        assert!(vp.contains(dvec2(2.0, 3.0)));
        assert!(!vp.contains(dvec2(2.1, 1.0)));
        assert!(Viewport::new(1.0, 1.0, 0.0, 1.0).is_empty());
    }
}
