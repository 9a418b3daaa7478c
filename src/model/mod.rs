//! Coordinate conversion between the three models, and the hyperbolic metric.
//!
//! All conversions are closed form. The half-plane and disk models are related
//! by the Cayley map `w = i(z - i)/(z + i)`, which sends `i` to the disk origin,
//! `∞` to the north pole `(0, 1)` and `0` to the south pole `(0, -1)`, and keeps
//! the positive x axis on the right. The Klein and Poincaré disks share the
//! unit circle as their ideal boundary: `k = 2w / (1 + |w|²)`.
//!
//! Distance is defined once, in the Klein disk. Every other model converts
//! its operands to Klein coordinates first.

pub mod line;
pub mod point;

pub use line::{DiskLine, KleinLine, Line, LineShape, UhpLine};
pub use point::Point;

use glam::{DVec2, dvec2};

use crate::defaults::{ARBITRARILY_SMALL, INFINITE};
use crate::types::Model;

/// Convert model coordinates `p` from one model to another.
///
/// Half-plane results are clamped to `y >= 0`.
pub fn convert(p: DVec2, from: Model, to: Model) -> DVec2 {
    use Model::*;
    let out = match (from, to) {
        (PoincareUhp, PoincareUhp) | (KleinDisk, KleinDisk) | (PoincareDisk, PoincareDisk) => p,
        (PoincareUhp, KleinDisk) => uhp_to_klein(p),
        (PoincareUhp, PoincareDisk) => uhp_to_disk(p),
        (KleinDisk, PoincareUhp) => klein_to_uhp(p),
        (KleinDisk, PoincareDisk) => klein_to_disk(p),
        (PoincareDisk, PoincareUhp) => disk_to_uhp(p),
        (PoincareDisk, KleinDisk) => disk_to_klein(p),
    };
    clamp_to_model(out, to)
}

/// Keep half-plane points on or above the real axis.
#[inline]
pub fn clamp_to_model(p: DVec2, model: Model) -> DVec2 {
    match model {
        Model::PoincareUhp if p.y < 0.0 => dvec2(p.x, 0.0),
        _ => p,
    }
}

pub fn uhp_to_klein(p: DVec2) -> DVec2 {
    let r2 = p.length_squared();
    dvec2(2.0 * p.x, r2 - 1.0) / (r2 + 1.0)
}

pub fn klein_to_uhp(k: DVec2) -> DVec2 {
    let den = 1.0 - k.y;
    if den < ARBITRARILY_SMALL {
        return dvec2(0.0, INFINITE);
    }
    let s = (1.0 - k.length_squared()).abs().sqrt();
    dvec2(k.x / den, s / den)
}

pub fn uhp_to_disk(p: DVec2) -> DVec2 {
    let den = p.x * p.x + (p.y + 1.0) * (p.y + 1.0);
    dvec2(2.0 * p.x, p.length_squared() - 1.0) / den
}

pub fn disk_to_uhp(w: DVec2) -> DVec2 {
    let den = w.x * w.x + (1.0 - w.y) * (1.0 - w.y);
    if den < ARBITRARILY_SMALL * ARBITRARILY_SMALL {
        return dvec2(0.0, INFINITE);
    }
    dvec2(2.0 * w.x, 1.0 - w.length_squared()) / den
}

pub fn klein_to_disk(k: DVec2) -> DVec2 {
    k / (1.0 + (1.0 - k.length_squared()).abs().sqrt())
}

pub fn disk_to_klein(w: DVec2) -> DVec2 {
    2.0 * w / (1.0 + w.length_squared())
}

/// Half-plane abscissa of an ideal point given on the unit circle.
///
/// `None` is the point at infinity (the north pole).
pub fn ideal_to_uhp(e: DVec2) -> Option<f64> {
    let den = 1.0 - e.y;
    if den.abs() < ARBITRARILY_SMALL {
        None
    } else {
        Some(e.x / den)
    }
}

/// Unit-circle image of a half-plane ideal point `(x, 0)`, or of `∞` for `None`.
pub fn uhp_to_ideal(x: Option<f64>) -> DVec2 {
    match x {
        None => dvec2(0.0, 1.0),
        Some(x) => dvec2(2.0 * x, x * x - 1.0) / (x * x + 1.0),
    }
}

/// Hyperbolic distance between two Klein-disk points.
///
/// `cosh d = (1 - a·b) / sqrt((1 - |a|²)(1 - |b|²))`. The argument is clamped
/// to 1 so rounding never produces NaN for coincident points.
pub fn klein_distance(a: DVec2, b: DVec2) -> f64 {
    let den = ((1.0 - a.length_squared()) * (1.0 - b.length_squared())).sqrt();
    let arg = (1.0 - a.dot(b)) / den;
    if arg.is_nan() {
        return f64::INFINITY;
    }
    arg.max(1.0).acosh()
}

/// Hyperbolic distance between two points given in `model` coordinates.
pub fn distance(a: DVec2, b: DVec2, model: Model) -> f64 {
    klein_distance(
        convert(a, model, Model::KleinDisk),
        convert(b, model, Model::KleinDisk),
    )
}

/// Euclidean circle `(center, radius)` of the half-plane hyperbolic circle
/// around `center` with hyperbolic `radius`.
pub fn uhp_circle(center: DVec2, radius: f64) -> (DVec2, f64) {
    (dvec2(center.x, center.y * radius.cosh()), center.y * radius.sinh())
}
