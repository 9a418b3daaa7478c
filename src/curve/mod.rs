//! Implicit curves of hyperbolic geometry.
//!
//! Each curve kind is the zero set of a defining function built from the
//! hyperbolic distance. Because the distance converts its operands to the
//! Klein disk, a defining function can be evaluated at a point given in any
//! model without converting the curve itself.

mod circle;
mod equidistant;
mod hyp_ellipse;
mod parabola;

pub use circle::Circle;
pub use equidistant::EquidistantCurve;
pub use hyp_ellipse::HypEllipse;
pub use parabola::Parabola;

use std::cell::RefCell;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::config::TraceConfig;
use crate::errors::SeedError;
use crate::log::warn;
use crate::model::Point;
use crate::seed::Seeds;
use crate::trace::Metric;
use crate::types::Model;

/// Common behavior for all curve kinds
#[enum_dispatch]
pub trait ImplicitCurve {
    /// Signed deviation of `x` from the curve; zero exactly on it.
    fn defining_function(&self, x: &Point) -> f64;

    /// Points on the curve to start tracing from, one per branch.
    fn seeds(&self, config: &TraceConfig) -> Result<Seeds, SeedError>;
}

/// Any of the supported curve kinds.
#[enum_dispatch(ImplicitCurve)]
#[derive(Clone, Debug)]
pub enum Conic {
    Circle,
    HypEllipse,
    Parabola,
    EquidistantCurve,
}

impl Conic {
    pub fn kind(&self) -> &'static str {
        match self {
            Conic::Circle(_) => "circle",
            Conic::HypEllipse(e) if e.is_ellipse() => "ellipse",
            Conic::HypEllipse(_) => "hyperbola",
            Conic::Parabola(_) => "parabola",
            Conic::EquidistantCurve(_) => "equidistant curve",
        }
    }

    /// This curve's defining function over `model` coordinates.
    pub fn metric(&self, model: Model) -> BoundCurve<'_, Conic> {
        BoundCurve::new(self, model)
    }
}

/// A curve's defining function bound to one model's coordinates.
#[derive(Debug)]
pub struct BoundCurve<'a, C: ?Sized> {
    curve: &'a C,
    model: Model,
}

impl<'a, C: ImplicitCurve + ?Sized> BoundCurve<'a, C> {
    pub fn new(curve: &'a C, model: Model) -> Self {
        BoundCurve { curve, model }
    }

    pub fn model(&self) -> Model {
        self.model
    }
}

impl<C: ImplicitCurve + ?Sized> Metric for BoundCurve<'_, C> {
    fn eval(&self, p: DVec2) -> f64 {
        self.curve.defining_function(&Point::new(self.model, p))
    }
}

/// What the seed routines read from a `TraceConfig`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SeedKey {
    computation_tolerance: f64,
    reference_y: f64,
}

impl SeedKey {
    fn of(config: &TraceConfig) -> Self {
        SeedKey {
            computation_tolerance: config.computation_tolerance,
            reference_y: config.reference_y(),
        }
    }
}

/// Memoized seeds of one curve.
///
/// Entries are keyed by the config values the seed routines read, and every
/// mutator of the owning curve calls [`SeedCache::invalidate`].
#[derive(Clone, Debug, Default)]
struct SeedCache(RefCell<Option<(SeedKey, Result<Seeds, SeedError>)>>);

impl SeedCache {
    fn get_or_compute(
        &self,
        config: &TraceConfig,
        compute: impl FnOnce() -> Result<Seeds, SeedError>,
    ) -> Result<Seeds, SeedError> {
        let key = SeedKey::of(config);
        if let Some((cached, seeds)) = &*self.0.borrow() {
            if *cached == key {
                return seeds.clone();
            }
        }
        let seeds = compute();
        // Only read by `warn!`, which is a no-op without the `tracing` feature.
        if let Err(_err) = &seeds {
            warn!(err = %_err, "seed finding failed");
        }
        *self.0.borrow_mut() = Some((key, seeds.clone()));
        seeds
    }

    fn invalidate(&mut self) {
        *self.0.get_mut() = None;
    }

    #[cfg(test)]
    fn is_filled(&self) -> bool {
        self.0.borrow().is_some()
    }
}
