//! Per-session drawing state.

use glam::DVec2;

use crate::config::TraceConfig;
use crate::curve::{Conic, ImplicitCurve};
use crate::errors::SessionError;
use crate::log::info;
use crate::trace::{
    ContinuePredicate, GridScan, Metric, PointSink, TraceReport, trace_both_branches,
};
use crate::types::Model;

/// Which tracer a curve is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Method {
    /// Exhaustive sampling of the visible region.
    GridScan,
    /// Seeded walk along the curve.
    #[default]
    Directional,
}

/// Result of drawing one curve.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawReport {
    pub method: Method,
    pub model: Model,
    /// Points handed to the sink.
    pub points: usize,
    /// One entry per distinct seed; empty for a grid scan.
    pub traces: Vec<TraceReport>,
}

impl DrawReport {
    /// Whether any directional arm hit the step cap.
    pub fn truncated(&self) -> bool {
        self.traces.iter().any(TraceReport::truncated)
    }
}

/// The active model, tracing parameters and the curves being drawn.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub config: TraceConfig,
    model: Model,
    curves: Vec<Conic>,
}

impl Session {
    pub fn new(model: Model, config: TraceConfig) -> Self {
        Session { config, model, curves: Vec::new() }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn set_model(&mut self, model: Model) {
        self.model = model;
    }

    /// Add a curve and return its index.
    pub fn add(&mut self, curve: impl Into<Conic>) -> usize {
        self.curves.push(curve.into());
        self.curves.len() - 1
    }

    pub fn curves(&self) -> &[Conic] {
        &self.curves
    }

    pub fn curve(&self, index: usize) -> Result<&Conic, SessionError> {
        let len = self.curves.len();
        self.curves.get(index).ok_or(SessionError::NoSuchCurve { index, len })
    }

    /// Mutable access for the curve setters, which refresh seeds themselves.
    pub fn curve_mut(&mut self, index: usize) -> Result<&mut Conic, SessionError> {
        let len = self.curves.len();
        self.curves.get_mut(index).ok_or(SessionError::NoSuchCurve { index, len })
    }

    /// Draw one curve in the active model, stopping arms that leave the
    /// model's domain.
    pub fn draw<S: PointSink + ?Sized>(
        &self,
        index: usize,
        method: Method,
        sink: &mut S,
    ) -> miette::Result<DrawReport> {
        let model = self.model;
        self.draw_until(index, method, &mut |c: DVec2, _: DVec2| model.contains(c), sink)
    }

    /// Like [`Session::draw`], with a caller-supplied stop condition for the
    /// directional tracer.
    pub fn draw_until<P, S>(
        &self,
        index: usize,
        method: Method,
        predicate: &mut P,
        sink: &mut S,
    ) -> miette::Result<DrawReport>
    where
        P: ContinuePredicate + ?Sized,
        S: PointSink + ?Sized,
    {
        self.config.validate()?;
        let curve = self.curve(index)?;
        let metric = curve.metric(self.model);

        let mut points = 0usize;
        let mut counted = |x: f64, y: f64| {
            points += 1;
            sink.point(x, y);
        };

        let mut traces = Vec::new();
        match method {
            Method::GridScan => {
                for p in GridScan::new(|p: DVec2| metric.eval(p), self.model, &self.config)? {
                    counted(p.x, p.y);
                }
            }
            Method::Directional => {
                let seeds = curve.seeds(&self.config)?;
                let (model, config) = (self.model, &self.config);
                for seed in seeds.distinct() {
                    let start = seed.get(model);
                    let report =
                        trace_both_branches(&metric, predicate, model, config, start, &mut counted);
                    traces.push(report);
                }
            }
        }

        info!(curve = curve.kind(), ?method, model = %self.model, points, "curve drawn");
        Ok(DrawReport { method, model: self.model, points, traces })
    }

    /// Draw every curve in order, stopping at the first failure.
    pub fn draw_all<S: PointSink + ?Sized>(
        &self,
        method: Method,
        sink: &mut S,
    ) -> miette::Result<Vec<DrawReport>> {
        (0..self.curves.len()).map(|index| self.draw(index, method, sink)).collect()
    }
}
