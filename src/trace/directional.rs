//! Directional local-search curve follower ("Bresenham-style" method).
//!
//! An arm starts on a seed point, picks the compass heading whose neighbor is
//! closest to the curve, and from then on only turns by 45° per step:
//! each step evaluates straight on and the two neighboring headings and moves
//! to whichever lands closest to the curve.

use std::collections::HashSet;

use glam::{DVec2, IVec2, dvec2};

use super::{ContinuePredicate, Direction, Metric, PointSink, Termination, min_of_three};
use crate::config::TraceConfig;
use crate::defaults::{ARBITRARILY_SMALL, MAX_TRACE_STEPS};
use crate::log::{debug, warn};
use crate::types::{Model, Viewport};

/// An arm has "left" its start once it is this many pixels away.
const DEPARTURE_PIXELS: f64 = 3.0;
/// A departed arm within this many pixels of its start has closed the curve.
const CLOSURE_PIXELS: f64 = 1.5;

/// Progress of one arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceState {
    Start,
    Tracing,
    Stopped(Termination),
}

/// One arm of a directional trace, as a lazy sequence of points.
///
/// The first item is the starting point itself. Points lie on the pixel
/// lattice anchored at that start, and no lattice point is emitted twice.
/// The arm is finite: besides the caller's predicate it stops when a
/// candidate step would leave the visible region, on stalling, on coming
/// back to a pixel it already visited, and after [`MAX_TRACE_STEPS`] steps.
pub struct DirectionalTrace<M, P> {
    metric: M,
    predicate: P,
    model: Model,
    viewport: Viewport,
    step: DVec2,
    state: TraceState,
    origin: DVec2,
    current: DVec2,
    /// Lattice position of `current` relative to `origin`.
    cell: IVec2,
    visited: HashSet<IVec2>,
    heading: Option<Direction>,
    initial_heading: Option<Direction>,
    steps: usize,
    departed: bool,
}

impl<M: Metric, P: ContinuePredicate> DirectionalTrace<M, P> {
    /// An arm starting at `seed` with the heading chosen from all eight
    /// neighbors.
    pub fn new(metric: M, predicate: P, model: Model, config: &TraceConfig, seed: DVec2) -> Self {
        DirectionalTrace {
            metric,
            predicate,
            model,
            viewport: config.viewport(model),
            step: dvec2(config.step_x, config.step_y),
            state: TraceState::Start,
            origin: seed,
            current: seed,
            cell: IVec2::ZERO,
            visited: HashSet::new(),
            heading: None,
            initial_heading: None,
            steps: 0,
            departed: false,
        }
    }

    /// An arm starting at `start` with a fixed initial heading.
    pub fn with_heading(
        metric: M,
        predicate: P,
        model: Model,
        config: &TraceConfig,
        start: DVec2,
        heading: Direction,
    ) -> Self {
        let mut arm = Self::new(metric, predicate, model, config, start);
        arm.heading = Some(heading);
        arm
    }

    pub fn state(&self) -> TraceState {
        self.state
    }

    pub fn termination(&self) -> Option<Termination> {
        match self.state {
            TraceState::Stopped(reason) => Some(reason),
            _ => None,
        }
    }

    /// Steps taken after the starting point.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn initial_heading(&self) -> Option<Direction> {
        self.initial_heading
    }

    /// The half-plane viewport clipped to `y > 0`, or the open unit disk.
    fn in_region(&self, p: DVec2) -> bool {
        match self.model {
            Model::PoincareUhp => self.viewport.contains(p) && self.model.contains(p),
            Model::KleinDisk | Model::PoincareDisk => self.model.contains(p),
        }
    }

    fn at(&self, cell: IVec2) -> DVec2 {
        self.origin + cell.as_dvec2() * self.step
    }

    /// `|metric|` at `p`, with NaN ranked last.
    fn deviation(&self, p: DVec2) -> f64 {
        let v = self.metric.eval(p).abs();
        if v.is_nan() { f64::INFINITY } else { v }
    }

    fn stop(&mut self, reason: Termination) {
        debug!(%reason, steps = self.steps, "directional arm stopped");
        self.state = TraceState::Stopped(reason);
    }

    fn begin(&mut self) -> Option<DVec2> {
        if !self.in_region(self.current) {
            self.stop(Termination::LeftRegion);
            return None;
        }
        let heading = self.heading.unwrap_or_else(|| {
            let mut best = (Direction::North, f64::INFINITY);
            for d in Direction::ALL {
                let v = self.deviation(d.step(self.current, self.step));
                if v < best.1 {
                    best = (d, v);
                }
            }
            best.0
        });
        debug!(?heading, start = ?self.current, "directional arm started");
        self.heading = Some(heading);
        self.initial_heading = Some(heading);
        self.visited.insert(self.cell);
        self.state = TraceState::Tracing;
        Some(self.current)
    }

    fn advance(&mut self) -> Option<DVec2> {
        if self.steps >= MAX_TRACE_STEPS {
            warn!(steps = self.steps, "directional arm truncated at step cap");
            self.stop(Termination::StepCap);
            return None;
        }
        let Some(last) = self.heading else {
            unreachable!("tracing arm without a heading");
        };
        let candidates = last.candidates();
        let cells = candidates.map(|d| self.cell + d.offset());
        self.steps += 1;

        // Near the boundary the metric cannot rank a step that crosses it, so
        // the arm ends as soon as any candidate does.
        if cells.iter().any(|&c| !self.in_region(self.at(c))) {
            self.stop(Termination::LeftRegion);
            return None;
        }
        let values = cells.map(|c| self.deviation(self.at(c)));
        let choice = min_of_three(values);
        let (heading, cell) = (candidates[choice], cells[choice]);
        let next = self.at(cell);

        if next.distance(self.current) < ARBITRARILY_SMALL {
            self.stop(Termination::Stalled);
            return None;
        }
        if !self.predicate.keep_going(next, self.current) {
            self.stop(Termination::Rejected);
            return None;
        }
        let pixel = self.step.length();
        let from_origin = next.distance(self.origin);
        if !self.visited.insert(cell) || (self.departed && from_origin < CLOSURE_PIXELS * pixel) {
            self.stop(Termination::Closed);
            return None;
        }
        if from_origin > DEPARTURE_PIXELS * pixel {
            self.departed = true;
        }

        self.current = next;
        self.cell = cell;
        self.heading = Some(heading);
        Some(next)
    }
}

impl<M: Metric, P: ContinuePredicate> Iterator for DirectionalTrace<M, P> {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        match self.state {
            TraceState::Start => self.begin(),
            TraceState::Tracing => self.advance(),
            TraceState::Stopped(_) => None,
        }
    }
}

/// Outcome of one arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmReport {
    pub termination: Termination,
    pub steps: usize,
    pub points: usize,
}

/// Outcome of tracing both arms from one seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceReport {
    pub first: ArmReport,
    /// `None` when the first arm closed the curve or never started.
    pub second: Option<ArmReport>,
}

impl TraceReport {
    pub fn points(&self) -> usize {
        self.first.points + self.second.map_or(0, |arm| arm.points)
    }

    /// Whether either arm was cut off by the step cap.
    pub fn truncated(&self) -> bool {
        self.first.termination == Termination::StepCap
            || self.second.is_some_and(|arm| arm.termination == Termination::StepCap)
    }
}

fn drain<M: Metric, P: ContinuePredicate, S: PointSink + ?Sized>(
    arm: &mut DirectionalTrace<M, P>,
    sink: &mut S,
) -> ArmReport {
    let mut points = 0;
    for p in &mut *arm {
        sink.point(p.x, p.y);
        points += 1;
    }
    let Some(termination) = arm.termination() else {
        unreachable!("exhausted arm is always stopped");
    };
    ArmReport { termination, steps: arm.steps(), points }
}

/// Trace a curve from `seed` in both directions.
///
/// The first arm follows the best heading from the seed. Unless it closed the
/// curve, the second arm steps one pixel from the seed the opposite way and
/// follows that heading.
pub fn trace_both_branches<M, P, S>(
    metric: &M,
    predicate: &mut P,
    model: Model,
    config: &TraceConfig,
    seed: DVec2,
    sink: &mut S,
) -> TraceReport
where
    M: Metric + ?Sized,
    P: ContinuePredicate + ?Sized,
    S: PointSink + ?Sized,
{
    let mut forward = DirectionalTrace::new(
        |p: DVec2| metric.eval(p),
        |c: DVec2, p: DVec2| predicate.keep_going(c, p),
        model,
        config,
        seed,
    );
    let first = drain(&mut forward, sink);
    let heading = forward.initial_heading();

    let second = match (first.termination, heading) {
        (Termination::Closed, _) | (_, None) => None,
        (_, Some(heading)) => {
            let back = heading.opposite();
            let start = back.step(seed, dvec2(config.step_x, config.step_y));
            let mut backward = DirectionalTrace::with_heading(
                |p: DVec2| metric.eval(p),
                |c: DVec2, p: DVec2| predicate.keep_going(c, p),
                model,
                config,
                start,
                back,
            );
            Some(drain(&mut backward, sink))
        }
    };
    TraceReport { first, second }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::always;

    fn unit_disk_config() -> TraceConfig {
        TraceConfig::default().with_steps(0.01, 0.01)
    }

    #[test]
    fn initial_heading_prefers_first_minimum() {
        // Every neighbor is equally good, so the first direction wins.
        let cfg = unit_disk_config();
        let mut arm =
            DirectionalTrace::new(|_: DVec2| 0.0, always, Model::KleinDisk, &cfg, DVec2::ZERO);
        assert_eq!(arm.next(), Some(DVec2::ZERO));
        assert_eq!(arm.initial_heading(), Some(Direction::North));
    }

    #[test]
    fn follows_horizontal_line_to_the_rim() {
        let mut arm = DirectionalTrace::new(
            |p: DVec2| p.y,
            always,
            Model::PoincareDisk,
            &unit_disk_config(),
            dvec2(0.0, 0.0),
        );
        let pts: Vec<DVec2> = arm.by_ref().collect();
        assert_eq!(arm.initial_heading(), Some(Direction::East));
        assert_eq!(arm.termination(), Some(Termination::LeftRegion));
        assert!(pts.iter().all(|p| p.y.abs() < 1e-12));
        assert!(pts.last().is_some_and(|p| p.x > 0.98));
    }

    #[test]
    fn predicate_can_stop_an_arm() {
        let mut stop_right = |c: DVec2, _: DVec2| c.x < 0.1;
        let mut arm = DirectionalTrace::new(
            |p: DVec2| p.y,
            &mut stop_right,
            Model::KleinDisk,
            &unit_disk_config(),
            DVec2::ZERO,
        );
        let pts: Vec<DVec2> = arm.by_ref().collect();
        assert_eq!(arm.termination(), Some(Termination::Rejected));
        assert!(pts.iter().all(|p| p.x < 0.1));
    }

    #[test]
    fn zero_step_stalls() {
        let cfg = TraceConfig::default().with_steps(0.0, 0.0);
        let mut arm =
            DirectionalTrace::new(|p: DVec2| p.x, always, Model::KleinDisk, &cfg, DVec2::ZERO);
        assert_eq!(arm.by_ref().count(), 1);
        assert_eq!(arm.termination(), Some(Termination::Stalled));
    }

    #[test]
    fn arm_ends_at_the_rim_without_turning_back() {
        // Undefined outside the disk, like every hyperbolic metric there.
        let metric = |p: DVec2| if p.length_squared() >= 1.0 { f64::NAN } else { p.y - 0.5 * p.x };
        let cfg = unit_disk_config();
        let mut arm = DirectionalTrace::new(metric, always, Model::KleinDisk, &cfg, DVec2::ZERO);
        let pts: Vec<DVec2> = arm.by_ref().collect();
        assert_eq!(arm.termination(), Some(Termination::LeftRegion));
        assert!(pts.windows(2).all(|w| w[1].x > w[0].x - 1e-12));
        assert!(pts.last().is_some_and(|p| p.length() > 0.97));
    }

    #[test]
    fn half_plane_arm_stops_above_the_axis() {
        let viewport = Viewport::new(-1.0, 1.0, 0.0, 2.0);
        let cfg = unit_disk_config().with_viewport(Model::PoincareUhp, viewport);
        // Heads straight down the imaginary axis.
        let metric = |p: DVec2| p.x;
        let mut arm = DirectionalTrace::with_heading(
            metric,
            always,
            Model::PoincareUhp,
            &cfg,
            dvec2(0.0, 1.0),
            Direction::South,
        );
        let pts: Vec<DVec2> = arm.by_ref().collect();
        assert_eq!(arm.termination(), Some(Termination::LeftRegion));
        assert!(pts.iter().all(|p| p.y > 0.0));
    }

    #[test]
    fn tiny_loop_closes_on_revisit() {
        // A loop barely wider than a pixel never gets far from its start.
        let cfg = TraceConfig::default();
        for radius in [0.005, 0.01] {
            let metric = move |p: DVec2| p.length() - radius;
            let mut pts = Vec::new();
            let report = trace_both_branches(
                &metric,
                &mut always,
                Model::KleinDisk,
                &cfg,
                dvec2(0.0, radius),
                &mut |x: f64, y: f64| pts.push(dvec2(x, y)),
            );
            assert_eq!(report.first.termination, Termination::Closed, "radius {radius}");
            assert_eq!(report.second, None);
            assert!(pts.len() < 100, "radius {radius}: {} points", pts.len());
        }
    }

    #[test]
    fn euclidean_circle_closes() {
        let metric = |p: DVec2| p.length() - 0.5;
        let mut pts = Vec::new();
        let report = trace_both_branches(
            &metric,
            &mut always,
            Model::KleinDisk,
            &unit_disk_config(),
            dvec2(0.5, 0.0),
            &mut |x: f64, y: f64| pts.push(dvec2(x, y)),
        );
        assert_eq!(report.first.termination, Termination::Closed);
        assert_eq!(report.second, None);
        assert!(!report.truncated());
        assert!(report.points() > 200 && report.points() < 600);
        assert!(pts.iter().all(|p| (p.length() - 0.5).abs() < 0.01));
    }

    #[test]
    fn open_curve_gets_two_arms() {
        let metric = |p: DVec2| p.y - 0.2;
        let report = trace_both_branches(
            &metric,
            &mut always,
            Model::KleinDisk,
            &unit_disk_config(),
            dvec2(0.0, 0.2),
            &mut |_: f64, _: f64| {},
        );
        let second = report.second.expect("second arm");
        assert_eq!(report.first.termination, Termination::LeftRegion);
        assert_eq!(second.termination, Termination::LeftRegion);
        assert!(report.first.points > 50 && second.points > 50);
    }

    #[test]
    fn step_cap_truncates() {
        // A metric that is flat everywhere inside a huge half-plane viewport
        // keeps the arm walking north until the cap.
        let cfg = TraceConfig::default()
            .with_steps(1.0, 1.0)
            .with_viewport(Model::PoincareUhp, Viewport::new(-1.0, 1.0, 0.0, 1.0e9));
        let start = dvec2(0.0, 1.0);
        let mut arm =
            DirectionalTrace::new(|_: DVec2| 0.0, always, Model::PoincareUhp, &cfg, start);
        let emitted = arm.by_ref().count();
        assert_eq!(arm.termination(), Some(Termination::StepCap));
        assert_eq!(arm.steps(), MAX_TRACE_STEPS);
        assert_eq!(emitted, MAX_TRACE_STEPS + 1);
    }
}
