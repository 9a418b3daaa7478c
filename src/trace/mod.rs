//! Curve discretization.
//!
//! Two complementary tracers turn a defining function into points:
//! - [`GridScan`] samples the whole visible region and keeps near-zero points.
//!   It always works, at a cost proportional to the area.
//! - [`DirectionalTrace`] walks from a seed point along the curve one pixel at
//!   a time, choosing among compass directions.

mod directional;
mod grid;

pub use directional::{ArmReport, DirectionalTrace, TraceReport, TraceState, trace_both_branches};
pub use grid::GridScan;

use std::fmt;

use glam::{DVec2, IVec2, ivec2};

/// An implicit-curve evaluator over model coordinates.
pub trait Metric {
    fn eval(&self, p: DVec2) -> f64;
}

impl<F: Fn(DVec2) -> f64> Metric for F {
    fn eval(&self, p: DVec2) -> f64 {
        self(p)
    }
}

/// Receives every emitted curve point.
pub trait PointSink {
    fn point(&mut self, x: f64, y: f64);
}

impl<F: FnMut(f64, f64)> PointSink for F {
    fn point(&mut self, x: f64, y: f64) {
        self(x, y)
    }
}

/// Extra stop condition for the directional tracer.
///
/// Called with the candidate next point and the point before it; returning
/// `false` ends the arm with [`Termination::Rejected`].
pub trait ContinuePredicate {
    fn keep_going(&mut self, current: DVec2, previous: DVec2) -> bool;
}

impl<F: FnMut(DVec2, DVec2) -> bool> ContinuePredicate for F {
    fn keep_going(&mut self, current: DVec2, previous: DVec2) -> bool {
        self(current, previous)
    }
}

/// A predicate that never stops a trace.
pub fn always(_current: DVec2, _previous: DVec2) -> bool {
    true
}

/// Why an arm of a directional trace stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The next step could leave the visible region.
    LeftRegion,
    /// Consecutive points coincided.
    Stalled,
    /// The walk came back to its start or to a pixel it already visited.
    Closed,
    /// [`crate::defaults::MAX_TRACE_STEPS`] was reached; the arm is truncated.
    StepCap,
    /// The caller's [`ContinuePredicate`] said stop.
    Rejected,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::LeftRegion => "left region",
            Termination::Stalled => "stalled",
            Termination::Closed => "closed",
            Termination::StepCap => "step cap",
            Termination::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Compass headings for the directional tracer, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Evaluation order for the initial heading.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(i: usize) -> Self {
        Self::ALL[i % 8]
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The heading 45° clockwise.
    pub fn clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The heading 45° counter-clockwise.
    pub fn counter_clockwise(self) -> Self {
        Self::from_index(self.index() + 7)
    }

    /// Headings considered after moving in `self`: straight on, then 45°
    /// counter-clockwise, then 45° clockwise.
    pub fn candidates(self) -> [Direction; 3] {
        [self, self.counter_clockwise(), self.clockwise()]
    }

    /// Grid displacement in whole pixels (y up).
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => ivec2(0, 1),
            Direction::NorthEast => ivec2(1, 1),
            Direction::East => ivec2(1, 0),
            Direction::SouthEast => ivec2(1, -1),
            Direction::South => ivec2(0, -1),
            Direction::SouthWest => ivec2(-1, -1),
            Direction::West => ivec2(-1, 0),
            Direction::NorthWest => ivec2(-1, 1),
        }
    }

    /// Unit grid displacement (y up).
    pub fn unit(self) -> DVec2 {
        self.offset().as_dvec2()
    }

    /// `p` moved one pixel of size `step` in this direction.
    #[inline]
    pub fn step(self, p: DVec2, step: DVec2) -> DVec2 {
        p + self.unit() * step
    }
}

/// Index of the smallest of three candidate values.
///
/// Ties prefer candidate 0, then candidate 2, then candidate 1.
pub fn min_of_three(v: [f64; 3]) -> usize {
    if v[0] <= v[1] && v[0] <= v[2] {
        0
    } else if v[2] <= v[1] {
        2
    } else {
        1
    }
}
