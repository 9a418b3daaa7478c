//! Curves of hyperbolic geometry in three models of the hyperbolic plane.
//!
//! Points and lines are stored once and converted lazily between the Poincaré
//! upper half plane, the Klein disk and the Poincaré disk. Curves (circles,
//! ellipses and hyperbolas, parabolas, equidistant curves) are zero sets of a
//! defining function built from the hyperbolic distance, and are discretized
//! either by scanning a grid or by walking from an analytically found seed.
//!
//! ```
//! use hypconx::{Circle, Method, Model, Point, Session, TraceConfig};
//!
//! let mut session = Session::new(Model::PoincareDisk, TraceConfig::default());
//! let index = session.add(Circle::new(Point::disk(0.2, 0.1), 0.75));
//! let mut points = Vec::new();
//! let mut sink = |x: f64, y: f64| points.push((x, y));
//! let report = session.draw(index, Method::Directional, &mut sink)?;
//! assert_eq!(report.points, points.len());
//! # Ok::<(), miette::Report>(())
//! ```

pub mod config;
pub mod curve;
pub mod defaults;
pub mod errors;
pub mod log;
mod macros;
pub mod model;
pub mod seed;
pub mod session;
pub mod trace;
pub mod types;

pub use config::TraceConfig;
pub use curve::{Circle, Conic, EquidistantCurve, HypEllipse, ImplicitCurve, Parabola};
pub use errors::{ConfigError, SeedError, SessionError};
pub use model::{Line, Point};
pub use seed::Seeds;
pub use session::{DrawReport, Method, Session};
pub use trace::{
    ContinuePredicate, Direction, DirectionalTrace, GridScan, Metric, PointSink, Termination,
    TraceReport, trace_both_branches,
};
pub use types::{Model, Viewport};
