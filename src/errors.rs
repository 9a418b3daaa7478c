//! Error types with diagnostics using miette
//!
//! Seed finding and configuration can fail in normal interactive use (a user
//! asks for a geometrically impossible curve), so those failures are values.
//! Broken internal invariants panic instead; see [`crate::invariant!`].

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Seed Errors
// ============================================================================

/// Failures while constructing a point known to lie on a curve
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SeedError {
    #[error("circle does not meet the geodesic (discriminant {discriminant:e})")]
    #[diagnostic(
        code(hypconx::seed::no_intersection),
        help("the curve's defining points are in a configuration with no real solution")
    )]
    NoIntersection { discriminant: f64 },

    #[error("focus lies on the directrix")]
    #[diagnostic(
        code(hypconx::seed::focus_on_line),
        help("a parabola needs its focus off its defining line")
    )]
    FocusOnLine,

    #[error("defining points coincide")]
    #[diagnostic(code(hypconx::seed::coincident_points))]
    CoincidentPoints,

    #[error(
        "nearest-point search did not converge after {iterations} iterations \
         (bracket width {width:e})"
    )]
    #[diagnostic(
        code(hypconx::seed::non_convergence),
        help("loosen `computation_tolerance`")
    )]
    NonConvergence { iterations: usize, width: f64 },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Rejected `TraceConfig` values
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("step sizes must be positive (got {step_x}, {step_y})")]
    #[diagnostic(code(hypconx::config::non_positive_step))]
    NonPositiveStep { step_x: f64, step_y: f64 },

    #[error("{name} must be positive (got {value})")]
    #[diagnostic(code(hypconx::config::non_positive_tolerance))]
    NonPositiveTolerance { name: &'static str, value: f64 },

    #[error("{name} is NaN or infinite")]
    #[diagnostic(code(hypconx::config::non_finite))]
    NonFinite { name: &'static str },

    #[error("viewport for {model} is empty")]
    #[diagnostic(
        code(hypconx::config::empty_viewport),
        help("x_min must be below x_max and y_min below y_max")
    )]
    EmptyViewport { model: crate::Model },
}

// ============================================================================
// Session Errors
// ============================================================================

/// Misuse of a [`crate::Session`]
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("no curve at index {index} (session holds {len})")]
    #[diagnostic(code(hypconx::session::no_such_curve))]
    NoSuchCurve { index: usize, len: usize },
}
