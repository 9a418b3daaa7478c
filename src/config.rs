//! Caller-supplied tracing parameters.

use crate::defaults;
use crate::errors::ConfigError;
use crate::types::{Model, Viewport};

/// Parameters shared by the seed finder and both tracers.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceConfig {
    /// Grid-scan zero threshold on `|definingFunction|`.
    pub tolerance: f64,
    /// Horizontal grid spacing and pixel width in model units.
    pub step_x: f64,
    /// Vertical grid spacing and pixel height in model units.
    pub step_y: f64,
    /// Precision of the nearest-point search and seed routines.
    pub computation_tolerance: f64,
    /// Visible region per model, indexed by [`Model::index`].
    pub viewports: [Viewport; 3],
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            tolerance: defaults::GRID_TOLERANCE,
            step_x: defaults::STEP,
            step_y: defaults::STEP,
            computation_tolerance: defaults::COMPUTATION_TOLERANCE,
            viewports: [defaults::UHP_VIEWPORT, defaults::DISK_VIEWPORT, defaults::DISK_VIEWPORT],
        }
    }
}

impl TraceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_steps(mut self, step_x: f64, step_y: f64) -> Self {
        self.step_x = step_x;
        self.step_y = step_y;
        self
    }

    pub fn with_computation_tolerance(mut self, tolerance: f64) -> Self {
        self.computation_tolerance = tolerance;
        self
    }

    pub fn with_viewport(mut self, model: Model, viewport: Viewport) -> Self {
        self.viewports[model.index()] = viewport;
        self
    }

    #[inline]
    pub fn viewport(&self, model: Model) -> Viewport {
        self.viewports[model.index()]
    }

    /// Half-plane height used to place seeds on unbounded curves: the
    /// vertical midpoint of the half-plane viewport.
    pub fn reference_y(&self) -> f64 {
        self.viewport(Model::PoincareUhp).mid_y()
    }

    /// Reject NaN, infinite, non-positive or empty settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("tolerance", self.tolerance),
            ("step_x", self.step_x),
            ("step_y", self.step_y),
            ("computation_tolerance", self.computation_tolerance),
        ];
        if let Some(&(name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { name });
        }
        if self.step_x <= 0.0 || self.step_y <= 0.0 {
            return Err(ConfigError::NonPositiveStep { step_x: self.step_x, step_y: self.step_y });
        }
        let tolerances =
            [("tolerance", self.tolerance), ("computation_tolerance", self.computation_tolerance)];
        for (name, value) in tolerances {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveTolerance { name, value });
            }
        }
        for model in Model::ALL {
            let vp = self.viewport(model);
            if !vp.is_finite() {
                return Err(ConfigError::NonFinite { name: "viewport" });
            }
            if vp.is_empty() {
                return Err(ConfigError::EmptyViewport { model });
            }
        }
        Ok(())
    }
}
