//! Exhaustive grid sampling ("longway" method).

use glam::{DVec2, dvec2};

use super::Metric;
use crate::config::TraceConfig;
use crate::errors::ConfigError;
use crate::types::{Model, Viewport};

/// Lazily scans a grid and yields every sample where `|metric| < tolerance`.
///
/// Columns run left to right in `step_x` increments; each column is scanned
/// bottom to top in `step_y` increments. In the half plane the grid covers the
/// viewport rectangle. In the disk models it covers only the unit disk, with
/// each column spanning `±sqrt(1 - x²)`.
pub struct GridScan<M> {
    metric: M,
    model: Model,
    tolerance: f64,
    step: DVec2,
    bounds: Viewport,
    column: usize,
    row: usize,
    finished: bool,
}

impl<M: Metric> GridScan<M> {
    /// Fails on a config that [`TraceConfig::validate`] rejects, since a
    /// zero or NaN step would never finish the scan.
    pub fn new(metric: M, model: Model, config: &TraceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = if model.is_disk() { Viewport::UNIT_SQUARE } else { config.viewport(model) };
        Ok(GridScan {
            metric,
            model,
            tolerance: config.tolerance,
            step: dvec2(config.step_x, config.step_y),
            bounds,
            column: 0,
            row: 0,
            finished: false,
        })
    }

    /// Start over from the first grid cell.
    pub fn restart(&mut self) {
        self.column = 0;
        self.row = 0;
        self.finished = false;
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Vertical extent of the column at `x`.
    fn column_span(&self, x: f64) -> (f64, f64) {
        if self.model.is_disk() {
            let h = (1.0 - x * x).max(0.0).sqrt();
            (-h, h)
        } else {
            (self.bounds.y_min, self.bounds.y_max)
        }
    }
}

impl<M: Metric> Iterator for GridScan<M> {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        while !self.finished {
            let x = self.bounds.x_min + self.column as f64 * self.step.x;
            if x > self.bounds.x_max {
                self.finished = true;
                break;
            }
            let (y_min, y_max) = self.column_span(x);
            let y = y_min + self.row as f64 * self.step.y;
            if y > y_max {
                self.column += 1;
                self.row = 0;
                continue;
            }
            self.row += 1;

            let p = dvec2(x, y);
            if self.metric.eval(p).abs() < self.tolerance {
                return Some(p);
            }
        }
        None
    }
}
