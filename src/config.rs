// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run configuration.  Everything the pipeline needs is fixed before
//! it starts, and checked here; the pipeline itself assumes a valid
//! configuration.

use escape::{EscapeParams, CONTRAST, ITERATIONS};
use planes::Viewport;

/// Largest accepted super-sampling factor.
pub const MAX_FACTOR: u32 = 10;
/// Largest accepted worker pool.
pub const MAX_WORKERS: usize = 512;

/// A configuration the pipeline refuses to start with.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// Width or height is zero.
    #[fail(display = "image dimensions must be positive, got {}x{}", _0, _1)]
    EmptyRaster(u32, u32),
    /// Super-sampling factor out of range.
    #[fail(display = "sampling factor {} is outside [1, 10]", _0)]
    Factor(u32),
    /// Worker count out of range.
    #[fail(display = "worker count {} is outside [1, 512]", _0)]
    Workers(usize),
    /// Iteration budget of zero.
    #[fail(display = "iteration budget must be positive")]
    Iterations,
    /// Misshapen complex region.
    #[fail(display = "invalid viewport: {}", _0)]
    Viewport(String),
}

/// Parameters of a single render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Sub-samples per pixel along each axis.
    pub factor: u32,
    /// Size of the worker pool.
    pub workers: usize,
    /// Smooth (continuous) colouring instead of banded colouring.
    pub smooth: bool,
    /// The region of the complex plane to render.
    pub viewport: Viewport,
    /// Iteration budget per sample point.
    pub iterations: u32,
    /// Multiplier from escape time to gradient position.
    pub contrast: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1536,
            height: 1024,
            factor: 2,
            workers: 2,
            smooth: false,
            viewport: Viewport::default(),
            iterations: ITERATIONS,
            contrast: CONTRAST,
        }
    }
}

impl RenderConfig {
    /// Checks every bound the pipeline relies upon.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyRaster(self.width, self.height));
        }
        if self.factor < 1 || self.factor > MAX_FACTOR {
            return Err(ConfigError::Factor(self.factor));
        }
        if self.workers < 1 || self.workers > MAX_WORKERS {
            return Err(ConfigError::Workers(self.workers));
        }
        if self.iterations == 0 {
            return Err(ConfigError::Iterations);
        }
        Viewport::new(self.viewport.leftlower, self.viewport.rightupper)?;
        Ok(())
    }

    /// The escape parameters implied by this configuration.
    pub fn escape_params(&self) -> EscapeParams {
        EscapeParams {
            iterations: self.iterations,
            contrast: self.contrast,
            ..EscapeParams::new(self.smooth)
        }
    }
}
