// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  A point `c` on the complex plane is
//! iterated through `v = v² + c`, starting from zero, until either the
//! magnitude of `v` passes 2.0 or the iteration budget runs out.  The
//! number of iterations it took to escape, optionally smoothed into a
//! continuous value, picks the colour from a gradient.

use image::{Pixel, Rgba};
use num::Complex;

use gradient::Gradient;

/// One output colour: 8 bits per channel, always fully opaque.
pub type Colour = Rgba<u8>;

/// Default iteration budget; also the top of the gradient range.
pub const ITERATIONS: u32 = 255;
/// Default multiplier from escape time to gradient position.
pub const CONTRAST: f64 = 15.0;
/// With smooth colouring, escapes in the first iterations are ignored;
/// they produce visible artifacts in the gradient.
pub const SMOOTH_SKIP: u32 = 2;

/// The colour of points that never escape.
pub fn sentinel() -> Colour {
    Rgba::from_channels(0, 0, 0, 255)
}

/// Knobs of the escape iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeParams {
    /// Maximum number of iterations per point.
    pub iterations: u32,
    /// Multiplier from escape time to gradient position.
    pub contrast: f64,
    /// An escape only counts once the iteration index exceeds this.
    pub skip: u32,
    /// Continuous rather than banded escape times.
    pub smooth: bool,
}

impl EscapeParams {
    /// Default budget and contrast for the requested colouring mode.
    pub fn new(smooth: bool) -> Self {
        EscapeParams {
            iterations: ITERATIONS,
            contrast: CONTRAST,
            skip: if smooth { SMOOTH_SKIP } else { 0 },
            smooth,
        }
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        EscapeParams::new(false)
    }
}

/// How an orbit left the disc of radius 2.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// Zero-based index of the iteration that escaped.
    pub iteration: u32,
    /// |v| at that iteration.
    pub magnitude: f64,
}

impl Escape {
    /// The position of this escape on the gradient.
    pub fn position(&self, params: &EscapeParams) -> f64 {
        let n = f64::from(self.iteration);
        if params.smooth {
            (n + 1.0 - self.magnitude.ln().ln() / 2.0_f64.ln()) * params.contrast
        } else {
            n * params.contrast
        }
    }
}

/// Iterates `point` and reports when it escapes, if it does so
/// within the budget.
pub fn escape_time(point: Complex<f64>, params: &EscapeParams) -> Option<Escape> {
    let mut v: Complex<f64> = Complex::new(0.0, 0.0);
    for n in 0..params.iterations {
        v = v * v + point;
        let magnitude = v.norm();
        if magnitude > 2.0 && n > params.skip {
            return Some(Escape {
                iteration: n,
                magnitude,
            });
        }
    }
    None
}

/// Colours individual sample points.  Holds no mutable state, so one
/// evaluator can be shared by every worker.
#[derive(Clone, Debug)]
pub struct Evaluator<G> {
    params: EscapeParams,
    gradient: G,
}

impl<G: Gradient> Evaluator<G> {
    /// Binds escape parameters to a palette.
    pub fn new(params: EscapeParams, gradient: G) -> Self {
        Evaluator { params, gradient }
    }

    /// The colour of a single sample point.
    pub fn evaluate(&self, point: Complex<f64>) -> Colour {
        match escape_time(point, &self.params) {
            Some(escape) => {
                let [r, g, b] = self.gradient.colour_at(
                    escape.position(&self.params),
                    0.0,
                    f64::from(self.params.iterations),
                );
                Rgba::from_channels(r, g, b, 255)
            }
            None => sentinel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradient::HotCold;

    #[test]
    fn origin_never_escapes() {
        let params = EscapeParams::new(false);
        assert_eq!(escape_time(Complex::new(0.0, 0.0), &params), None);
        let evaluator = Evaluator::new(params, HotCold);
        assert_eq!(evaluator.evaluate(Complex::new(0.0, 0.0)), sentinel());
    }

    #[test]
    fn period_two_bulb_never_escapes() {
        for smooth in &[false, true] {
            let evaluator = Evaluator::new(EscapeParams::new(*smooth), HotCold);
            assert_eq!(evaluator.evaluate(Complex::new(-1.0, 0.0)), sentinel());
        }
    }

    #[test]
    fn first_iteration_never_counts_as_an_escape() {
        // |c| = 3 is already outside the disc at iteration zero.
        let escape = escape_time(Complex::new(3.0, 0.0), &EscapeParams::new(false)).unwrap();
        assert_eq!(escape.iteration, 1);
        assert_eq!(escape.magnitude, 12.0);
    }

    #[test]
    fn smooth_mode_skips_early_escapes() {
        let params = EscapeParams::new(true);
        let escape = escape_time(Complex::new(3.0, 0.0), &params).unwrap();
        assert!(escape.iteration > SMOOTH_SKIP);
        assert_eq!(escape.iteration, 3);
        assert_eq!(escape.magnitude, 21612.0);
    }

    #[test]
    fn corner_of_default_viewport_escapes_at_once() {
        let escape = escape_time(Complex::new(-2.2, -1.2), &EscapeParams::new(false)).unwrap();
        assert_eq!(escape.iteration, 1);
    }

    #[test]
    fn banded_position_is_a_multiple_of_contrast() {
        let params = EscapeParams::new(false);
        let escape = Escape {
            iteration: 4,
            magnitude: 2.5,
        };
        assert_eq!(escape.position(&params), 60.0);
    }

    #[test]
    fn banded_position_does_not_wrap() {
        let params = EscapeParams::new(false);
        let escape = Escape {
            iteration: 200,
            magnitude: 2.5,
        };
        assert_eq!(escape.position(&params), 3000.0);
    }

    #[test]
    fn smooth_position_is_continuous() {
        let params = EscapeParams::new(true);
        let e = ::std::f64::consts::E;
        // ln(ln(e^e)) = 1, so the estimate sits exactly between bands.
        let escape = Escape {
            iteration: 3,
            magnitude: e.powf(e),
        };
        let expected = (4.0 - 1.0 / 2.0_f64.ln()) * 15.0;
        assert!((escape.position(&params) - expected).abs() < 1e-9);
    }

    #[test]
    fn escaping_points_use_the_gradient() {
        let params = EscapeParams::new(false);
        let evaluator = Evaluator::new(params, |p: f64, lo: f64, hi: f64| {
            [p as u8, lo as u8, hi as u8]
        });
        // Escapes at iteration 1: position 15 on [0, 255).
        assert_eq!(
            evaluator.evaluate(Complex::new(3.0, 0.0)),
            Rgba::from_channels(15, 0, 255, 255)
        );
    }

    #[test]
    fn corner_colour_matches_the_palette() {
        let evaluator = Evaluator::new(EscapeParams::new(false), HotCold);
        let [r, g, b] = HotCold.colour_at(15.0, 0.0, 255.0);
        let colour = evaluator.evaluate(Complex::new(-2.2, -1.2));
        assert_eq!(colour, Rgba::from_channels(r, g, b, 255));
        assert_ne!(colour, sentinel());
    }
}
