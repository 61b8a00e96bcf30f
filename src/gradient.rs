// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colour gradients.  The escape evaluator only needs a way to turn a
//! scalar position inside a range into an RGB triple; it doesn't care
//! which palette produced it.

/// Maps a position within `[range_min, range_max]` onto an RGB triple.
/// Implementations must be pure: the same arguments always produce the
/// same colour, from any thread.
pub trait Gradient {
    /// The colour for `position`.
    fn colour_at(&self, position: f64, range_min: f64, range_max: f64) -> [u8; 3];
}

impl<F> Gradient for F
where
    F: Fn(f64, f64, f64) -> [u8; 3],
{
    fn colour_at(&self, position: f64, range_min: f64, range_max: f64) -> [u8; 3] {
        self(position, range_min, range_max)
    }
}

/// The classic "hot to cold" colour ramp: blue at the bottom of the
/// range, through cyan, green and yellow, to red at the top.
#[derive(Copy, Clone, Debug, Default)]
pub struct HotCold;

impl HotCold {
    /// The ramp as unit-interval channel intensities.
    pub fn intensities(position: f64, range_min: f64, range_max: f64) -> (f64, f64, f64) {
        let (mut r, mut g, mut b) = (1.0, 1.0, 1.0);
        let v = position.max(range_min).min(range_max);
        let dv = range_max - range_min;

        if v < range_min + 0.25 * dv {
            r = 0.0;
            g = 4.0 * (v - range_min) / dv;
        } else if v < range_min + 0.5 * dv {
            r = 0.0;
            b = 1.0 + 4.0 * (range_min + 0.25 * dv - v) / dv;
        } else if v < range_min + 0.75 * dv {
            r = 4.0 * (v - range_min - 0.5 * dv) / dv;
            b = 0.0;
        } else {
            g = 1.0 + 4.0 * (range_min + 0.75 * dv - v) / dv;
            b = 0.0;
        }
        (r, g, b)
    }
}

impl Gradient for HotCold {
    fn colour_at(&self, position: f64, range_min: f64, range_max: f64) -> [u8; 3] {
        let (r, g, b) = HotCold::intensities(position, range_min, range_max);
        [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
    }
}
