// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Super-sampling.  Each output pixel is covered by a `factor` by
//! `factor` grid of sample points; the pixel's colour is the average
//! of their colours.

use image::{Pixel as ImagePixel, Rgba};
use itertools::iproduct;
use num::Complex;

use escape::{Colour, Evaluator};
use gradient::Gradient;
use planes::{Pixel, PlaneMapper};

/// Produces one anti-aliased colour per output pixel.
#[derive(Clone, Debug)]
pub struct SuperSampler<G> {
    mapper: PlaneMapper,
    evaluator: Evaluator<G>,
}

impl<G: Gradient> SuperSampler<G> {
    /// Requires the mapping from the raster to the complex plane and the
    /// evaluator used on every sample point.  The mapper's factor must
    /// be at least 1.
    pub fn new(mapper: PlaneMapper, evaluator: Evaluator<G>) -> Self {
        SuperSampler { mapper, evaluator }
    }

    /// The raster/plane mapping in use.
    pub fn mapper(&self) -> &PlaneMapper {
        &self.mapper
    }

    /// The averaged colour of `pixel`.
    pub fn sample(&self, pixel: Pixel) -> Colour {
        self.sample_with(pixel, |point| self.evaluator.evaluate(point))
    }

    /// The averaged colour of `pixel`, with `eval` standing in for the
    /// evaluator.  `eval` is called exactly `factor²` times.
    pub fn sample_with<F>(&self, pixel: Pixel, mut eval: F) -> Colour
    where
        F: FnMut(Complex<f64>) -> Colour,
    {
        // Each axis is mapped once; the grid only combines them.
        let xs = self.mapper.sample_xs(&pixel);
        let ys = self.mapper.sample_ys(&pixel);

        let mut sums = [0u32; 3];
        for (y, x) in iproduct!(ys.iter(), xs.iter()) {
            let colour = eval(Complex::new(*x, *y));
            for (sum, channel) in sums.iter_mut().zip(colour.channels()) {
                *sum += u32::from(*channel);
            }
        }

        let samples = self.mapper.factor * self.mapper.factor;
        Rgba::from_channels(
            (sums[0] / samples) as u8,
            (sums[1] / samples) as u8,
            (sums[2] / samples) as u8,
            255,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape::{sentinel, EscapeParams};
    use itertools::iproduct;
    use gradient::HotCold;
    use planes::Viewport;

    fn sampler(factor: u32, smooth: bool) -> SuperSampler<HotCold> {
        let mapper = PlaneMapper::new(4, 4, factor, Viewport::default());
        SuperSampler::new(mapper, Evaluator::new(EscapeParams::new(smooth), HotCold))
    }

    #[test]
    fn factor_one_is_a_direct_evaluation() {
        for smooth in &[false, true] {
            let sampler = sampler(1, *smooth);
            let evaluator = Evaluator::new(EscapeParams::new(*smooth), HotCold);
            for (x, y) in iproduct!(0..4, 0..4) {
                let pixel = Pixel(x, y);
                let point = sampler.mapper().pixel_to_point(&pixel);
                assert_eq!(sampler.sample(pixel), evaluator.evaluate(point));
            }
        }
    }

    #[test]
    fn factor_two_averages_four_samples() {
        let sampler = sampler(2, false);
        let colours = [[0, 0, 0], [10, 20, 30], [20, 40, 60], [31, 61, 91]];
        let mut calls = 0;
        let colour = sampler.sample_with(Pixel(1, 2), |_| {
            let [r, g, b] = colours[calls];
            calls += 1;
            Rgba::from_channels(r, g, b, 0)
        });
        assert_eq!(calls, 4);
        assert_eq!(colour, Rgba::from_channels(15, 30, 45, 255));
    }

    #[test]
    fn samples_cover_the_pixel_grid() {
        let sampler = sampler(3, false);
        let mut points = vec![];
        sampler.sample_with(Pixel(2, 1), |point| {
            points.push(point);
            sentinel()
        });
        assert_eq!(points.len(), 9);
        let xs = sampler.mapper().sample_xs(&Pixel(2, 1));
        let ys = sampler.mapper().sample_ys(&Pixel(2, 1));
        for (y, x) in iproduct!(ys.iter(), xs.iter()) {
            assert!(points.contains(&Complex::new(*x, *y)));
        }
    }

    #[test]
    fn uniform_samples_average_to_themselves() {
        let sampler = sampler(10, false);
        let colour = sampler.sample_with(Pixel(0, 0), |_| Rgba::from_channels(255, 7, 128, 255));
        assert_eq!(colour, Rgba::from_channels(255, 7, 128, 255));
    }

    #[test]
    fn averages_truncate_in_eight_bits() {
        let sampler = sampler(2, false);
        let reds = [255, 255, 255, 254];
        let mut calls = 0;
        let colour = sampler.sample_with(Pixel(0, 0), |_| {
            calls += 1;
            Rgba::from_channels(reds[calls - 1], 0, 0, 255)
        });
        // 1019 / 4 truncates to 254.
        assert_eq!(colour, Rgba::from_channels(254, 0, 0, 255));
    }

    #[test]
    fn interior_pixel_is_black() {
        // Pixel (2, 2) of a 4x4 render starts at (-0.5, 0) and, with four
        // samples per pixel, stays inside the main cardioid.
        let sampler = sampler(2, false);
        assert_eq!(sampler.sample(Pixel(2, 2)), sentinel());
    }
}
