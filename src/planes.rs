// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport and PlaneMapper structs, which describe a
//! relationship between a raster on the integral plane with an origin
//! at 0,0, and a rectangle on the complex plane with an arbitrary pair
//! of corners defining the leftlower and rightupper corners of the
//! region being rendered.
use num::Complex;

use config::ConfigError;

/// Describes the x, y of a pixel in the output raster.  Column first,
/// then row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub u32, pub u32);

/// The region of the complex plane mapped onto the output raster,
/// treating the real part of each corner as the x-component and the
/// imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// (xmin, ymin)
    pub leftlower: Complex<f64>,
    /// (xmax, ymax)
    pub rightupper: Complex<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            leftlower: Complex::new(-2.2, -1.2),
            rightupper: Complex::new(1.2, 1.2),
        }
    }
}

impl Viewport {
    /// Constructor.  The left lower corner must be strictly to the left
    /// of and strictly below the right upper corner.
    pub fn new(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Result<Viewport, ConfigError> {
        // Negated comparisons so that NaN bounds are rejected too.
        if !(leftlower.re < rightupper.re) {
            return Err(ConfigError::Viewport(format!(
                "the left lower corner ({}) is not to the left of the right upper corner ({})",
                leftlower, rightupper
            )));
        }
        if !(leftlower.im < rightupper.im) {
            return Err(ConfigError::Viewport(format!(
                "the left lower corner ({}) is not lower than the right upper corner ({})",
                leftlower, rightupper
            )));
        }
        Ok(Viewport {
            leftlower,
            rightupper,
        })
    }

    /// Maps an oversampled column index onto [xmin, xmax).
    #[inline]
    pub fn to_complex_x(&self, index: u64, width: u32, factor: u32) -> f64 {
        let (min, max) = (self.leftlower.re, self.rightupper.re);
        index as f64 / (f64::from(width) * f64::from(factor)) * (max - min) + min
    }

    /// Maps an oversampled row index onto [ymin, ymax).
    #[inline]
    pub fn to_complex_y(&self, index: u64, height: u32, factor: u32) -> f64 {
        let (min, max) = (self.leftlower.im, self.rightupper.im);
        index as f64 / (f64::from(height) * f64::from(factor)) * (max - min) + min
    }
}

/// Binds a viewport to the dimensions of the output raster and a
/// super-sampling factor.  Each output pixel covers a `factor` by
/// `factor` grid of sample points.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Width of the output raster in pixels.
    pub width: u32,
    /// Height of the output raster in pixels.
    pub height: u32,
    /// Sub-samples per pixel along each axis.
    pub factor: u32,
    /// The complex region being rendered.
    pub viewport: Viewport,
}

impl PlaneMapper {
    /// The caller is responsible for having validated the arguments:
    /// a zero width, height or factor makes every mapping divide by
    /// zero.
    pub fn new(width: u32, height: u32, factor: u32, viewport: Viewport) -> PlaneMapper {
        PlaneMapper {
            width,
            height,
            factor,
            viewport,
        }
    }

    // Widened so that large rasters at high factors cannot overflow.
    fn oversampled(&self, coordinate: u32, offset: u32) -> u64 {
        u64::from(coordinate) * u64::from(self.factor) + u64::from(offset)
    }

    /// The real parts of the sample points covering a pixel column.
    pub fn sample_xs(&self, pixel: &Pixel) -> Vec<f64> {
        (0..self.factor)
            .map(|i| {
                self.viewport
                    .to_complex_x(self.oversampled(pixel.0, i), self.width, self.factor)
            })
            .collect()
    }

    /// The imaginary parts of the sample points covering a pixel row.
    pub fn sample_ys(&self, pixel: &Pixel) -> Vec<f64> {
        (0..self.factor)
            .map(|i| {
                self.viewport
                    .to_complex_y(self.oversampled(pixel.1, i), self.height, self.factor)
            })
            .collect()
    }

    /// The first sample point of a pixel, i.e. its upper-left corner
    /// on the complex plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.viewport
                .to_complex_x(self.oversampled(pixel.0, 0), self.width, self.factor),
            self.viewport
                .to_complex_y(self.oversampled(pixel.1, 0), self.height, self.factor),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_fails_on_bad_shape() {
        let vp = Viewport::new(Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(vp.is_err());
        let vp = Viewport::new(Complex::new(1.0, -1.0), Complex::new(-1.0, 1.0));
        assert!(vp.is_err());
    }

    #[test]
    fn viewport_fails_on_degenerate_and_nan_shape() {
        let vp = Viewport::new(Complex::new(0.0, -1.0), Complex::new(0.0, 1.0));
        assert!(vp.is_err());
        let vp = Viewport::new(Complex::new(::std::f64::NAN, -1.0), Complex::new(1.0, 1.0));
        assert!(vp.is_err());
    }

    #[test]
    fn viewport_passes_on_good_shape() {
        let vp = Viewport::new(Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(vp.is_ok());
    }

    #[test]
    fn index_zero_maps_to_minimum_exactly() {
        let vp = Viewport::default();
        assert_eq!(vp.to_complex_x(0, 1536, 3), -2.2);
        assert_eq!(vp.to_complex_y(0, 1024, 3), -1.2);
    }

    #[test]
    fn index_maps_linearly() {
        let vp = Viewport::new(Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(vp.to_complex_x(2, 4, 1), 0.0);
        assert_eq!(vp.to_complex_x(4, 4, 1), 2.0);
        assert_eq!(vp.to_complex_y(1, 4, 2), -1.5);
        assert_eq!(vp.to_complex_y(8, 4, 2), 2.0);
    }

    #[test]
    fn sample_grid_covers_the_pixel() {
        let vp = Viewport::new(Complex::new(0.0, 0.0), Complex::new(4.0, 4.0)).unwrap();
        let pm = PlaneMapper::new(4, 4, 2, vp);
        assert_eq!(pm.sample_xs(&Pixel(1, 3)), vec![1.0, 1.5]);
        assert_eq!(pm.sample_ys(&Pixel(1, 3)), vec![3.0, 3.5]);
        assert_eq!(pm.pixel_to_point(&Pixel(1, 3)), Complex::new(1.0, 3.0));
    }

    #[test]
    fn huge_rasters_do_not_overflow_the_index() {
        let vp = Viewport::default();
        let pm = PlaneMapper::new(::std::u32::MAX, ::std::u32::MAX, 10, vp);
        let last = Pixel(::std::u32::MAX - 1, ::std::u32::MAX - 1);
        let xs = pm.sample_xs(&last);
        let ys = pm.sample_ys(&last);
        assert_eq!(xs.len(), 10);
        for x in xs {
            assert!(x > vp.leftlower.re && x < vp.rightupper.re);
        }
        for y in ys {
            assert!(y > vp.leftlower.im && y < vp.rightupper.im);
        }
    }
}
