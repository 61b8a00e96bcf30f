// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The output raster.  It's owned by whoever drains the pipeline;
//! workers never see it.

use std::io::Write;

use image::png::PNGEncoder;
use image::{ColorType, RgbaImage};

use escape::Colour;
use pipeline::ColouredPixel;

/// An RGBA image filled in from a stream of coloured pixels.
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// A fully transparent raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Raster {
            image: RgbaImage::new(width, height),
        }
    }

    /// Places one result by its own coordinate.
    pub fn plot(&mut self, pixel: &ColouredPixel) {
        self.image.put_pixel(pixel.pixel.0, pixel.pixel.1, pixel.colour);
    }

    /// Drains a result stream into the raster, in whatever order it
    /// arrives.  Returns the number of pixels placed.
    pub fn assemble<I>(&mut self, pixels: I) -> usize
    where
        I: IntoIterator<Item = ColouredPixel>,
    {
        let mut placed = 0;
        for pixel in pixels {
            self.plot(&pixel);
            placed += 1;
        }
        placed
    }

    /// The colour at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Colour {
        *self.image.get_pixel(x, y)
    }

    /// Encodes the raster as an 8-bit RGBA PNG.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<(), ::std::io::Error> {
        PNGEncoder::new(writer).encode(
            &self.image,
            self.image.width(),
            self.image.height(),
            ColorType::RGBA(8),
        )
    }
}
