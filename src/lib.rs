#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which the orbit of zero under `v = v² + c` stays bounded.  Points
//! outside the set escape to infinity, some quickly and some slowly,
//! and the number of iterations it takes them to leave a disc of
//! radius 2 is what gives the picture its colour.
//!
//! Every output pixel is rendered independently, which makes this an
//! embarrassingly parallel problem.  The renderer fans the raster's
//! coordinates out to a fixed pool of worker threads, each of which
//! super-samples its pixel (averaging a small grid of points to soften
//! aliased edges), and fans the coloured pixels back in as a single
//! stream.  That stream is unordered: every result carries its own
//! coordinate, and the [`Raster`](raster/struct.Raster.html) places
//! pixels by it.

extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate num;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod config;
pub mod escape;
pub mod gradient;
pub mod pipeline;
pub mod planes;
pub mod raster;
pub mod sampler;

pub use config::{ConfigError, RenderConfig};
pub use escape::{Colour, EscapeParams, Evaluator};
pub use gradient::{Gradient, HotCold};
pub use pipeline::{compute, ColouredPixel, Pixels};
pub use planes::{Pixel, PlaneMapper, Viewport};
pub use raster::Raster;
pub use sampler::SuperSampler;
