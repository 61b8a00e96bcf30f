// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parallel pipeline.  A generator thread publishes every pixel
//! coordinate of the raster, row by row, onto a rendezvous channel.  A
//! fixed pool of workers pulls coordinates off that channel,
//! super-samples them, and pushes the coloured result onto a second,
//! bounded channel.  A supervisor thread owns the pool; once every
//! worker has drained the coordinates and exited, the supervisor
//! closes the result channel, which ends the stream seen by the
//! consumer.
//!
//! Results arrive in whatever order the workers finish them.  Each
//! one carries its own coordinate, and consumers must place pixels by
//! that coordinate, never by arrival order.

use std::thread;

use crossbeam::channel::{self, Receiver, Sender};
use itertools::iproduct;

use config::{ConfigError, RenderConfig};
use escape::{Colour, Evaluator};
use gradient::Gradient;
use planes::{Pixel, PlaneMapper};
use sampler::SuperSampler;

/// A pixel coordinate together with its computed colour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColouredPixel {
    /// Where the colour goes in the raster.
    pub pixel: Pixel,
    /// The super-sampled colour.
    pub colour: Colour,
}

/// The lazy, single-pass stream of results of one render.  It ends once
/// every pixel of the raster has been delivered exactly once.
///
/// Dropping it early is allowed: the workers and the generator notice
/// the closed channels and wind down on their own.
pub struct Pixels {
    receiver: Receiver<ColouredPixel>,
}

impl Iterator for Pixels {
    type Item = ColouredPixel;

    fn next(&mut self) -> Option<ColouredPixel> {
        self.receiver.recv().ok()
    }
}

/// Validates `config` and, if it holds, starts the pipeline and
/// returns its result stream.  Nothing is spawned for an invalid
/// configuration.
pub fn compute<G>(config: &RenderConfig, gradient: G) -> Result<Pixels, ConfigError>
where
    G: Gradient + Send + Sync + 'static,
{
    config.validate()?;

    let (width, height, workers) = (config.width, config.height, config.workers);
    let mapper = PlaneMapper::new(width, height, config.factor, config.viewport);
    let sampler = SuperSampler::new(mapper, Evaluator::new(config.escape_params(), gradient));

    let (point_tx, point_rx) = channel::bounded::<Pixel>(0);
    let (pixel_tx, pixel_rx) = channel::bounded::<ColouredPixel>(workers);

    debug!(
        "rendering {}x{} at factor {} with {} workers",
        width, height, config.factor, workers
    );

    thread::spawn(move || generate(width, height, point_tx));
    thread::spawn(move || supervise(workers, sampler, point_rx, pixel_tx));

    Ok(Pixels { receiver: pixel_rx })
}

/// Publishes every coordinate of the raster in row-major order.
/// Dropping the sender on return closes the handoff.
fn generate(width: u32, height: u32, points: Sender<Pixel>) {
    for (py, px) in iproduct!(0..height, 0..width) {
        if points.send(Pixel(px, py)).is_err() {
            debug!("generator stopped at ({}, {}): no workers left", px, py);
            return;
        }
    }
    debug!("generator published {} coordinates", width as u64 * height as u64);
}

/// Runs the worker pool to completion, then closes the result stream.
fn supervise<G>(
    workers: usize,
    sampler: SuperSampler<G>,
    points: Receiver<Pixel>,
    pixels: Sender<ColouredPixel>,
) where
    G: Gradient + Sync,
{
    let outcome = crossbeam::scope(|spawner| {
        for id in 0..workers {
            let points = points.clone();
            let pixels = pixels.clone();
            let sampler = &sampler;
            spawner.spawn(move |_| work(id, sampler, points, pixels));
        }
        // Only the workers may hold the handoff open from here on.
        drop(points);
    });

    if outcome.is_err() {
        error!("a worker panicked; the result stream is incomplete");
    }
    drop(pixels);
    debug!("all {} workers finished; result stream closed", workers);
}

fn work<G: Gradient>(
    id: usize,
    sampler: &SuperSampler<G>,
    points: Receiver<Pixel>,
    pixels: Sender<ColouredPixel>,
) {
    let mut done = 0usize;
    for pixel in points.iter() {
        let colour = sampler.sample(pixel);
        if pixels.send(ColouredPixel { pixel, colour }).is_err() {
            debug!("worker {} stopped: result stream dropped", id);
            return;
        }
        done += 1;
    }
    trace!("worker {} finished after {} pixels", id, done);
}
