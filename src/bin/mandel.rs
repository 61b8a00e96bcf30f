// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use mandelbrot::config::{MAX_FACTOR, MAX_WORKERS};
use mandelbrot::{HotCold, Raster, RenderConfig, Viewport};
use num::Complex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const FACTOR: &str = "factor";
const WORKERS: &str = "workers";
const SMOOTH: &str = "smooth";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const ITERATIONS: &str = "iterations";

fn args<'a>(default_workers: &'a str) -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Super-sampled Mandelbrot renderer; writes a PNG")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("-")
                .help("Output file, or - for standard output"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1536x1024")
                .validator(|s| validate_pair::<u32>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, WxH"),
        )
        .arg(
            Arg::with_name(FACTOR)
                .required(false)
                .long(FACTOR)
                .short("f")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_FACTOR,
                        "Could not parse sampling factor",
                        &format!("Sampling factor must be between 1 and {}", MAX_FACTOR),
                    )
                })
                .help("Super-sampling factor per axis"),
        )
        .arg(
            Arg::with_name(WORKERS)
                .required(false)
                .long(WORKERS)
                .short("w")
                .takes_value(true)
                .default_value(default_workers)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_WORKERS,
                        "Could not parse worker count",
                        &format!("Worker count must be between 1 and {}", MAX_WORKERS),
                    )
                })
                .help("Number of worker threads"),
        )
        .arg(
            Arg::with_name(SMOOTH)
                .long(SMOOTH)
                .help("Smooth colour transitions instead of bands"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.2,-1.2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.2,1.2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("255")
                .validator(|s| {
                    validate_range(
                        &s,
                        1u32,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 100000",
                    )
                })
                .help("Iteration budget per sample point"),
        )
        .get_matches()
}

// Validators have already run, so these only fail on a missing value.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| failure::err_msg(format!("could not read --{}", name)))
}

fn corner(matches: &ArgMatches, name: &str) -> Result<Complex<f64>, Error> {
    matches
        .value_of(name)
        .and_then(parse_complex)
        .ok_or_else(|| failure::err_msg(format!("could not read --{}", name)))
}

fn configure(matches: &ArgMatches) -> Result<RenderConfig, Error> {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<u32>(s, 'x'))
        .ok_or_else(|| failure::err_msg("could not read --size"))?;
    let viewport = Viewport::new(corner(matches, LEFTLOWER)?, corner(matches, RIGHTUPPER)?)?;
    let config = RenderConfig {
        width,
        height,
        factor: value(matches, FACTOR)?,
        workers: value(matches, WORKERS)?,
        smooth: matches.is_present(SMOOTH),
        viewport,
        iterations: value(matches, ITERATIONS)?,
        ..RenderConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = configure(matches)?;
    info!(
        "rendering {}x{}, factor {}, {} workers, smooth: {}",
        config.width, config.height, config.factor, config.workers, config.smooth
    );

    let mut raster = Raster::new(config.width, config.height);
    let placed = raster.assemble(mandelbrot::compute(&config, HotCold)?);
    debug!("assembled {} pixels", placed);

    match matches.value_of(OUTPUT) {
        None | Some("-") => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            raster.write_png(&mut out)?;
            out.flush()?;
        }
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            raster.write_png(&mut out)?;
            out.flush()?;
            info!("wrote {}", path);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let default_workers = num_cpus::get().min(MAX_WORKERS).to_string();
    let matches = args(&default_workers);
    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        for cause in e.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
