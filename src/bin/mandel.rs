extern crate clap;
extern crate env_logger;
extern crate image;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use mandelbrot::RenderConfig;
use std::fs::File;
use std::str::FromStr;
use std::time::Instant;

/// Given a string and a separator, returns the two values separated by
/// the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
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
const POSITION: &str = "position";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "iterations";
const SAMPLES: &str = "samples";
const BLOCKS: &str = "blocks";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Parallel supersampled Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x1024")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(POSITION)
                .required(false)
                .long(POSITION)
                .short("p")
                .takes_value(true)
                .default_value("-2.0,-1.2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse viewport origin"))
                .help("Viewport origin on the complex plane"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .required(false)
                .long(HEIGHT)
                .short("H")
                .takes_value(true)
                .default_value("2.5")
                .validator(|s| match f64::from_str(&s) {
                    Ok(h) if h > 0.0 => Ok(()),
                    Ok(_) => Err("Viewport height must be positive".to_string()),
                    Err(_) => Err("Could not parse viewport height".to_string()),
                })
                .help("Height of the viewport on the complex plane"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration bound for the escape-time loop"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .default_value("50")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000,
                        "Could not parse sample count",
                        "Sample count must be between 1 and 10000",
                    )
                })
                .help("Jittered samples per pixel"),
        )
        .arg(
            Arg::with_name(BLOCKS)
                .required(false)
                .long(BLOCKS)
                .short("b")
                .takes_value(true)
                .default_value("64")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        65_536,
                        "Could not parse block count",
                        "Block count must be between 1 and 65536",
                    )
                })
                .help("Number of tiles to split the image into (a perfect square)"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of render workers (default: one per CPU)"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let output = File::create(outfile)?;
    PNGEncoder::new(output).encode(
        pixels,
        bounds.0 as u32,
        bounds.1 as u32,
        ColorType::RGBA(8),
    )?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();

    let size =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let position = parse_pair(matches.value_of(POSITION).unwrap(), ',')
        .expect("Error parsing viewport origin");
    let height =
        f64::from_str(matches.value_of(HEIGHT).unwrap()).expect("Error parsing viewport height");
    let max_iter =
        u32::from_str(matches.value_of(ITERATIONS).unwrap()).expect("Error parsing iteration count");
    let samples =
        u32::from_str(matches.value_of(SAMPLES).unwrap()).expect("Error parsing sample count");
    let blocks =
        usize::from_str(matches.value_of(BLOCKS).unwrap()).expect("Error parsing block count");
    let threads = match matches.value_of(THREADS) {
        Some(s) => usize::from_str(s).expect("Error parsing thread count"),
        None => num_cpus::get(),
    };

    let cfg = RenderConfig::new(
        position.0, position.1, height, size.0, size.1, max_iter, samples, blocks, threads,
    );
    info!("rendering with config: {:?}", cfg);

    let start = Instant::now();
    match mandelbrot::render(&cfg) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(pixels) => {
            info!(
                "finished render in {:?}, writing {} bytes",
                start.elapsed(),
                pixels.len()
            );
            write_image(
                matches.value_of(OUTPUT).unwrap(),
                &pixels,
                (cfg.img_width, cfg.img_height),
            )
            .expect("could not write output image");
        }
    }
}
