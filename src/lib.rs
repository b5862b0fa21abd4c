#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set takes a point on the complex plane and repeatedly
//! multiplies it by itself, measuring how quickly that number goes to
//! infinity.  This "velocity" is the number used to render the image:
//! points that never leave the set are painted black, and points that
//! escape are painted with a hue derived from how fast they left.
//!
//! Rendering a full frame is embarrassingly parallel, so the engine
//! carves the image into a grid of rectangular tiles, feeds the tiles
//! to a fixed pool of worker threads over a channel, and collects one
//! finished pixel per coordinate back over a second channel.  Each
//! pixel is supersampled: several randomly jittered points inside the
//! pixel are iterated and the resulting colors averaged, which smooths
//! the aliasing along the set's boundary.

extern crate crossbeam;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rand;

pub mod color;
pub mod config;
pub mod escape;
pub mod params;
pub mod render;
pub mod sampler;
pub mod tiles;

pub use config::{ConfigError, RenderConfig};
pub use render::{render, render_with, PixelSample};
pub use sampler::{FixedSampler, Sampler, UniformSampler};
