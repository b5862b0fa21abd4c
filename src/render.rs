// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parallel render engine.  Tiles fan out to a fixed pool of
//! worker threads over one channel; finished pixels fan back in over a
//! second channel to a single collector that assembles the RGBA
//! buffer.  The channels are the only shared state, so no locks are
//! involved anywhere in a render.

use crossbeam::channel::{self, Receiver, Sender};
use num::Complex;

use color::colorize;
use config::{ConfigError, RenderConfig};
use escape::escape_time;
use sampler::{Sampler, UniformSampler};
use tiles::{partition, Tile};

/// One finished pixel: its coordinates and the supersampled average of
/// its color channels.  Produced exactly once per coordinate by
/// whichever worker drew the enclosing tile.
#[derive(Copy, Clone, Debug)]
pub struct PixelSample {
    /// Column in the output image.
    pub x: usize,
    /// Row in the output image.
    pub y: usize,
    /// Averaged red channel.
    pub r: u8,
    /// Averaged green channel.
    pub g: u8,
    /// Averaged blue channel.
    pub b: u8,
}

/// Renders one frame with the production jitter source.  Returns the
/// flat RGBA buffer, row-major, four bytes per pixel with alpha pinned
/// at 255.
pub fn render(cfg: &RenderConfig) -> Result<Vec<u8>, ConfigError> {
    render_with(cfg, UniformSampler::new)
}

/// Renders one frame, building each worker's jitter source with
/// `make_sampler`.  Handing in [`FixedSampler`](::sampler::FixedSampler)
/// makes the output reproducible bit-for-bit regardless of how the
/// tiles land on the workers.
pub fn render_with<S, F>(cfg: &RenderConfig, make_sampler: F) -> Result<Vec<u8>, ConfigError>
where
    S: Sampler,
    F: Fn() -> S + Sync,
{
    cfg.validate()?;

    let tiles = partition(cfg);
    info!(
        "rendering {}x{} pixels across {} tiles on {} workers",
        cfg.img_width,
        cfg.img_height,
        tiles.len(),
        cfg.num_threads
    );

    let mut pixels = vec![0_u8; cfg.pixel_total * 4];

    // Both queues hold their entire work set, so neither side ever
    // blocks the other.
    let (tile_tx, tile_rx) = channel::bounded::<Tile>(tiles.len());
    let (pixel_tx, pixel_rx) = channel::bounded::<PixelSample>(cfg.pixel_total);

    crossbeam::scope(|spawner| {
        for _ in 0..cfg.num_threads {
            let tile_rx = tile_rx.clone();
            let pixel_tx = pixel_tx.clone();
            let make_sampler = &make_sampler;
            spawner.spawn(move |_| {
                let mut sampler = make_sampler();
                shade_tiles(cfg, &mut sampler, &tile_rx, &pixel_tx);
            });
        }
        // Only the workers' clones may keep the channels open past this
        // point, or the collector below would never see them close.
        drop(tile_rx);
        drop(pixel_tx);

        for tile in tiles {
            tile_tx.send(tile).expect("tile queue closed before all tiles were published");
        }
        drop(tile_tx);

        // Fan-in on the calling thread, concurrent with the workers.
        // The loop ends when the last worker finishes and drops its
        // sender, at which point every pixel has arrived.
        for p in pixel_rx.iter() {
            let idx = (p.y * cfg.img_width + p.x) * 4;
            pixels[idx] = p.r;
            pixels[idx + 1] = p.g;
            pixels[idx + 2] = p.b;
            pixels[idx + 3] = 255;
        }
    })
    .expect("render worker panicked");

    info!("finished pixel collection");
    Ok(pixels)
}

/// One worker's life: pull tiles until the queue is closed and
/// drained, emitting a finished pixel for every coordinate inside each
/// tile.
fn shade_tiles<S: Sampler>(
    cfg: &RenderConfig,
    sampler: &mut S,
    tiles: &Receiver<Tile>,
    out: &Sender<PixelSample>,
) {
    for tile in tiles.iter() {
        for (x, y) in iproduct!(tile.x0..tile.x1, tile.y0..tile.y1) {
            out.send(shade_pixel(cfg, sampler, x, y))
                .expect("pixel queue closed while workers were still running");
        }
    }
}

/// Supersamples one pixel: `samples` independent trials, each jittered
/// inside the pixel on both axes, averaged channel by channel with
/// truncating division.
fn shade_pixel<S: Sampler>(cfg: &RenderConfig, sampler: &mut S, x: usize, y: usize) -> PixelSample {
    let (mut r, mut g, mut b) = (0_u32, 0_u32, 0_u32);
    for _ in 0..cfg.samples {
        let re = cfg.height * cfg.ratio * ((x as f64 + sampler.next()) / cfg.img_width as f64)
            + cfg.pos_x;
        let im = cfg.height * ((y as f64 + sampler.next()) / cfg.img_height as f64) + cfg.pos_y;
        let (magnitude_sq, iterations) = escape_time(Complex::new(re, im), cfg.max_iter);
        let (cr, cg, cb) = colorize(magnitude_sq, iterations);
        r += u32::from(cr);
        g += u32::from(cg);
        b += u32::from(cb);
    }
    PixelSample {
        x,
        y,
        r: (r / cfg.samples) as u8,
        g: (g / cfg.samples) as u8,
        b: (b / cfg.samples) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampler::FixedSampler;

    fn cfg(width: usize, height: usize, threads: usize) -> RenderConfig {
        RenderConfig::new(-2.0, -1.2, 2.5, width, height, 200, 2, 16, threads)
    }

    #[test]
    fn buffer_has_four_bytes_per_pixel_and_opaque_alpha() {
        let cfg = cfg(64, 48, 4);
        let pixels = render(&cfg).unwrap();
        assert_eq!(pixels.len(), 64 * 48 * 4);
        for alpha in pixels.iter().skip(3).step_by(4) {
            assert_eq!(*alpha, 255);
        }
    }

    #[test]
    fn uneven_tile_grids_still_write_every_pixel() {
        // 50x38 over a 4x4 grid leaves remainders on both axes.
        let cfg = cfg(50, 38, 3);
        let pixels = render(&cfg).unwrap();
        assert_eq!(pixels.len(), 50 * 38 * 4);
        for alpha in pixels.iter().skip(3).step_by(4) {
            assert_eq!(*alpha, 255);
        }
    }

    #[test]
    fn fixed_sampler_renders_are_reproducible() {
        let mut cfg = cfg(32, 32, 4);
        cfg.samples = 1;
        let first = render_with(&cfg, || FixedSampler(0.5)).unwrap();
        let second = render_with(&cfg, || FixedSampler(0.5)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn worker_count_does_not_change_the_frame() {
        let lone = render_with(&cfg(40, 30, 1), || FixedSampler(0.5)).unwrap();
        let pool = render_with(&cfg(40, 30, 16), || FixedSampler(0.5)).unwrap();
        assert_eq!(lone, pool);
    }

    #[test]
    fn a_viewport_inside_the_set_is_all_black() {
        // The whole window sits within the main cardioid, so every
        // sample is in-set no matter how it jitters.
        let cfg = RenderConfig::new(-0.1, -0.1, 0.2, 16, 16, 300, 4, 4, 2);
        let pixels = render(&cfg).unwrap();
        for chunk in pixels.chunks(4) {
            assert_eq!(chunk, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn invalid_configs_fail_before_rendering() {
        let mut cfg = cfg(64, 64, 4);
        cfg.num_blocks = 50;
        match render(&cfg) {
            Err(ConfigError::UnevenBlocks(50)) => (),
            other => panic!("expected UnevenBlocks, got {:?}", other),
        }
    }
}
