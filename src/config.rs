//! Describes a single render request.  A `RenderConfig` is built once,
//! validated once, and then owned by exactly one call to the engine;
//! nothing here is shared or mutated while a render is in flight.

/// Everything the engine needs to know to produce one frame.
///
/// `pos_x`/`pos_y` anchor the viewport on the real plane, `height` is
/// the viewport's extent along the imaginary axis, and the real extent
/// follows from the image's aspect ratio.  `ratio` and `pixel_total`
/// are derived at construction and never recomputed.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Real-axis coordinate of the viewport origin.
    pub pos_x: f64,
    /// Imaginary-axis coordinate of the viewport origin.
    pub pos_y: f64,
    /// Height of the viewport on the complex plane.  Must be positive.
    pub height: f64,
    /// Output image width in pixels.
    pub img_width: usize,
    /// Output image height in pixels.
    pub img_height: usize,
    /// Number of pixels in the frame, `img_width * img_height`.
    pub pixel_total: usize,
    /// Iteration bound for the escape-time loop.
    pub max_iter: u32,
    /// Jittered samples taken per pixel.
    pub samples: u32,
    /// Number of tiles to carve the image into.  The default
    /// partitioner lays tiles out on a square grid, so this must be a
    /// perfect square.
    pub num_blocks: usize,
    /// Number of worker threads in the render pool.
    pub num_threads: usize,
    /// Aspect ratio of the image, `img_width / img_height`.
    pub ratio: f64,
}

/// The one kind of failure the engine knows: a request that was
/// malformed before any work started.  Anything that passes
/// [`RenderConfig::validate`] renders to completion.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// Image width or height of zero.
    #[fail(display = "image dimensions must be positive, got {}x{}", _0, _1)]
    EmptyImage(usize, usize),
    /// Viewport with no extent on the imaginary axis.
    #[fail(display = "viewport height must be positive, got {}", _0)]
    FlatViewport(f64),
    /// Sample count of zero.
    #[fail(display = "sample count per pixel must be positive")]
    NoSamples,
    /// Worker count of zero.
    #[fail(display = "worker thread count must be positive")]
    NoWorkers,
    /// Block count of zero, or one the square grid cannot express.
    #[fail(display = "block count must be a positive perfect square, got {}", _0)]
    UnevenBlocks(usize),
}

impl RenderConfig {
    /// Assembles a config, computing the derived `ratio` and
    /// `pixel_total` fields.  Validation is separate; see
    /// [`RenderConfig::validate`].
    pub fn new(
        pos_x: f64,
        pos_y: f64,
        height: f64,
        img_width: usize,
        img_height: usize,
        max_iter: u32,
        samples: u32,
        num_blocks: usize,
        num_threads: usize,
    ) -> RenderConfig {
        RenderConfig {
            pos_x,
            pos_y,
            height,
            img_width,
            img_height,
            pixel_total: img_width * img_height,
            max_iter,
            samples,
            num_blocks,
            num_threads,
            ratio: (img_width as f64) / (img_height as f64),
        }
    }

    /// Checks every precondition the engine relies on.  Runs before a
    /// single thread is spawned; a config that passes cannot fail
    /// mid-render.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.img_width == 0 || self.img_height == 0 {
            return Err(ConfigError::EmptyImage(self.img_width, self.img_height));
        }
        if self.height <= 0.0 {
            return Err(ConfigError::FlatViewport(self.height));
        }
        if self.samples == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.num_threads == 0 {
            return Err(ConfigError::NoWorkers);
        }
        let side = self.grid_side();
        if self.num_blocks == 0 || side * side != self.num_blocks {
            return Err(ConfigError::UnevenBlocks(self.num_blocks));
        }
        Ok(())
    }

    /// Side length of the tile grid, `sqrt(num_blocks)`.
    pub fn grid_side(&self) -> usize {
        (self.num_blocks as f64).sqrt().round() as usize
    }
}
