//! Frame rendering.
//!
//! Implements the per-frame pipeline:
//! - A fixed pool of worker threads claiming blocks from a [`BlockGrid`]
//! - Jittered multi-sampling per pixel
//! - Gamma correction
//!
//! Workers return finished blocks to the caller, which copies them into the
//! pixel buffer after the pool has joined. Blocks never overlap, so every
//! pixel is written exactly once.

use std::path::Path;
use std::time::Instant;

use lumen_math::{Angle, Color};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bucket::{Block, BlockGrid, BlockOrder, BlockResult, CancelFlag};
use crate::error::{ConfigError, RenderError, RenderResult};
use crate::{gen_f64, integrator, Camera, Scene};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Edge length of a square block in pixels
    pub block_size: u32,
    /// Number of worker threads
    pub threads: usize,
    /// Order in which blocks are claimed
    pub block_order: BlockOrder,
    /// Sky color returned when a ray escapes the scene
    pub background: Color,
    /// Fixed seed for a bit-reproducible frame. Drawn from entropy when unset.
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            samples_per_pixel: 16,
            max_depth: 50,
            block_size: 32,
            threads: rayon::current_num_threads(),
            block_order: BlockOrder::Spiral,
            background: Color::new(0.5, 0.7, 1.0),
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.width == 0, "width"),
            (self.height == 0, "height"),
            (self.samples_per_pixel == 0, "samples_per_pixel"),
            (self.max_depth == 0, "max_depth"),
            (self.block_size == 0, "block_size"),
            (self.threads == 0, "threads"),
        ];
        match checks.into_iter().find(|(bad, _)| *bad) {
            Some((_, name)) => Err(ConfigError::Zero(name)),
            None => Ok(()),
        }
    }
}

/// Receives render progress events. Called from worker threads.
pub trait RenderProgress: Sync {
    /// A frame with `total_blocks` blocks is about to start.
    fn render_started(&self, _total_blocks: usize) {}

    /// `worker` claimed `block`.
    fn block_claimed(&self, _block: &Block, _worker: usize) {}

    /// `worker` finished rendering `block`.
    fn block_finished(&self, _block: &Block, _worker: usize) {}
}

/// Progress sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl RenderProgress for NoProgress {}

/// Render a single pixel with jittered multi-sampling, gamma corrected.
/// Every channel of the result is within [0, 1].
///
/// Each sample swings the pixel's center view angle by up to half a pixel in
/// yaw and pitch.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let pixel_angle = camera.pixel_angle();
    let center = camera.view_angle(f64::from(x) + 0.5, f64::from(y) + 0.5);

    let mut pixel_color = Color::BLACK;
    for _ in 0..config.samples_per_pixel {
        let jitter = Angle::new(
            (gen_f64(rng) - 0.5) * pixel_angle.yaw,
            (gen_f64(rng) - 0.5) * pixel_angle.pitch,
        );
        let ray = camera.ray(center + jitter);
        pixel_color += integrator::trace(&ray, scene, config.max_depth, config.background, rng);
    }

    // Average the samples
    let averaged = pixel_color / f64::from(config.samples_per_pixel);
    debug_assert!(averaged.is_finite(), "pixel ({x}, {y}) is not finite");
    averaged.map(|c| c.max(0.0).sqrt().min(1.0))
}

/// Render the scene to an image buffer using the configured worker pool.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    progress: &dyn RenderProgress,
) -> RenderResult<ImageBuffer> {
    render_with_cancel(camera, scene, config, progress, &CancelFlag::new())
}

/// [`render`] that stops early once `cancel` is raised.
///
/// A cancelled render returns [`RenderError::Cancelled`]; the partial image
/// is dropped.
pub fn render_with_cancel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    progress: &dyn RenderProgress,
    cancel: &CancelFlag,
) -> RenderResult<ImageBuffer> {
    if camera.image_width() != config.width || camera.image_height() != config.height {
        return Err(RenderError::SizeMismatch {
            camera_width: camera.image_width(),
            camera_height: camera.image_height(),
            width: config.width,
            height: config.height,
        });
    }

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} objects / {} lights",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        scene.objects().len(),
        scene.lights().len()
    );

    render_blocks(config, progress, cancel, |x, y, _block, rng| {
        render_pixel(camera, scene, x, y, config, rng)
    })
}

/// Drive `shade` over every pixel of a `config.width` x `config.height`
/// image with a fresh block grid and worker pool.
///
/// `shade` receives absolute pixel coordinates, the block being rendered
/// and that block's random source.
pub fn render_blocks<F>(
    config: &RenderConfig,
    progress: &dyn RenderProgress,
    cancel: &CancelFlag,
    shade: F,
) -> RenderResult<ImageBuffer>
where
    F: Fn(u32, u32, &Block, &mut dyn RngCore) -> Color + Sync,
{
    config.validate()?;

    // Allocate everything up front so exhaustion surfaces before any work starts
    let mut image = ImageBuffer::try_new(config.width, config.height)?;
    let grid = BlockGrid::new(config.width, config.height, config.block_size, config.block_order)
        .with_cancel(cancel.clone());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .thread_name(|i| format!("lumen-worker-{i}"))
        .build()?;

    let base_seed = config.seed.unwrap_or_else(rand::random);
    log::debug!(
        "{} blocks of {}px on {} threads, seed {:#x}",
        grid.len(),
        config.block_size,
        config.threads,
        base_seed
    );

    let start = Instant::now();
    progress.render_started(grid.len());

    let per_worker: Vec<Vec<BlockResult>> = pool.broadcast(|ctx| {
        let worker = ctx.index();
        let mut finished = Vec::new();

        while let Some(block) = grid.claim_next_block() {
            log::trace!("worker {worker} claimed block {}", block.index);
            progress.block_claimed(&block, worker);

            let mut block_rng = StdRng::seed_from_u64(block_seed(base_seed, block.index));
            let rng: &mut dyn RngCore = &mut block_rng;
            let pixels = block
                .pixels()
                .map(|(x, y)| shade(x, y, &block, &mut *rng))
                .collect();

            progress.block_finished(&block, worker);
            finished.push(BlockResult::new(block, pixels));
        }
        finished
    });

    if cancel.is_cancelled() {
        log::info!("Render cancelled after {:?}", start.elapsed());
        return Err(RenderError::Cancelled);
    }

    let mut written = 0;
    for result in per_worker.iter().flatten() {
        image.write_block(result);
        written += 1;
    }
    debug_assert_eq!(written, grid.len(), "every block must be rendered once");

    log::info!("Rendered {} blocks in {:?}", written, start.elapsed());
    Ok(image)
}

/// Seed for a block's random source.
///
/// Tied to the block rather than the worker so a seeded frame does not
/// depend on how blocks were distributed.
fn block_seed(base_seed: u64, block_index: usize) -> u64 {
    base_seed ^ (block_index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Row-major pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Like [`ImageBuffer::new`], reporting allocation failure instead of aborting.
    pub fn try_new(width: u32, height: u32) -> RenderResult<Self> {
        let alloc_error = || RenderError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(alloc_error)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| alloc_error())?;
        pixels.resize(len, Color::BLACK);

        Ok(Self { width, height, pixels })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y). Writes outside the image are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered block into place.
    pub fn write_block(&mut self, result: &BlockResult) {
        for ((x, y), color) in result.block.pixels().zip(&result.pixels) {
            self.set(x, y, *color);
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    /// Save to disk. The format follows the file extension.
    ///
    /// Alpha is dropped so 24-bit formats such as BMP work too.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, _] = self.get(x, y).to_rgba8();
            image::Rgb([r, g, b])
        })
        .save(path)
    }
}
