//! Bucket-based tile scheduling.
//!
//! The image is divided into blocks (buckets) that tile it exactly once,
//! with edge blocks clipped at the right and bottom borders. Workers claim
//! blocks one at a time from a shared [`BlockGrid`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lumen_math::Color;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// X coordinate of block's top-left corner
    pub x: u32,
    /// Y coordinate of block's top-left corner
    pub y: u32,
    /// Width of the block in pixels
    pub width: u32,
    /// Height of the block in pixels
    pub height: u32,
    /// Index of this block in claim order
    pub index: usize,
}

impl Block {
    /// Create a new block.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this block.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Iterate over the absolute pixel coordinates of this block, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let (x0, y0, w, h) = (self.x, self.y, self.width, self.height);
        (y0..y0 + h).flat_map(move |y| (x0..x0 + w).map(move |x| (x, y)))
    }
}

/// Order in which blocks are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockOrder {
    /// Row-major, top-left first.
    Scanline,
    /// Center of the image first, then outwards.
    #[default]
    Spiral,
}

/// Generate blocks covering a `width` x `height` image.
pub fn generate_blocks(width: u32, height: u32, block_size: u32, order: BlockOrder) -> Vec<Block> {
    let mut blocks = Vec::new();
    if block_size == 0 {
        return blocks;
    }

    let mut index = 0;
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = block_size.min(width - x);
            let bh = block_size.min(height - y);
            blocks.push(Block::new(x, y, bw, bh, index));
            index += 1;
            x += block_size;
        }
        y += block_size;
    }

    if order == BlockOrder::Spiral {
        sort_spiral(&mut blocks, width, height);
        for (i, block) in blocks.iter_mut().enumerate() {
            block.index = i;
        }
    }

    blocks
}

/// Sort blocks by distance from image center.
fn sort_spiral(blocks: &mut [Block], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let dist = |b: &Block| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps scanline order between equidistant blocks
    blocks.sort_by(|a, b| dist(a).total_cmp(&dist(b)));
}

/// Shared cooperative cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask workers to stop after their current block.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Blocks of one frame plus their claim state.
///
/// Scoped to a single render: build a fresh grid per frame.
#[derive(Debug)]
pub struct BlockGrid {
    blocks: Vec<Block>,
    claimed: Mutex<Vec<bool>>,
    cancel: CancelFlag,
}

impl BlockGrid {
    pub fn new(width: u32, height: u32, block_size: u32, order: BlockOrder) -> Self {
        let blocks = generate_blocks(width, height, block_size, order);
        let claimed = Mutex::new(vec![false; blocks.len()]);
        Self {
            blocks,
            claimed,
            cancel: CancelFlag::new(),
        }
    }

    /// Use an externally owned cancel flag.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Stop handing out blocks. Blocks already claimed still finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Claim the first unclaimed block.
    ///
    /// Returns `None` once every block is taken or the grid was cancelled.
    pub fn claim_next_block(&self) -> Option<Block> {
        if self.cancel.is_cancelled() {
            return None;
        }

        let mut claimed = self.claimed.lock();
        let index = claimed.iter().position(|taken| !taken)?;
        claimed[index] = true;
        Some(self.blocks[index])
    }

    /// Number of blocks claimed so far.
    pub fn claimed_count(&self) -> usize {
        self.claimed.lock().iter().filter(|taken| **taken).count()
    }
}

/// Result of rendering a block.
#[derive(Debug, Clone)]
pub struct BlockResult {
    /// The block that was rendered
    pub block: Block,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BlockResult {
    /// Create a new block result.
    pub fn new(block: Block, pixels: Vec<Color>) -> Self {
        Self { block, pixels }
    }
}
