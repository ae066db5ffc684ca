//! Progress reporting through the `log` facade.

use std::sync::atomic::{AtomicUsize, Ordering};

use lumen_renderer::{Block, RenderProgress};

/// Logs a line every time another tenth of the frame completes.
#[derive(Debug, Default)]
pub struct LogProgress {
    total: AtomicUsize,
    finished: AtomicUsize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks finished so far.
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::Relaxed)
    }
}

impl RenderProgress for LogProgress {
    fn render_started(&self, total_blocks: usize) {
        self.total.store(total_blocks, Ordering::Relaxed);
        self.finished.store(0, Ordering::Relaxed);
    }

    fn block_claimed(&self, block: &Block, worker: usize) {
        log::trace!(
            "worker {worker}: block {} at ({}, {})",
            block.index,
            block.x,
            block.y
        );
    }

    fn block_finished(&self, _block: &Block, _worker: usize) {
        let done = self.finished.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed).max(1);

        // Log when crossing a 10% boundary
        if done * 10 / total != (done - 1) * 10 / total {
            log::info!("{:>3}% ({done}/{total} blocks)", done * 100 / total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_finished_blocks() {
        let progress = LogProgress::new();
        progress.render_started(3);

        let block = Block::new(0, 0, 8, 8, 0);
        for _ in 0..3 {
            progress.block_claimed(&block, 0);
            progress.block_finished(&block, 0);
        }
        assert_eq!(progress.finished(), 3);

        progress.render_started(5);
        assert_eq!(progress.finished(), 0);
    }
}
