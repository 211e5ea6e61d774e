//! Bar - aggregates block updates, renders status lines, dispatches clicks
//!
//! A running bar is a set of tasks sharing one cancellation token:
//!
//! ```text
//!   block tasks ──(index, info)──► update loop ──watch──► render loop ──► stdout
//!                                      ▲                       ▲
//!   stdin lines ──► click loop ────────┘ (render_now) ─────────┘
//! ```
//!
//! The update loop is the only writer of the slot vector. Everyone else
//! reads snapshots from the watch channel.

use super::block::Block;
use super::input::ClickLines;
use super::output::Output;
use super::render::render_line;
use anyhow::{Context, Result};
use barfeed_core::{BlockInfo, ClickMessage};
use log::{debug, error, info, trace, warn};
use std::future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Buffered updates per bar before publishers wait
pub const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// New info for the block at `index`
#[derive(Debug, Clone)]
pub struct BlockUpdate {
    pub index: usize,
    pub info: BlockInfo,
    /// Render without waiting for the next tick
    pub render_now: bool,
}

/// Shortest positive refresh interval; blocks with interval 0 don't count
pub fn min_refresh_interval<I>(intervals: I) -> Option<Duration>
where
    I: IntoIterator<Item = u64>,
{
    intervals
        .into_iter()
        .filter(|secs| *secs > 0)
        .min()
        .map(Duration::from_secs)
}

/// An ordered, fixed set of blocks
pub struct Bar {
    blocks: Arc<Vec<Block>>,
}

impl Bar {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks: Arc::new(blocks),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Seconds between two regular renders
    pub fn render_interval(&self) -> Option<Duration> {
        min_refresh_interval(self.blocks.iter().map(|block| block.interval))
    }

    /// Spawn the block schedulers and the three bar loops
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self, output: Output, clicks: ClickLines) -> RunningBar {
        let cancel = CancellationToken::new();
        let seed: Vec<BlockInfo> = self.blocks.iter().map(|block| block.info.clone()).collect();
        let (slots_tx, slots_rx) = watch::channel(seed);
        let (updates_tx, updates_rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
        let render_now = Arc::new(Notify::new());

        info!(
            "Starting bar with {} blocks (render interval: {:?})",
            self.blocks.len(),
            self.render_interval()
        );

        for index in 0..self.blocks.len() {
            let blocks = Arc::clone(&self.blocks);
            let slots = slots_rx.clone();
            let updates = updates_tx.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                blocks[index].run(index, slots, updates, cancel).await;
            });
        }

        let updater = tokio::spawn(apply_updates(
            Arc::clone(&self.blocks),
            updates_rx,
            slots_tx,
            Arc::clone(&render_now),
            cancel.clone(),
        ));
        let renderer = tokio::spawn(render_loop(
            Arc::clone(&self.blocks),
            slots_rx.clone(),
            output,
            render_now,
            cancel.clone(),
        ));
        let clicker = tokio::spawn(click_loop(
            Arc::clone(&self.blocks),
            slots_rx,
            clicks,
            updates_tx,
            cancel.clone(),
        ));

        RunningBar {
            cancel,
            updater,
            renderer,
            clicker,
        }
    }
}

/// Handle to a started bar
pub struct RunningBar {
    cancel: CancellationToken,
    updater: JoinHandle<()>,
    renderer: JoinHandle<()>,
    clicker: JoinHandle<ClickLines>,
}

impl RunningBar {
    /// Stop all loops and hand back the click stream for the next bar.
    ///
    /// Waits for the update, render and click loops so nothing of this bar
    /// writes after it returns. Block tasks are only signalled; they exit at
    /// their next suspension point.
    pub async fn stop(self) -> Result<ClickLines> {
        self.cancel.cancel();
        self.updater.await.context("update loop panicked")?;
        self.renderer.await.context("render loop panicked")?;
        let clicks = self.clicker.await.context("click loop panicked")?;
        debug!("Bar stopped");
        Ok(clicks)
    }
}

async fn apply_updates(
    blocks: Arc<Vec<Block>>,
    mut updates: mpsc::Receiver<BlockUpdate>,
    slots: watch::Sender<Vec<BlockInfo>>,
    render_now: Arc<Notify>,
    cancel: CancellationToken,
) {
    loop {
        let update = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            update = updates.recv() => update,
        };
        let Some(BlockUpdate {
            index,
            info,
            render_now: immediate,
        }) = update
        else {
            break;
        };

        let Some(block) = blocks.get(index) else {
            warn!("Dropping update for unknown block index {}", index);
            continue;
        };
        // modules may hand back fresh info; clicks route by the block's identity
        let info = block.stamp(info);
        let applied = slots.send_if_modified(|slots| match slots.get_mut(index) {
            Some(slot) => {
                *slot = info;
                true
            }
            None => false,
        });
        if !applied {
            warn!("Dropping update for unknown block index {}", index);
            continue;
        }
        trace!("Applied update for block {}", index);
        if immediate {
            render_now.notify_one();
        }
    }
    trace!("Update loop stopped");
}

async fn render_loop(
    blocks: Arc<Vec<Block>>,
    slots: watch::Receiver<Vec<BlockInfo>>,
    output: Output,
    render_now: Arc<Notify>,
    cancel: CancellationToken,
) {
    let interval = min_refresh_interval(blocks.iter().map(|block| block.interval));
    loop {
        let snapshot = slots.borrow().clone();
        let line = render_line(
            blocks
                .iter()
                .map(|block| block.label.as_str())
                .zip(snapshot.iter()),
        );
        if let Err(e) = output.write_line(&line) {
            error!("Failed to write status line: {}", e);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = render_now.notified() => {}
            _ = sleep_or_idle(interval) => {}
        }
    }
    trace!("Render loop stopped");
}

async fn sleep_or_idle(interval: Option<Duration>) {
    match interval {
        Some(interval) => tokio::time::sleep(interval).await,
        None => future::pending::<()>().await,
    }
}

async fn click_loop(
    blocks: Arc<Vec<Block>>,
    slots: watch::Receiver<Vec<BlockInfo>>,
    mut clicks: ClickLines,
    updates: mpsc::Sender<BlockUpdate>,
    cancel: CancellationToken,
) -> ClickLines {
    loop {
        let line = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            line = clicks.recv() => line,
        };
        match line {
            Some(line) => dispatch_click(&blocks, &slots, &updates, &line).await,
            None => {
                debug!("Click stream closed");
                cancel.cancelled().await;
                break;
            }
        }
    }
    trace!("Click loop stopped");
    clicks
}

async fn dispatch_click(
    blocks: &[Block],
    slots: &watch::Receiver<Vec<BlockInfo>>,
    updates: &mpsc::Sender<BlockUpdate>,
    line: &str,
) {
    let click = match ClickMessage::parse_line(line) {
        Ok(Some(click)) => click,
        Ok(None) => return,
        Err(e) => {
            debug!("Ignoring malformed click line {:?}: {}", line, e);
            return;
        }
    };

    let target = {
        let slots = slots.borrow();
        slots
            .iter()
            .position(|info| info.is_identified_by(&click.name, &click.instance))
            .map(|index| (index, slots[index].clone()))
    };
    let Some((index, current)) = target else {
        debug!(
            "No block matches click on {}#{}",
            click.name, click.instance
        );
        return;
    };
    let Some(block) = blocks.get(index) else {
        return;
    };

    debug!("Click {:?} on block {}", click.mouse_button(), index);
    match block.click(&click, current).await {
        Ok(Some(info)) => {
            let update = BlockUpdate {
                index,
                info,
                render_now: true,
            };
            if updates.send(update).await.is_err() {
                debug!("Bar stopped before click result was applied");
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Block {} failed to handle click: {}", index, e),
    }
}
