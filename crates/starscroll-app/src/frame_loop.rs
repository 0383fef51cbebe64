//! Frame loop thread: drives the star field at the display rate.
//!
//! The star field and its raster surface live on the loop thread. Scroll and
//! resize events arrive through an `mpsc` channel and are applied at the
//! next frame boundary; the latest `FrameStats` are stored in shared state
//! for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, warn};
use tiny_skia::Pixmap;

use starscroll_core::constants::FRAME_RATE;
use starscroll_core::types::Viewport;
use starscroll_sim::StarField;

use crate::page::Page;
use crate::raster::PixmapSurface;
use crate::state::{FrameLoopCommand, SharedStats};

/// Nominal duration of one display frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Owner-side handle to a running frame loop.
///
/// Dropping the handle tears the loop down.
pub struct FrameLoopHandle {
    command_tx: Option<mpsc::Sender<FrameLoopCommand>>,
    thread: Option<JoinHandle<()>>,
}

impl FrameLoopHandle {
    /// Forward a scroll event. No-op after teardown.
    pub fn scroll(&self, scroll_y: f64) {
        self.send(FrameLoopCommand::Scroll(scroll_y));
    }

    /// Forward a resize event. No-op after teardown.
    pub fn resize(&self, viewport: Viewport) {
        self.send(FrameLoopCommand::Resize(viewport));
    }

    /// Copy of the latest rendered frame, or `None` if the loop is gone,
    /// has no surface, or does not answer within `timeout`.
    pub fn capture(&self, timeout: Duration) -> Option<Pixmap> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(FrameLoopCommand::Capture(reply_tx));
        reply_rx.recv_timeout(timeout).ok().flatten()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.is_some()
    }

    /// Stop the loop and wait for it to exit. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(tx) = self.command_tx.take() {
            let _ = tx.send(FrameLoopCommand::Shutdown);
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("frame loop thread panicked");
            }
        }
    }

    fn send(&self, command: FrameLoopCommand) {
        if let Some(tx) = &self.command_tx {
            let _ = tx.send(command);
        }
    }
}

impl Drop for FrameLoopHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Spawn the frame loop on a new thread, taking ownership of `field`.
pub fn spawn_frame_loop(
    field: StarField,
    page: Page,
    latest_stats: SharedStats,
) -> std::io::Result<FrameLoopHandle> {
    let (command_tx, command_rx) = mpsc::channel::<FrameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("starscroll-frame-loop".into())
        .spawn(move || {
            run_frame_loop(field, page, command_rx, &latest_stats);
        })?;

    Ok(FrameLoopHandle {
        command_tx: Some(command_tx),
        thread: Some(thread),
    })
}

/// The frame loop. Runs until Shutdown or channel disconnect.
fn run_frame_loop(
    mut field: StarField,
    mut page: Page,
    command_rx: mpsc::Receiver<FrameLoopCommand>,
    latest_stats: &SharedStats,
) {
    let mut surface = PixmapSurface::new(page.viewport);
    let mut next_frame_time = Instant::now();
    debug!("frame loop started");

    'frames: loop {
        // 1. Apply pending events
        loop {
            match command_rx.try_recv() {
                Ok(FrameLoopCommand::Scroll(y)) => {
                    let before = page.scroll_y;
                    let y = page.scroll_to(y);
                    if y != before {
                        field.on_scroll(y);
                    }
                }
                Ok(FrameLoopCommand::Resize(viewport)) => {
                    page.resize(viewport);
                    field.on_resize(viewport);
                    surface = PixmapSurface::new(viewport);
                }
                Ok(FrameLoopCommand::Capture(reply)) => {
                    let _ = reply.send(surface.as_ref().map(|s| s.pixmap().clone()));
                }
                Ok(FrameLoopCommand::Shutdown) => break 'frames,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'frames,
            }
        }

        // 2. Render one frame
        let stats = field.frame(&page.metrics(), surface.as_mut());

        // 3. Publish stats for polling
        if let Ok(mut lock) = latest_stats.lock() {
            *lock = stats;
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind: reset rather than render a burst of frames
            next_frame_time = now;
        }
    }

    field.destroy();
    debug!("frame loop stopped");
}
