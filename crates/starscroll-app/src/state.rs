//! State shared between host event handlers and the frame loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use tiny_skia::Pixmap;

use starscroll_core::state::FrameStats;
use starscroll_core::types::Viewport;

/// Commands sent from host event handlers to the frame loop thread.
///
/// Handlers only enqueue; the loop thread is the sole mutator of the
/// star field and its surface.
#[derive(Debug)]
pub enum FrameLoopCommand {
    /// The page scrolled to an absolute offset (px).
    Scroll(f64),
    /// The window was resized.
    Resize(Viewport),
    /// Send back a copy of the most recently rendered frame.
    Capture(mpsc::Sender<Option<Pixmap>>),
    /// Stop the loop and tear down the star field.
    Shutdown,
}

/// Latest frame stats, written by the loop thread after every frame.
pub type SharedStats = Arc<Mutex<Option<FrameStats>>>;

pub fn shared_stats() -> SharedStats {
    Arc::new(Mutex::new(None))
}

/// Read the latest published stats, if any.
pub fn latest(stats: &SharedStats) -> Option<FrameStats> {
    stats.lock().ok().and_then(|lock| lock.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_stats_starts_empty() {
        let stats = shared_stats();
        assert!(latest(&stats).is_none());

        *stats.lock().unwrap() = Some(FrameStats {
            frame: 3,
            ..Default::default()
        });
        assert_eq!(latest(&stats).map(|s| s.frame), Some(3));
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<FrameLoopCommand>();

        tx.send(FrameLoopCommand::Scroll(120.0)).unwrap();
        tx.send(FrameLoopCommand::Resize(Viewport::new(640, 480)))
            .unwrap();
        tx.send(FrameLoopCommand::Shutdown).unwrap();

        let commands: Vec<FrameLoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], FrameLoopCommand::Scroll(y) if y == 120.0));
        assert!(matches!(
            commands[1],
            FrameLoopCommand::Resize(Viewport {
                width: 640,
                height: 480
            })
        ));
        assert!(matches!(commands[2], FrameLoopCommand::Shutdown));
    }
}
