//! Host page model: the document the star field is layered over.
//!
//! Provides the scroll offset and document height the simulation reads,
//! and scripted scroll input for headless and live runs.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use starscroll_core::types::{PageMetrics, Viewport};

/// A scrollable document shown through a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub viewport: Viewport,
    pub document_height: f64,
    pub scroll_y: f64,
}

impl Page {
    pub fn new(viewport: Viewport, document_height: f64) -> Self {
        Self {
            viewport,
            document_height,
            scroll_y: 0.0,
        }
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height as f64).max(0.0)
    }

    /// Scroll to `y`, clamped to the document bounds. Returns the new offset.
    pub fn scroll_to(&mut self, y: f64) -> f64 {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
        self.scroll_y
    }

    /// Change the viewport, keeping the scroll offset in bounds.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn metrics(&self) -> PageMetrics {
        PageMetrics::new(self.scroll_y, self.document_height)
    }
}

/// Scroll position at a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: u64,
    pub scroll_y: f64,
}

/// Piecewise-linear scroll timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollScript {
    pub keyframes: Vec<Keyframe>,
}

impl ScrollScript {
    /// Build from keyframes, sorting them by frame.
    pub fn new(mut keyframes: Vec<Keyframe>) -> Self {
        keyframes.sort_by_key(|k| k.frame);
        Self { keyframes }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scroll script {}", path.display()))?;
        let script: ScrollScript = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scroll script {}", path.display()))?;
        Ok(Self::new(script.keyframes))
    }

    /// Rest, a fast scroll of `distance` px over `scroll_frames`, then rest
    /// for `rest_frames` while the streaks die down.
    pub fn fling(distance: f64, scroll_frames: u64, rest_frames: u64) -> Self {
        let lead_in = 30;
        Self::new(vec![
            Keyframe {
                frame: 0,
                scroll_y: 0.0,
            },
            Keyframe {
                frame: lead_in,
                scroll_y: 0.0,
            },
            Keyframe {
                frame: lead_in + scroll_frames,
                scroll_y: distance,
            },
            Keyframe {
                frame: lead_in + scroll_frames + rest_frames,
                scroll_y: distance,
            },
        ])
    }

    /// Number of frames the script covers.
    pub fn duration_frames(&self) -> u64 {
        self.keyframes.last().map_or(0, |k| k.frame + 1)
    }

    /// Interpolated scroll offset at `frame`. Holds the end values outside
    /// the keyframe range.
    pub fn scroll_at(&self, frame: u64) -> f64 {
        let Some(first) = self.keyframes.first() else {
            return 0.0;
        };
        if frame <= first.frame {
            return first.scroll_y;
        }
        for pair in self.keyframes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if frame <= b.frame {
                if b.frame == a.frame {
                    return b.scroll_y;
                }
                let t = (frame - a.frame) as f64 / (b.frame - a.frame) as f64;
                return a.scroll_y + (b.scroll_y - a.scroll_y) * t;
            }
        }
        self.keyframes.last().map_or(0.0, |k| k.scroll_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps_to_document() {
        let mut page = Page::new(Viewport::new(1280, 720), 5000.0);
        assert_eq!(page.max_scroll(), 4280.0);
        assert_eq!(page.scroll_to(-10.0), 0.0);
        assert_eq!(page.scroll_to(9000.0), 4280.0);
        assert_eq!(page.metrics(), PageMetrics::new(4280.0, 5000.0));
    }

    #[test]
    fn test_resize_reclamps() {
        let mut page = Page::new(Viewport::new(1280, 720), 5000.0);
        page.scroll_to(4280.0);
        page.resize(Viewport::new(1280, 1000));
        assert_eq!(page.scroll_y, 4000.0);
    }

    #[test]
    fn test_short_document_cannot_scroll() {
        let mut page = Page::new(Viewport::new(800, 600), 400.0);
        assert_eq!(page.scroll_to(100.0), 0.0);
    }

    #[test]
    fn test_script_interpolates() {
        let script = ScrollScript::new(vec![
            Keyframe {
                frame: 10,
                scroll_y: 100.0,
            },
            Keyframe {
                frame: 0,
                scroll_y: 0.0,
            },
        ]);
        assert_eq!(script.scroll_at(0), 0.0);
        assert_eq!(script.scroll_at(5), 50.0);
        assert_eq!(script.scroll_at(10), 100.0);
        assert_eq!(script.scroll_at(50), 100.0);
        assert_eq!(script.duration_frames(), 11);
    }

    #[test]
    fn test_empty_script_is_at_top() {
        let script = ScrollScript::default();
        assert_eq!(script.scroll_at(7), 0.0);
        assert_eq!(script.duration_frames(), 0);
    }

    #[test]
    fn test_fling_shape() {
        let script = ScrollScript::fling(3000.0, 20, 90);
        assert_eq!(script.scroll_at(30), 0.0);
        assert_eq!(script.scroll_at(40), 1500.0);
        assert_eq!(script.scroll_at(50), 3000.0);
        assert_eq!(script.duration_frames(), 141);
    }

    #[test]
    fn test_script_json() {
        let json = r#"{ "keyframes": [ { "frame": 0, "scroll_y": 0 }, { "frame": 4, "scroll_y": 80 } ] }"#;
        let script: ScrollScript = serde_json::from_str(json).unwrap();
        assert_eq!(script.scroll_at(1), 20.0);
    }

    #[test]
    fn test_demo_script_parses() {
        let script: ScrollScript =
            serde_json::from_str(include_str!("../../../demos/scroll-and-back.json")).unwrap();
        assert_eq!(script.duration_frames(), 421);
        assert_eq!(script.scroll_at(90), 1600.0);
        assert_eq!(script.scroll_at(250), 2000.0);
    }
}
