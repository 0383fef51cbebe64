use std::time::{Duration, Instant};

use starscroll_app::frame_loop::spawn_frame_loop;
use starscroll_app::page::Page;
use starscroll_app::state::{self, SharedStats};
use starscroll_core::config::StarFieldConfig;
use starscroll_core::state::FrameStats;
use starscroll_core::types::Viewport;
use starscroll_sim::StarField;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn small_field(viewport: Viewport) -> StarField {
    let config = StarFieldConfig {
        star_count: 200,
        ..Default::default()
    };
    StarField::create(config, viewport, 0.0).unwrap()
}

/// Poll shared stats until `pred` holds or the timeout expires.
fn wait_for(
    stats: &SharedStats,
    timeout: Duration,
    pred: impl Fn(&FrameStats) -> bool,
) -> Option<FrameStats> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(s) = state::latest(stats) {
            if pred(&s) {
                return Some(s);
            }
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn test_loop_publishes_frames() {
    init_logging();
    let viewport = Viewport::new(320, 200);
    let latest = state::shared_stats();
    let page = Page::new(viewport, 2000.0);
    let mut handle = spawn_frame_loop(small_field(viewport), page, latest.clone()).unwrap();

    let stats = wait_for(&latest, Duration::from_secs(5), |s| s.frame >= 3);
    assert!(stats.is_some(), "loop should publish frames");
    assert!(!stats.unwrap().skipped);

    handle.teardown();
    assert!(!handle.is_running());
}

#[test]
fn test_scroll_events_produce_streaks() {
    init_logging();
    let viewport = Viewport::new(320, 200);
    let latest = state::shared_stats();
    let page = Page::new(viewport, 4000.0);
    let mut handle = spawn_frame_loop(small_field(viewport), page, latest.clone()).unwrap();

    handle.scroll(1500.0);
    let streaking = wait_for(&latest, Duration::from_secs(5), |s| s.streaks > 0);
    assert!(streaking.is_some(), "a large scroll should streak");
    let streaking = streaking.unwrap();
    assert!(streaking.view_top > 0.0);

    // With no further input the field settles back to dots.
    let resting = wait_for(&latest, Duration::from_secs(10), |s| {
        s.streaks == 0 && s.dots > 0
    });
    assert!(resting.is_some(), "streaks should die down");

    handle.teardown();
}

#[test]
fn test_resize_to_zero_skips_frames() {
    init_logging();
    let viewport = Viewport::new(320, 200);
    let latest = state::shared_stats();
    let page = Page::new(viewport, 2000.0);
    let mut handle = spawn_frame_loop(small_field(viewport), page, latest.clone()).unwrap();

    handle.resize(Viewport::new(0, 0));
    assert!(wait_for(&latest, Duration::from_secs(5), |s| s.skipped).is_some());
    assert!(handle.capture(Duration::from_secs(1)).is_none());

    handle.resize(Viewport::new(160, 100));
    assert!(wait_for(&latest, Duration::from_secs(5), |s| !s.skipped).is_some());
    let pixmap = handle.capture(Duration::from_secs(1)).expect("frame available");
    assert_eq!((pixmap.width(), pixmap.height()), (160, 100));

    handle.teardown();
}

#[test]
fn test_teardown_is_idempotent() {
    init_logging();
    let viewport = Viewport::new(64, 64);
    let latest = state::shared_stats();
    let page = Page::new(viewport, 1000.0);
    let mut handle = spawn_frame_loop(small_field(viewport), page, latest.clone()).unwrap();
    wait_for(&latest, Duration::from_secs(5), |s| s.frame >= 1);

    handle.teardown();
    handle.teardown();

    // Events after teardown are dropped silently.
    handle.scroll(500.0);
    handle.resize(Viewport::new(10, 10));
    assert!(handle.capture(Duration::from_millis(50)).is_none());

    // No frames are published once the loop has stopped.
    let frozen = state::latest(&latest).map(|s| s.frame);
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(state::latest(&latest).map(|s| s.frame), frozen);
}

#[test]
fn test_drop_stops_loop() {
    init_logging();
    let viewport = Viewport::new(64, 64);
    let latest = state::shared_stats();
    {
        let _handle =
            spawn_frame_loop(small_field(viewport), Page::new(viewport, 1000.0), latest.clone())
                .unwrap();
        wait_for(&latest, Duration::from_secs(5), |s| s.frame >= 1);
    }
    let frozen = state::latest(&latest).map(|s| s.frame);
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(state::latest(&latest).map(|s| s.frame), frozen);
}
