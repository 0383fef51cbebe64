//! Command line front end.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::{Deserialize, Serialize};

use starscroll_core::config::StarFieldConfig;
use starscroll_core::constants::FRAME_RATE;
use starscroll_core::state::FrameStats;
use starscroll_core::types::Viewport;
use starscroll_sim::StarField;

use crate::frame_loop;
use crate::page::{Page, ScrollScript};
use crate::raster::PixmapSurface;
use crate::state;

#[derive(Debug, Parser)]
#[command(name = "starscroll", about = "Scroll-synchronized star field renderer")]
pub struct Cli {
    /// JSON config file. Missing fields use defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Host page and scroll input.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Viewport width (px).
    #[arg(long, default_value_t = 1280)]
    pub width: u32,
    /// Viewport height (px).
    #[arg(long, default_value_t = 720)]
    pub height: u32,
    /// Document height (px).
    #[arg(long, default_value_t = 7200.0)]
    pub document_height: f64,
    /// JSON scroll script. Defaults to a single fling down the page.
    #[arg(long)]
    pub script: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a scroll script headlessly to PNG frames.
    Render {
        #[command(flatten)]
        page: PageArgs,
        /// Directory for PNG frames.
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,
        /// Save every Nth frame (0 disables PNG output).
        #[arg(long, default_value_t = 10)]
        every: u64,
        /// Write per-frame stats as JSON to this file.
        #[arg(long)]
        stats: Option<PathBuf>,
    },
    /// Run the threaded frame loop in real time against a scroll script.
    Live {
        #[command(flatten)]
        page: PageArgs,
        /// Wall-clock duration of the run.
        #[arg(long, default_value_t = 3.0)]
        seconds: f64,
        /// Save the final frame as PNG.
        #[arg(long)]
        capture: Option<PathBuf>,
    },
    /// Print the effective configuration as JSON.
    Config,
}

/// Aggregate results of a headless run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSummary {
    pub frames: u64,
    pub peak_speed: f64,
    pub streak_frames: u64,
    pub dot_frames: u64,
    pub skipped_frames: u64,
    pub max_visible: u32,
    pub pngs_written: u64,
}

impl RenderSummary {
    fn record(&mut self, stats: &FrameStats) {
        self.frames += 1;
        self.peak_speed = self.peak_speed.max(stats.speed);
        self.max_visible = self.max_visible.max(stats.visible);
        if stats.skipped {
            self.skipped_frames += 1;
        } else if stats.streaks > 0 {
            self.streak_frames += 1;
        } else {
            self.dot_frames += 1;
        }
    }
}

/// Where a headless run writes its frames.
#[derive(Debug, Clone)]
pub struct PngOutput {
    pub dir: PathBuf,
    pub every: u64,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render {
            page,
            out_dir,
            every,
            stats,
        } => {
            let (page, script) = page_and_script(&page)?;
            let output = (every > 0).then(|| PngOutput {
                dir: out_dir,
                every,
            });
            let (summary, frames) = render_headless(config, page, &script, output.as_ref())?;
            if let Some(path) = stats {
                write_json(&path, &frames)?;
                info!("wrote {} frame stats to {}", frames.len(), path.display());
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Live {
            page,
            seconds,
            capture,
        } => {
            let (page, script) = page_and_script(&page)?;
            let last = run_live(config, page, &script, seconds, capture.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&last)?);
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StarFieldConfig> {
    match path {
        Some(path) => StarFieldConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(StarFieldConfig::default()),
    }
}

fn page_and_script(args: &PageArgs) -> anyhow::Result<(Page, ScrollScript)> {
    let page = Page::new(Viewport::new(args.width, args.height), args.document_height);
    let script = match &args.script {
        Some(path) => ScrollScript::load(path)?,
        None => ScrollScript::fling(page.max_scroll(), 45, 150),
    };
    Ok((page, script))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}

/// Render `script` frame by frame on the current thread.
pub fn render_headless(
    config: StarFieldConfig,
    mut page: Page,
    script: &ScrollScript,
    output: Option<&PngOutput>,
) -> anyhow::Result<(RenderSummary, Vec<FrameStats>)> {
    let start_y = page.scroll_to(script.scroll_at(0));
    let mut field = StarField::create(config, page.viewport, start_y)?;
    let mut surface = PixmapSurface::new(page.viewport);

    if let Some(output) = output {
        std::fs::create_dir_all(&output.dir)
            .with_context(|| format!("failed to create {}", output.dir.display()))?;
    }

    let mut summary = RenderSummary::default();
    let mut frames = Vec::with_capacity(script.duration_frames() as usize);

    for frame in 0..script.duration_frames() {
        // Browsers only fire scroll events when the offset actually moves.
        let before = page.scroll_y;
        let y = page.scroll_to(script.scroll_at(frame));
        if y != before {
            field.on_scroll(y);
        }

        let Some(stats) = field.frame(&page.metrics(), surface.as_mut()) else {
            break;
        };
        summary.record(&stats);

        if let (Some(output), Some(surface)) = (output, surface.as_ref()) {
            if frame % output.every == 0 {
                let path = output.dir.join(format!("frame_{frame:05}.png"));
                surface.save_png(&path)?;
                summary.pngs_written += 1;
            }
        }
        frames.push(stats);
    }

    field.destroy();
    info!(
        "rendered {} frames ({} streaking, peak speed {:.2})",
        summary.frames, summary.streak_frames, summary.peak_speed
    );
    Ok((summary, frames))
}

/// Drive the threaded frame loop with scripted scroll events in real time.
/// Returns the last published frame stats.
pub fn run_live(
    config: StarFieldConfig,
    mut page: Page,
    script: &ScrollScript,
    seconds: f64,
    capture: Option<&Path>,
) -> anyhow::Result<Option<FrameStats>> {
    let start_y = page.scroll_to(script.scroll_at(0));
    let field = StarField::create(config, page.viewport, start_y)?;
    let latest = state::shared_stats();
    let mut handle = frame_loop::spawn_frame_loop(field, page, latest.clone())?;

    let frame_duration = Duration::from_secs_f64(1.0 / FRAME_RATE as f64);
    let total_frames = (seconds.max(0.0) * FRAME_RATE as f64).round() as u64;
    for frame in 0..total_frames {
        handle.scroll(script.scroll_at(frame));
        std::thread::sleep(frame_duration);
    }

    if let Some(path) = capture {
        match handle.capture(Duration::from_secs(1)) {
            Some(pixmap) => pixmap
                .save_png(path)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => log::warn!("no frame available to capture"),
        }
    }

    handle.teardown();
    let last = state::latest(&latest);
    if let Some(stats) = &last {
        info!(
            "live run finished at frame {} (speed {:.2})",
            stats.frame, stats.speed
        );
    }
    Ok(last)
}
