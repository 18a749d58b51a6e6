//! Headless fireworks runs.
//!
//! Drives one show on a [`ManualHost`] into a [`PixelSurface`], logging
//! per-second statistics. The `fete_preview` binary is a thin CLI over
//! [`run`].

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use fete_core::ShowSeed;
use fete_fireworks::{DisplayStats, FireworksConfig, FireworksDisplay, ManualHost, PixelSurface};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// How to run a preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOptions {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Host frame rate. Zero is treated as one.
    pub fps: u32,
    /// Show seed.
    pub seed: u64,
    /// Virtual time after which a still-running show is stopped.
    pub limit: Duration,
    /// Frame number after which the surface is written as raw RGBA8.
    pub snapshot: Option<(u64, PathBuf)>,
}

/// What a preview run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSummary {
    /// Display statistics at the end of the run.
    pub stats: DisplayStats,
    /// Virtual time the run covered.
    pub elapsed: Duration,
    /// True if the limit cut the show short.
    pub stopped_early: bool,
    /// True if a snapshot was written.
    pub snapshot_written: bool,
}

/// Runs one show to completion or to `options.limit`.
///
/// # Errors
///
/// Returns an error if the config is invalid or the snapshot cannot be
/// written.
pub fn run(config: FireworksConfig, options: &PreviewOptions) -> Result<PreviewSummary> {
    let frame_dt = Duration::from_secs(1) / options.fps.max(1);
    let mut surface = PixelSurface::new(options.width, options.height);
    let mut show: FireworksDisplay<ManualHost, ChaCha8Rng> =
        FireworksDisplay::new(ManualHost::new(), config, ShowSeed::new(options.seed).rng())
            .context("failed to create fireworks display")?;

    show.start(Duration::ZERO);

    let mut snapshot_written = false;
    let mut next_report = Duration::from_secs(1);
    while show.is_running() && show.host().now() < options.limit {
        let Some(report) = show.tick(frame_dt, Some(&mut surface)) else {
            continue;
        };

        if let Some((frame, path)) = &options.snapshot {
            if *frame == report.frame {
                std::fs::write(path, surface.as_bytes())
                    .with_context(|| format!("failed to write snapshot {}", path.display()))?;
                snapshot_written = true;
                info!("Snapshot of frame {} written to {}", frame, path.display());
            }
        }

        let now = show.host().now();
        if now >= next_report {
            let frames = show.stats().frames;
            let painted = surface.painted_pixels();
            info!(
                "t={:.1}s frames={} emitters={} particles={} painted={}",
                now.as_secs_f32(),
                frames,
                report.live_emitters,
                report.live_particles,
                painted
            );
            next_report += Duration::from_secs(1);
        } else {
            debug!("frame {}: {:?}", report.frame, report);
        }
    }

    let stopped_early = show.is_running();
    if stopped_early {
        show.stop(Some(&mut surface));
        info!("Stopped at the time limit before the show ended");
    }

    let summary = PreviewSummary {
        stats: show.stats(),
        elapsed: show.host().now(),
        stopped_early,
        snapshot_written,
    };
    let stats = summary.stats;
    let elapsed = summary.elapsed.as_secs_f32();
    info!(
        "Show finished after {:.2}s: {} frames, {} emitters launched, {} burst, {} particles \
         (peak {}), {} dropped",
        elapsed,
        stats.frames,
        stats.emitters_launched,
        stats.emitters_exploded,
        stats.particles_spawned,
        stats.peak_particles,
        stats.dropped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(limit: Duration) -> PreviewOptions {
        PreviewOptions {
            width: 96,
            height: 54,
            fps: 30,
            seed: 5,
            limit,
            snapshot: None,
        }
    }

    fn short_show() -> FireworksConfig {
        FireworksConfig {
            duration_secs: 1.0,
            spawn_probability: 1.0,
            ..FireworksConfig::default()
        }
    }

    #[test]
    fn test_runs_show_to_completion() {
        let summary = run(short_show(), &options(Duration::from_secs(3))).unwrap();
        assert!(!summary.stopped_early);
        assert_eq!(summary.stats.shows_started, 1);
        assert!(summary.stats.frames >= 25);
        assert!(summary.stats.emitters_launched > 0);
        assert!(summary.elapsed <= Duration::from_millis(1_100));
    }

    #[test]
    fn test_limit_cuts_show_short() {
        let config = FireworksConfig {
            duration_secs: 10.0,
            ..FireworksConfig::default()
        };
        let summary = run(config, &options(Duration::from_millis(500))).unwrap();
        assert!(summary.stopped_early);
        assert!(summary.elapsed >= Duration::from_millis(500));
        assert!(summary.elapsed < Duration::from_millis(600));
    }

    #[test]
    fn test_snapshot_written_as_raw_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.rgba");
        let mut opts = options(Duration::from_secs(3));
        opts.snapshot = Some((10, path.clone()));

        let summary = run(short_show(), &opts).unwrap();
        assert!(summary.snapshot_written);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 96 * 54 * 4);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = FireworksConfig {
            friction: 0.0,
            ..FireworksConfig::default()
        };
        assert!(run(config, &options(Duration::from_secs(1))).is_err());
    }
}
