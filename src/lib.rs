pub mod cli;
pub mod config;
pub mod display;
pub mod frame_loop;
pub mod render;
pub mod sim;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::{fs::File, sync::Mutex};

use anyhow::{Context, Result};
use cli::Cli;
use config::{MatrixConfig, load_config};
use display::framebuffer::FrameBuffer;
use frame_loop::{FrameLoop, FrameStats, SystemClock};
use sim::{Simulation, random::SimRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    init_tracing(&cli)?;

    let config = load_config(cli.preset, cli.config.as_deref())?;
    info!(
        preset = ?cli.preset,
        width = config.width,
        height = config.height,
        max_particles = config.max_particles,
        max_snow_depth = config.max_snow_depth,
        melt_interval = config.melt_interval,
        layout = ?config.layout,
        seed = cli.seed,
        fps = cli.fps,
        "starting snowfall"
    );

    let mut frame_loop = build_frame_loop(&config, cli.seed, cli.fps);
    if cli.headless {
        let frames = cli.frames;
        let (frame_loop, stats) = tokio::task::spawn_blocking(move || {
            let stats = frame_loop.run(&mut SystemClock::new(), frames);
            (frame_loop, stats)
        })
        .await
        .context("headless frame loop panicked")?;
        report_headless(&frame_loop, stats);
        println!("{}", ui::matrix_view::text_frame(frame_loop.display()));
        Ok(())
    } else {
        let shading = ui::shading::detect_shading(cli.effective_color_mode());
        ui::run(&mut frame_loop, shading).await
    }
}

#[must_use]
pub fn build_frame_loop(
    config: &MatrixConfig,
    seed: u64,
    fps: u8,
) -> FrameLoop<SimRng, FrameBuffer> {
    FrameLoop::new(
        Simulation::new(config),
        SimRng::seeded(seed),
        FrameBuffer::from_config(config),
        fps,
    )
}

fn report_headless(frame_loop: &FrameLoop<SimRng, FrameBuffer>, stats: FrameStats) {
    let sim = frame_loop.simulation();
    info!(
        frames = stats.frames,
        overruns = stats.overruns,
        worst_frame_micros = stats.worst_elapsed_micros,
        active = sim.particles().active_count(),
        wind = sim.wind().wind(),
        snow = sim.cover().total(),
        "headless run finished"
    );
}

/// The terminal UI owns stdout and stderr, so it only logs to a file. A
/// subscriber installed by an earlier run in the same process is kept.
fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {} failed", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        return Ok(());
    };
    if let Err(err) = installed {
        debug!(%err, "tracing subscriber already installed");
    }
    Ok(())
}
