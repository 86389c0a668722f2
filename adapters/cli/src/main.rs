#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the AI-Mon Defence simulation headlessly.

mod placement;
mod text_backend;

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use aimon_defence_rendering::{Color, PlacementRequest, Presentation, RenderingBackend, Scene};
use aimon_defence_simulation::{Simulation, SimulationConfig};
use aimon_defence_world::query;
use anyhow::{Context, Result};
use clap::Parser;
use placement::{resolve_kind, PlacementArg, ScheduledPlacement};
use text_backend::TextBackend;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the headless driver.
#[derive(Debug, Parser)]
#[command(name = "aimon-defence", version, about = "Run the AI-Mon Defence simulation headlessly")]
struct CliArgs {
    /// TOML file overriding the reference field, spawner, combat and kinds.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 100)]
    frames: u64,
    /// Simulated milliseconds per frame.
    #[arg(long = "frame-ms", value_name = "MS", default_value_t = 100)]
    frame_ms: u64,
    /// Turret placed before the first frame, as `x,y,kind`. Repeatable.
    #[arg(long = "place", value_name = "X,Y,KIND")]
    place: Vec<PlacementArg>,
    /// Turret placed before the given frame, as `frame:x,y,kind`. Repeatable.
    #[arg(long = "place-at", value_name = "FRAME:X,Y,KIND")]
    place_at: Vec<ScheduledPlacement>,
}

/// Entry point for the AI-Mon Defence command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let config = load_config(args.config.as_deref())?;
    let mut simulation =
        Simulation::from_config(config).context("invalid simulation configuration")?;
    println!("{}", query::welcome_banner(simulation.world()));

    let schedule = placement_schedule(args.place, args.place_at);
    let shot_time_to_live = query::shot_time_to_live(simulation.world());
    let scene = Scene::from_views(
        simulation.field(),
        &simulation.turrets(),
        &simulation.enemies(),
        &simulation.shots(),
        shot_time_to_live,
    )
    .context("failed to build the initial scene")?;
    let presentation =
        Presentation::new("AI-Mon Defence", Color::from_rgb_u8(24, 28, 32), scene);
    let backend = TextBackend::new(
        args.frames,
        Duration::from_millis(args.frame_ms),
        schedule,
    );

    backend.run(presentation, |dt, input, scene| {
        for request in input.placements {
            let kind = resolve_kind(query::catalog(simulation.world()), &request.kind);
            match simulation.place_turret(request.position.x, request.position.y, &kind) {
                Ok(turret) => info!(
                    frame = input.frame,
                    turret = turret.get(),
                    kind = %kind,
                    "turret placed"
                ),
                Err(error) => warn!(frame = input.frame, %error, "placement rejected"),
            }
        }

        simulation.advance(dt);
        scene.refresh(
            &simulation.turrets(),
            &simulation.enemies(),
            &simulation.shots(),
            shot_time_to_live,
        );
    })?;

    println!(
        "frames: {}, elapsed: {:.1}s, turrets: {}, enemies: {}, shots: {}",
        query::tick_index(simulation.world()),
        simulation.elapsed().as_secs_f64(),
        simulation.turrets().len(),
        simulation.enemies().len(),
        simulation.shots().len(),
    );

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration from {}", path.display()))?;
    SimulationConfig::from_toml_str(&source)
        .with_context(|| format!("failed to parse configuration from {}", path.display()))
}

fn placement_schedule(
    initial: Vec<PlacementArg>,
    scheduled: Vec<ScheduledPlacement>,
) -> BTreeMap<u64, Vec<PlacementRequest>> {
    let mut schedule: BTreeMap<u64, Vec<PlacementRequest>> = BTreeMap::new();
    let initial = initial.into_iter().map(|placement| (0, placement));
    let scheduled = scheduled
        .into_iter()
        .map(|entry| (entry.frame, entry.placement));

    for (frame, placement) in initial.chain(scheduled) {
        schedule
            .entry(frame)
            .or_default()
            .push(PlacementRequest::new(placement.position, placement.kind));
    }
    schedule
}
