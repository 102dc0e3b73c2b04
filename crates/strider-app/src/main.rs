use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use strider_app::demo::DemoPilot;
use strider_app::game_loop::TICK_DURATION;
use strider_app::state::AppState;
use strider_app::{config, session};
use strider_sim::SimulationEngine;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let sim_config = config::sim_config()?;
    let ticks = config::run_ticks();
    let engine = SimulationEngine::new(sim_config).context("building simulation engine")?;

    let state = AppState::new();
    session::start_simulation(&state, engine)?;
    info!(ticks, "demo run started");

    let mut pilot = DemoPilot::new();
    let started = Instant::now();
    for _ in 0..ticks {
        let latest = session::get_snapshot(&state)?;
        let t_secs = started.elapsed().as_secs_f32();
        for command in pilot.commands(t_secs, latest.as_ref()) {
            session::send_command(&state, command)?;
        }
        std::thread::sleep(TICK_DURATION);
    }

    session::stop_simulation(&state)?;

    if let Some(snapshot) = session::get_snapshot(&state)? {
        let score = &snapshot.score;
        info!(
            tick = snapshot.time.tick,
            tiles = snapshot.tiles.len(),
            projectiles_fired = score.projectiles_fired,
            projectile_hits = score.projectile_hits,
            enemies_spawned = score.enemies_spawned,
            enemies_destroyed = score.enemies_destroyed,
            enemies_caught = score.enemies_caught,
            enemies_despawned = score.enemies_despawned,
            "demo run finished"
        );
    }

    Ok(())
}
