//! Host-facing session handlers.
//!
//! Bridge collaborator requests (controller, camera, sensors, renderer) to
//! the game loop thread via channels.

use anyhow::{anyhow, bail, Context, Result};

use strider_core::state::SimSnapshot;
use strider_sim::SimulationEngine;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, engine: SimulationEngine) -> Result<()> {
    let mut running = state.running.lock().map_err(|e| anyhow!("{e}"))?;

    if *running {
        bail!("Simulation already running");
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, state.latest_snapshot.clone());

    *state.command_tx.lock().map_err(|e| anyhow!("{e}"))? = Some(cmd_tx);
    *state.loop_thread.lock().map_err(|e| anyhow!("{e}"))? = Some(handle);
    *running = true;

    Ok(())
}

/// Forward a command to the simulation.
pub fn send_command(state: &AppState, command: GameLoopCommand) -> Result<()> {
    let tx_lock = state.command_tx.lock().map_err(|e| anyhow!("{e}"))?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(command)
            .context("Failed to send command to game loop"),
        None => bail!("Simulation not started"),
    }
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &AppState) -> Result<Option<SimSnapshot>> {
    let lock = state.latest_snapshot.lock().map_err(|e| anyhow!("{e}"))?;
    Ok(lock.clone())
}

/// Ask the loop to shut down and wait for the thread to exit.
pub fn stop_simulation(state: &AppState) -> Result<()> {
    let mut running = state.running.lock().map_err(|e| anyhow!("{e}"))?;
    if !*running {
        return Ok(());
    }

    if let Some(tx) = state.command_tx.lock().map_err(|e| anyhow!("{e}"))?.take() {
        // The loop may already be gone; joining below still succeeds.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    let handle = state.loop_thread.lock().map_err(|e| anyhow!("{e}"))?.take();
    if let Some(handle) = handle {
        handle
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))?;
    }
    *running = false;

    Ok(())
}
