//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! Commands arrive via `mpsc` channel and are folded into a `PendingInput`
//! that is turned into one `FrameInput` per tick. Snapshots are stored in
//! shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use strider_core::constants::TICK_RATE;
use strider_core::state::SimSnapshot;
use strider_core::types::{AnchorState, FrameInput, ViewFrame};
use strider_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Host input accumulated between ticks.
///
/// Transforms and the trigger are latched until replaced. Sensor contacts
/// are consumed by the next frame.
#[derive(Debug, Clone, Default)]
pub struct PendingInput {
    pub anchor: Option<AnchorState>,
    pub view: Option<ViewFrame>,
    pub trigger_held: bool,
    pub contacts: Vec<u64>,
}

impl PendingInput {
    /// Fold one command in. Returns `false` on `Shutdown`.
    pub fn apply(&mut self, command: GameLoopCommand) -> bool {
        match command {
            GameLoopCommand::UpdateAnchor(anchor) => self.anchor = anchor,
            GameLoopCommand::UpdateView(view) => self.view = view,
            GameLoopCommand::SetTrigger(held) => self.trigger_held = held,
            GameLoopCommand::SensorContact(id) => self.contacts.push(id),
            GameLoopCommand::Shutdown => return false,
        }
        true
    }

    /// Build the input for the next tick, draining the contacts.
    pub fn frame(&mut self, now_ms: u64, dt_secs: f32) -> FrameInput {
        FrameInput {
            now_ms,
            dt_secs,
            anchor: self.anchor,
            view: self.view,
            trigger_held: self.trigger_held,
            sensor_contacts: std::mem::take(&mut self.contacts),
        }
    }
}

/// Spawns the game loop in a new thread, taking ownership of `engine`.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("strider-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    let mut pending = PendingInput::default();
    let started = Instant::now();
    let mut last_frame = started;
    let mut next_tick_time = started;
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(cmd) => {
                    if !pending.apply(cmd) {
                        info!(tick = engine.time().tick, "game loop shut down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    warn!("command channel disconnected, stopping game loop");
                    return;
                }
            }
        }

        // 2. Advance one tick against the wall clock
        let now = Instant::now();
        let dt_secs = (now - last_frame).as_secs_f32();
        last_frame = now;
        let input = pending.frame((now - started).as_millis() as u64, dt_secs);
        let snapshot = engine.tick(&input);

        if snapshot.hit_event.is_some() {
            debug!(tick = snapshot.time.tick, "hit published");
        }

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
