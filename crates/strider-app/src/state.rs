//! Application state shared between the host side and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use strider_core::state::SimSnapshot;
use strider_core::types::{AnchorState, ViewFrame};

/// Commands sent from the host collaborators to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// Latest character-controller transform. `None` while it is not ready.
    UpdateAnchor(Option<AnchorState>),
    /// Latest camera transform.
    UpdateView(Option<ViewFrame>),
    /// Fire input pressed or released.
    SetTrigger(bool),
    /// A projectile sensor touched another body.
    SensorContact(u64),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` lives behind a `Mutex` so the state is `Sync`
/// - `Mutex<Option<...>>` for anything that only exists once the loop runs
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the loop thread)
pub struct AppState {
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
    pub loop_thread: Mutex<Option<JoinHandle<()>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_thread: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
