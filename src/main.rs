//! Asteroid Arena headless driver
//!
//! Runs the simulation without a window: an autopilot presses keys on an
//! [`InputState`] the way a player would, at a fixed 60 Hz step.
//!
//! Usage: `asteroid-arena [ticks] [tuning.json] [mesh.json]`

use std::sync::Arc;

use asteroid_arena::platform::{InputState, MouseButton, SystemClock, TimeSource, Viewport};
use asteroid_arena::sim::{GameEvent, GameState, TickInput, WallColour, tick};
use asteroid_arena::{AssetRegistry, Error, MeshData, Tuning};

const DEFAULT_TICKS: u64 = 60 * 60;
const DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let ticks = match args.get(1).map(|s| s.parse::<u64>()) {
        None => DEFAULT_TICKS,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid tick count {:?}: {}", args[1], e);
            std::process::exit(1);
        }
    };
    let tuning = match args.get(2) {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };
    let mesh = match load_ship_mesh(args.get(3)) {
        Ok(mesh) => mesh,
        Err(e) => {
            log::error!("Failed to load ship mesh: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Asteroid Arena (headless) starting, seed {:#x}", tuning.seed);
    let assets = AssetRegistry::with_placeholder_handles();
    let mut state = GameState::new(tuning, &assets, Arc::new(mesh));

    let viewport = Viewport::default();
    let mut input = InputState::new();
    let clock = SystemClock::new();

    for frame in 0..ticks {
        autopilot(frame, &state, &mut input, viewport);
        let snapshot = TickInput::poll(&input, viewport);
        tick(&mut state, &snapshot, DT);

        for event in state.events() {
            match event {
                GameEvent::ShipDestroyed { position } => {
                    log::info!("[t={:.2}] ship destroyed at {:?}", state.time_secs, position)
                }
                GameEvent::ShipHitWall { wall } => {
                    log::info!("[t={:.2}] ship hit wall {}", state.time_secs, wall)
                }
                GameEvent::WaveLaunched { count } => {
                    log::info!("[t={:.2}] wave of {}", state.time_secs, count)
                }
                _ => {}
            }
        }
    }

    let stats = &state.stats;
    log::info!(
        "Simulated {:.1}s in {}ms: {} waves, {} asteroids destroyed, {} bullets fired, {} resets, {} asteroids live",
        state.time_secs,
        clock.elapsed_ms(),
        stats.waves_launched,
        stats.asteroids_destroyed,
        stats.bullets_fired,
        stats.resets,
        state.asteroids().len()
    );
}

fn load_ship_mesh(path: Option<&String>) -> Result<MeshData, Error> {
    match path {
        Some(path) => Ok(MeshData::load_json(path)?),
        None => Ok(MeshData::placeholder_ship()),
    }
}

/// Fly forward in bursts while firing; yaw hard whenever a wall is close
fn autopilot(frame: u64, state: &GameState, input: &mut InputState, viewport: Viewport) {
    input.clear();
    input.on_key_down(' ');

    let near_wall = state.walls().iter().any(|w| w.colour == WallColour::Red);
    if near_wall {
        // Left edge of the screen is full yaw
        input.on_mouse_button(MouseButton::Left, true, 0.0, viewport.height * 0.5);
    } else if frame % 240 < 120 {
        input.on_key_down('w');
    }

    if frame % 600 >= 540 {
        input.on_key_down('d');
    }

    // Cycle camera views every five seconds
    const VIEWS: [Option<char>; 6] = [None, Some('k'), Some('j'), Some('l'), Some('i'), Some('m')];
    if let Some(key) = VIEWS[(frame / 300 % VIEWS.len() as u64) as usize] {
        input.on_key_down(key);
    }
}
