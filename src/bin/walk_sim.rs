//! Headless Walk Simulation
//!
//! Run with: `cargo run --bin walk_sim [config.json]`
//!
//! Ejects from an aircraft, walks a scripted route against an in-memory
//! host, and respawns the aircraft. Set `RUST_LOG=debug` (or `trace` for
//! every frame) to follow along.
//!
//! Script:
//! - Walk north for 2 s
//! - Turn right a quarter and run east for 2 s
//! - Strafe with Shift+D for 1 s
//! - Stand still for 1 s
//! - Exit walk mode

use std::process::ExitCode;
use std::time::{Duration, Instant};

use ground_walk_engine::session::AircraftHost;
use ground_walk_engine::{
    FrameClock, GeodeticPosition, InputEvent, KeyCode, MemoryHost, WalkConfig, WalkMode,
};

// ============================================================================
// SCRIPT
// ============================================================================

const FRAME: Duration = Duration::from_micros(16_667);

/// One step of the scripted walk.
struct Phase {
    name: &'static str,
    events: &'static [InputEvent],
    seconds: f64,
}

const SCRIPT: &[Phase] = &[
    Phase {
        name: "walk north",
        events: &[
            InputEvent::PointerLockChanged(true),
            InputEvent::KeyDown(KeyCode::W),
        ],
        seconds: 2.0,
    },
    Phase {
        name: "turn east and run",
        // 785.4 counts at the default 0.002 rad/count is a quarter turn
        events: &[
            InputEvent::PointerMove { dx: 785.398, dy: 0.0 },
            InputEvent::KeyDown(KeyCode::ShiftLeft),
        ],
        seconds: 2.0,
    },
    Phase {
        name: "strafe right",
        events: &[InputEvent::KeyUp(KeyCode::W), InputEvent::KeyDown(KeyCode::D)],
        seconds: 1.0,
    },
    Phase {
        name: "stand",
        events: &[InputEvent::FocusLost],
        seconds: 1.0,
    },
];

// ============================================================================
// MAIN
// ============================================================================

fn load_config() -> Result<WalkConfig, ground_walk_engine::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => WalkConfig::load(path),
        None => Ok(WalkConfig::default()),
    }
}

fn run(config: WalkConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut clock = FrameClock::new(&config.frame);
    let mut walk = WalkMode::new(config);

    let mut viewer = MemoryHost::with_aircraft(GeodeticPosition::new(47.4979, 19.0402, 250.0));
    let mut scene = MemoryHost::new();
    let mut camera = MemoryHost::new();

    let spawn = walk.enter(&mut viewer, &mut scene, &mut camera)?;
    log::info!("avatar spawned with {} parts", scene.parts.len());

    let mut now = Instant::now();
    for phase in SCRIPT {
        log::info!("phase: {}", phase.name);
        for event in phase.events {
            walk.handle_event(*event);
        }

        let mut simulated = 0.0;
        while simulated < phase.seconds {
            let dt = clock.tick_at(now);
            now += FRAME;
            simulated += dt;

            if let Some(output) = walk.frame(dt, &mut scene, &mut camera) {
                log::trace!(
                    "pose {:?} dir {:?} walking={}",
                    output.pose.position,
                    output.pose.direction,
                    output.step.is_walking
                );
            }
        }

        if let Some(position) = walk.avatar_position() {
            log::info!(
                "  at lat {:.7}, lon {:.7}, height {:.2} m",
                position.latitude,
                position.longitude,
                position.height
            );
        }
    }

    let last = walk
        .exit(&mut viewer, &mut scene)
        .ok_or("walk mode was not active at exit")?;

    let start = ground_walk_engine::geo::to_cartesian(spawn);
    let end = ground_walk_engine::geo::to_cartesian(last);
    log::info!(
        "walked {:.2} m in {} frames ({:.2} s)",
        start.distance(end),
        clock.frame_index,
        clock.elapsed
    );
    log::info!(
        "aircraft respawned at {:?}, {} parts removed, {} camera updates",
        viewer.active_aircraft(),
        scene.removed.len(),
        camera.view_updates
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("walk simulation failed: {err}");
            ExitCode::FAILURE
        }
    }
}
