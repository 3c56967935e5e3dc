//! Vantage - Headless Driver
//!
//! Runs the third-person character and orbit camera through a scripted
//! input sequence in the test arena and logs where everything ends up.
//!
//! Usage: `vantage [config.toml]`

use std::path::PathBuf;

use anyhow::Context;
use glam::Vec3;
use vantage_game::{GameConfig, HeldKeys, InputSnapshot, Level, MovementKeys, Simulation};

/// One segment of the scripted input.
struct Segment {
    label: &'static str,
    seconds: f32,
    input: InputSnapshot,
}

fn script() -> Vec<Segment> {
    let forward = MovementKeys {
        forward: true,
        ..MovementKeys::default()
    };

    let mut orbit = InputSnapshot::default();
    orbit.pointer_x = 1.0;
    orbit.pointer_y = -0.3;

    let mut zoom_out = InputSnapshot::default();
    zoom_out.scroll = -1.0;

    vec![
        Segment {
            label: "idle",
            seconds: 0.5,
            input: InputSnapshot::default(),
        },
        Segment {
            label: "walk",
            seconds: 2.0,
            input: InputSnapshot::from_keys(forward, HeldKeys::default()),
        },
        Segment {
            label: "orbit",
            seconds: 0.75,
            input: orbit,
        },
        Segment {
            label: "run",
            seconds: 1.5,
            input: InputSnapshot::from_keys(
                forward,
                HeldKeys {
                    run: true,
                    ..HeldKeys::default()
                },
            ),
        },
        Segment {
            label: "jump",
            seconds: 1.0,
            input: InputSnapshot::from_keys(
                forward,
                HeldKeys {
                    jump: true,
                    ..HeldKeys::default()
                },
            ),
        },
        Segment {
            label: "crouch",
            seconds: 1.0,
            input: InputSnapshot::from_keys(
                forward,
                HeldKeys {
                    crouch: true,
                    ..HeldKeys::default()
                },
            ),
        },
        Segment {
            label: "aim",
            seconds: 1.0,
            input: InputSnapshot::from_keys(
                MovementKeys {
                    right: true,
                    ..MovementKeys::default()
                },
                HeldKeys {
                    aim: true,
                    ..HeldKeys::default()
                },
            ),
        },
        Segment {
            label: "zoom",
            seconds: 0.5,
            input: zoom_out,
        },
    ]
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => GameConfig::default(),
    };
    log::info!("tick rate {} Hz", config.tick_rate);

    let mut simulation = Simulation::new(config, Level::test_arena());
    let player_id = simulation.spawn_character("Player1");
    simulation.add_roller(Vec3::new(4.0, 0.5, -4.0));

    let dt = simulation.delta_time();
    for segment in script() {
        let ticks = (segment.seconds / dt).round() as u32;
        for _ in 0..ticks {
            simulation.tick(&segment.input);
        }

        let player = simulation
            .character(player_id)
            .context("player character disappeared")?;
        log::info!(
            "[{:>6}] frame {:>4}  player {} yaw {:>7.2} speed {:.2}  camera {} distance {:.2}",
            segment.label,
            simulation.frame,
            fmt_vec(player.position()),
            player.state.yaw,
            player.state.speed,
            fmt_vec(simulation.camera.position()),
            simulation.camera.current_distance(),
        );
    }

    for roller in &simulation.rollers {
        log::info!("roller {} at {}", roller.id, fmt_vec(roller.position()));
    }

    Ok(())
}
