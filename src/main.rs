/// Entry point and game loop.
///
/// The host drives exactly one simulation tick per `tick_rate_ms` and
/// renders every frame. All game logic lives in `sim`; this file only
/// samples input, paces time, and feeds the renderer.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::Rng;

use config::GameConfig;
use domain::grid::MoveDir;
use sim::step;
use sim::world::{Phase, World};
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let mut world = match new_world(&config) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Invalid maze configuration: {e}");
            return;
        }
    };

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    match world.phase {
        Phase::Won => println!("You escaped the maze. Well run."),
        Phase::Lost => println!("The hunter got you. Try another maze."),
        Phase::Running => println!("Maze abandoned mid-run."),
    }
}

/// Construct a fresh simulation: config seed if pinned, otherwise a
/// random one. Restart always goes through here — no state is reused.
fn new_world(config: &GameConfig) -> Result<World, domain::grid::GridError> {
    let seed = config.maze.seed.unwrap_or_else(|| rand::thread_rng().gen());
    World::new(config.maze.width, config.maze.height, seed, config.speed)
}

fn game_loop(
    world: &mut World,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() || kb.any_pressed(KEYS_QUIT) {
            break;
        }
        if kb.any_pressed(KEYS_RESTART) {
            // Reset = discard the simulation, generate a fresh maze.
            *world = new_world(config)?;
            last_tick = Instant::now();
        }

        if last_tick.elapsed() >= tick_rate {
            if world.phase == Phase::Running {
                step::step(world, detect_movement(&kb));
            }
            last_tick = Instant::now();
        }

        renderer.render(world, &config.display)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Current key-direction intent: held keys give continuous movement,
/// one cell per tick, matching the original's per-frame key polling.
fn detect_movement(kb: &InputState) -> Option<MoveDir> {
    if kb.any_held(KEYS_UP) {
        Some(MoveDir::Up)
    } else if kb.any_held(KEYS_DOWN) {
        Some(MoveDir::Down)
    } else if kb.any_held(KEYS_LEFT) {
        Some(MoveDir::Left)
    } else if kb.any_held(KEYS_RIGHT) {
        Some(MoveDir::Right)
    } else {
        None
    }
}
