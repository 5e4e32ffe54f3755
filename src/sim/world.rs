/// World: the complete snapshot of a running pursuit.
///
/// The world owns the maze grid and both entity positions exclusively;
/// the host reads them for rendering but never mutates them. All
/// mutation happens inside `step::step`.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SpeedConfig;
use crate::domain::grid::{Grid, GridError};
use crate::domain::maze;

/// The run/win/lose state machine. `Won` and `Lost` are terminal:
/// once left, `Running` is never re-entered and positions freeze.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Won,
    Lost,
}

pub struct World {
    pub grid: Grid,

    // ── Entities, as (row, col) ──
    pub player: (usize, usize),
    pub enemy: (usize, usize),
    /// Fixed at construction, never mutated.
    pub exit: (usize, usize),

    // ── Pursuit state ──
    /// Freshest A* plan from enemy to player, recomputed every tick.
    /// Rendering-only between moves; never reused for a later tick.
    pub enemy_path: Vec<(usize, usize)>,
    /// Ticks since the enemy last advanced.
    pub move_counter: u32,

    // ── Meta ──
    pub phase: Phase,
    pub tick: u64,
    pub speed: SpeedConfig,
}

impl World {
    /// Generate a maze from `seed` and place the entities at their
    /// fixed starts: player at (1, 1), enemy at (height-2, 1), exit at
    /// (height-2, width-2). Fails on even or sub-5x5 dimensions.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        speed: SpeedConfig,
    ) -> Result<Self, GridError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = maze::generate(width, height, &mut rng)?;

        Ok(World {
            grid,
            player: (1, 1),
            enemy: (height - 2, 1),
            exit: (height - 2, width - 2),
            enemy_path: Vec::new(),
            move_counter: 0,
            phase: Phase::Running,
            tick: 0,
            speed,
        })
    }
}
