/// Shortest-path search over the maze: A* with a Manhattan heuristic.
///
/// The heuristic is admissible and consistent on a 4-directional
/// unit-cost grid, so the first time the goal is popped the path is
/// optimal. The open heap uses lazy deletion: a cell may be pushed more
/// than once, and pops whose recorded cost is already matched or beaten
/// are discarded instead of re-expanded.
///
/// Called once per simulation tick, so the search allocates nothing
/// beyond its own scratch structures.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::grid::Grid;

const STEP_DIRS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// A search node parked in the arena; `parent` indexes the arena.
struct Node {
    pos: (usize, usize),
    g: u32,
    parent: Option<usize>,
}

fn manhattan(a: (usize, usize), b: (usize, usize)) -> u32 {
    let dr = (a.0 as i32 - b.0 as i32).unsigned_abs();
    let dc = (a.1 as i32 - b.1 as i32).unsigned_abs();
    dr + dc
}

/// Find the shortest open-cell path from `start` to `goal`, inclusive of
/// both endpoints. Returns an empty path if the goal is unreachable —
/// which the maze's connectivity invariant rules out for open cells, so
/// an empty result for open endpoints is an internal-consistency bug.
pub fn find(grid: &Grid, start: (usize, usize), goal: (usize, usize)) -> Vec<(usize, usize)> {
    let mut arena: Vec<Node> = Vec::with_capacity(64);
    // Heap entries: (f, g, pos, arena index), min-ordered via Reverse.
    // Ordering by (f, g, pos) keeps searches fully deterministic.
    let mut open: BinaryHeap<Reverse<(u32, u32, (usize, usize), usize)>> = BinaryHeap::new();
    let mut best_g: HashMap<(usize, usize), u32> = HashMap::new();

    arena.push(Node { pos: start, g: 0, parent: None });
    open.push(Reverse((manhattan(start, goal), 0, start, 0)));

    while let Some(Reverse((_, g, pos, idx))) = open.pop() {
        if pos == goal {
            return reconstruct(&arena, idx);
        }

        // Lazy deletion: skip entries already finalized with a cost
        // no worse than this one.
        match best_g.get(&pos) {
            Some(&recorded) if recorded <= g => continue,
            _ => {}
        }
        best_g.insert(pos, g);

        for (dr, dc) in STEP_DIRS {
            let nr = pos.0 as i32 + dr;
            let nc = pos.1 as i32 + dc;
            if !grid.is_open_signed(nr, nc) {
                continue;
            }
            let next = (nr as usize, nc as usize);
            let ng = g + 1;
            let child = arena.len();
            arena.push(Node { pos: next, g: ng, parent: Some(idx) });
            open.push(Reverse((ng + manhattan(next, goal), ng, next, child)));
        }
    }

    debug_assert!(
        !grid.is_open(start.0, start.1) || !grid.is_open(goal.0, goal.1),
        "no path between open cells {:?} and {:?} — maze connectivity broken",
        start,
        goal
    );
    Vec::new()
}

/// Follow parent links back to the start, then flip to start -> goal.
fn reconstruct(arena: &[Node], mut idx: usize) -> Vec<(usize, usize)> {
    let mut path = Vec::new();
    loop {
        let node = &arena[idx];
        path.push(node.pos);
        match node.parent {
            Some(p) => idx = p,
            None => break,
        }
    }
    path.reverse();
    path
}
