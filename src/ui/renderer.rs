/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Each maze cell occupies two terminal columns so the maze renders
/// roughly square.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::config::DisplayConfig;
use crate::sim::world::{Phase, World};

// ── Palette (the original game's material colors) ──

const CLR_WALL: Color = Color::Rgb { r: 33, g: 33, b: 33 };
const CLR_PATH: Color = Color::Rgb { r: 250, g: 250, b: 250 };
const CLR_PLAYER: Color = Color::Rgb { r: 33, g: 150, b: 243 };
const CLR_ENEMY: Color = Color::Rgb { r: 244, g: 67, b: 54 };
const CLR_EXIT: Color = Color::Rgb { r: 76, g: 175, b: 80 };
const CLR_TEXT: Color = Color::Rgb { r: 220, g: 220, b: 220 };

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: CLR_TEXT, bg: CLR_WALL };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) -> bool {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn fill_invalid(&mut self) {
        self.cells.fill(Cell::INVALID);
    }

    fn put(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    /// Two-column maze block at terminal (x, y): background color only.
    fn put_block(&mut self, x: usize, y: usize, bg: Color) {
        self.put(x, y, Cell { ch: ' ', fg: bg, bg });
        self.put(x + 1, y, Cell { ch: ' ', fg: bg, bg });
    }

    /// Two glyphs over a block, for entities.
    fn put_marker(&mut self, x: usize, y: usize, glyphs: [char; 2], fg: Color, bg: Color) {
        self.put(x, y, Cell { ch: glyphs[0], fg, bg });
        self.put(x + 1, y, Cell { ch: glyphs[1], fg, bg });
    }

    fn put_text(&mut self, x: usize, y: usize, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i, y, Cell { ch, fg, bg });
        }
    }
}

// ── Renderer ──

pub struct Renderer {
    out: BufWriter<Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            out: BufWriter::new(io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn render(&mut self, world: &World, display: &DisplayConfig) -> io::Result<()> {
        let (tw, th) = terminal::size()?;
        let (tw, th) = (tw as usize, th as usize);

        if self.front.resize(tw, th) {
            self.back.resize(tw, th);
            self.back.fill_invalid();
            queue!(self.out, Clear(ClearType::All))?;
        }
        self.front.clear();

        self.compose(world, display);
        self.flush_diff()?;

        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Frame composition ──

    fn compose(&mut self, world: &World, display: &DisplayConfig) {
        let grid = &world.grid;
        let maze_w = grid.width * 2;
        let maze_h = grid.height;

        if self.front.width < maze_w + 2 || self.front.height < maze_h + 2 {
            self.front.put_text(
                0, 0,
                "Terminal too small for the maze — enlarge the window.",
                CLR_TEXT, CLR_WALL,
            );
            return;
        }

        let x0 = (self.front.width - maze_w) / 2;
        let y0 = (self.front.height - maze_h) / 2;

        // Maze cells
        for row in 0..grid.height {
            for col in 0..grid.width {
                let bg = if grid.is_open(row, col) { CLR_PATH } else { CLR_WALL };
                self.front.put_block(x0 + col * 2, y0 + row, bg);
            }
        }

        // Exit
        self.front.put_block(x0 + world.exit.1 * 2, y0 + world.exit.0, CLR_EXIT);

        // AI plan overlay (skip the endpoints; entities draw over them)
        if display.show_enemy_path && world.enemy_path.len() > 1 {
            for &(row, col) in &world.enemy_path[1..world.enemy_path.len() - 1] {
                self.front.put_marker(x0 + col * 2, y0 + row, ['·', '·'], CLR_ENEMY, CLR_PATH);
            }
        }

        // Entities
        self.front.put_marker(
            x0 + world.player.1 * 2, y0 + world.player.0,
            ['▐', '▌'], CLR_PLAYER, CLR_PATH,
        );
        self.front.put_marker(
            x0 + world.enemy.1 * 2, y0 + world.enemy.0,
            ['▐', '▌'], CLR_ENEMY, CLR_PATH,
        );

        // Status line above the maze
        let status = format!(
            "MAZEBOUND   tick {:>5}   arrows/wasd move   [r] new maze   [esc] quit",
            world.tick
        );
        let sx = x0.min(self.front.width.saturating_sub(status.chars().count()));
        self.front.put_text(sx, y0.saturating_sub(1), &status, CLR_TEXT, CLR_WALL);

        // End-of-run overlay
        if world.phase != Phase::Running {
            let (msg, color) = match world.phase {
                Phase::Won => ("MISSION ACCOMPLISHED", CLR_EXIT),
                _ => ("TERMINATED BY AI", CLR_ENEMY),
            };
            let hint = "[r] new maze   [esc] quit";
            let cy = y0 + maze_h / 2;
            let mx = x0 + (maze_w.saturating_sub(msg.chars().count())) / 2;
            let hx = x0 + (maze_w.saturating_sub(hint.chars().count())) / 2;
            self.front.put_text(mx, cy, msg, color, CLR_WALL);
            self.front.put_text(hx, cy + 1, hint, CLR_TEXT, CLR_WALL);
        }
    }

    // ── Diff + emit ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = None;
        let mut last_bg = None;
        let mut cursor_at: Option<(usize, usize)> = None;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let idx = y * self.front.width + x;
                let cell = self.front.cells[idx];
                if cell == self.back.cells[idx] {
                    continue;
                }

                // Move only when not already positioned from the previous write.
                if cursor_at != Some((x, y)) {
                    queue!(self.out, MoveTo(x as u16, y as u16))?;
                }
                if last_fg != Some(cell.fg) {
                    queue!(self.out, SetForegroundColor(cell.fg))?;
                    last_fg = Some(cell.fg);
                }
                if last_bg != Some(cell.bg) {
                    queue!(self.out, SetBackgroundColor(cell.bg))?;
                    last_bg = Some(cell.bg);
                }
                queue!(self.out, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.out.flush()
    }
}
