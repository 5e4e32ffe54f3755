/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub maze: MazeConfig,
    pub speed: SpeedConfig,
    pub display: DisplayConfig,
}

#[derive(Clone, Copy, Debug)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    /// Fixed seed for reproducible mazes; None = fresh seed each run.
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
    /// The enemy advances one cell every this many ticks.
    pub enemy_move_interval: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct DisplayConfig {
    /// Overlay the enemy's current A* plan on the maze.
    pub show_enemy_path: bool,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    maze: TomlMaze,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    display: TomlDisplay,
}

#[derive(Deserialize, Debug)]
struct TomlMaze {
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_enemy_interval")]
    enemy_move_interval: u32,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_show_path")]
    show_enemy_path: bool,
}

// ── Defaults ──

fn default_width() -> usize { 25 }
fn default_height() -> usize { 21 }
fn default_tick_rate() -> u64 { 33 }     // ~30 simulation ticks per second
fn default_enemy_interval() -> u32 { 4 }
fn default_show_path() -> bool { true }

impl Default for TomlMaze {
    fn default() -> Self {
        TomlMaze {
            width: default_width(),
            height: default_height(),
            seed: None,
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_rate_ms: default_tick_rate(),
            enemy_move_interval: default_enemy_interval(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            show_enemy_path: default_show_path(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());

        GameConfig {
            maze: MazeConfig {
                width: toml_cfg.maze.width,
                height: toml_cfg.maze.height,
                seed: toml_cfg.maze.seed,
            },
            speed: SpeedConfig {
                tick_rate_ms: toml_cfg.speed.tick_rate_ms,
                enemy_move_interval: toml_cfg.speed.enemy_move_interval,
            },
            display: DisplayConfig {
                show_enemy_path: toml_cfg.display.show_enemy_path,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.maze.width, 25);
        assert_eq!(cfg.maze.height, 21);
        assert_eq!(cfg.maze.seed, None);
        assert_eq!(cfg.speed.tick_rate_ms, 33);
        assert_eq!(cfg.speed.enemy_move_interval, 4);
        assert!(cfg.display.show_enemy_path);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg: TomlConfig = toml::from_str(
            "[maze]\nwidth = 15\nseed = 9\n\n[display]\nshow_enemy_path = false\n",
        )
        .unwrap();
        assert_eq!(cfg.maze.width, 15);
        assert_eq!(cfg.maze.height, 21);
        assert_eq!(cfg.maze.seed, Some(9));
        assert!(!cfg.display.show_enemy_path);
        assert_eq!(cfg.speed.enemy_move_interval, 4);
    }
}
