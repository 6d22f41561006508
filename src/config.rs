/// Runtime settings, read once at startup from an optional `config.toml`
/// next to the executable or in the working directory. Every key has a
/// default, so the file may be absent, partial, or empty.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub player: PlayerConfig,
    pub levels_dir: PathBuf,
    pub highscores_file: PathBuf,
    /// Fixed RNG seed for reproducible runs; None draws from entropy.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Ceiling on the blocking input read, per tick.
    pub input_timeout_ms: u64,
}

#[derive(Clone, Debug)]
pub struct PlayerConfig {
    pub start_health: i32,
}

// ── file schema ──

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    timing: RawTiming,
    #[serde(default)]
    player: RawPlayer,
    #[serde(default)]
    files: RawFiles,
    #[serde(default)]
    debug: RawDebug,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawTiming {
    input_timeout_ms: u64,
}

impl Default for RawTiming {
    fn default() -> Self {
        RawTiming { input_timeout_ms: 350 }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawPlayer {
    start_health: i32,
}

impl Default for RawPlayer {
    fn default() -> Self {
        RawPlayer { start_health: 100 }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawFiles {
    levels_dir: String,
    highscores_file: String,
}

impl Default for RawFiles {
    fn default() -> Self {
        RawFiles {
            levels_dir: "levels".into(),
            highscores_file: "highscores.txt".into(),
        }
    }
}

#[derive(Deserialize, Default)]
struct RawDebug {
    seed: Option<u64>,
}

// ── loading ──

impl GameConfig {
    pub fn load() -> Self {
        let roots = search_roots();
        let raw = roots
            .iter()
            .map(|r| r.join(CONFIG_FILE))
            .find(|p| p.is_file())
            .map(|p| read_config(&p))
            .unwrap_or_default();

        GameConfig {
            timing: TimingConfig { input_timeout_ms: raw.timing.input_timeout_ms },
            player: PlayerConfig { start_health: raw.player.start_health },
            levels_dir: locate(&roots, &raw.files.levels_dir),
            highscores_file: PathBuf::from(&raw.files.highscores_file),
            seed: raw.debug.seed,
        }
    }
}

/// Directories worth probing for the config file and the levels dir:
/// where the binary lives, then where it was launched from.
fn search_roots() -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.canonicalize().unwrap_or(exe).parent() {
            roots.push(dir.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if !roots.contains(&cwd) {
            roots.push(cwd);
        }
    }
    if roots.is_empty() {
        roots.push(PathBuf::from("."));
    }
    roots
}

/// A broken file is reported and ignored; the game still starts.
fn read_config(path: &Path) -> RawConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("warning: cannot read {}: {e}", path.display());
            return RawConfig::default();
        }
    };
    toml::from_str(&text).unwrap_or_else(|e| {
        eprintln!("warning: {} is invalid, running with defaults: {e}", path.display());
        RawConfig::default()
    })
}

/// Resolve a relative directory name against the search roots; if it
/// exists nowhere, keep the bare name so the embedded fallbacks kick in.
fn locate(roots: &[PathBuf], name: &str) -> PathBuf {
    if Path::new(name).is_absolute() {
        return PathBuf::from(name);
    }
    roots
        .iter()
        .map(|r| r.join(name))
        .find(|p| p.is_dir())
        .unwrap_or_else(|| PathBuf::from(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_all_defaults() {
        let raw: RawConfig = toml::from_str("").unwrap();
        assert_eq!(raw.timing.input_timeout_ms, 350);
        assert_eq!(raw.player.start_health, 100);
        assert_eq!(raw.files.levels_dir, "levels");
        assert_eq!(raw.debug.seed, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let raw: RawConfig =
            toml::from_str("[debug]\nseed = 9\n[player]\nstart_health = 50\n").unwrap();
        assert_eq!(raw.debug.seed, Some(9));
        assert_eq!(raw.player.start_health, 50);
        assert_eq!(raw.files.highscores_file, "highscores.txt");
    }

    #[test]
    fn unknown_dir_is_passed_through() {
        let roots = [PathBuf::from("/definitely-not-a-dir")];
        assert_eq!(locate(&roots, "levels"), PathBuf::from("levels"));
        assert_eq!(locate(&roots, "/abs/levels"), PathBuf::from("/abs/levels"));
    }
}
