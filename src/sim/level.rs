/// Level catalogue and loader.
///
/// ## Sources (priority order):
///   1. `levels/` directory (individual `level<N>.txt` files)
///   2. Built-in embedded copies of the same files
///
/// ## Level file format:
///   Exactly 40 rows of exactly 120 characters, raw symbols, positionally
///   significant (no re-flow). Anything else is a malformed resource.
///
/// ## Symbol legend:
///   'X' = wall            '#' = hazard barrier
///   '⇵' = exit portal     '&' '*' '%' = boss body
///   ' ' = empty           (unknown symbols read as empty)
///
/// Items, lamps and minions are not part of the static map; they are
/// scattered at level entry by sampling from the empty interior cells.
/// The five allies and the boss only exist on level 4.

use std::path::Path;

use rand::seq::index::sample;

use crate::challenge::ChallengeKind;
use crate::domain::rules::{BOSS_START_ENERGY, EXIT_NUTS};
use crate::domain::tile::{ItemKind, Tile};
use crate::error::GameError;
use crate::sim::world::{GameState, Phase, BOARD_HEIGHT, BOARD_WIDTH};

/// Highest playable level; finishing it wins the game.
pub const FINAL_LEVEL: u8 = 4;

/// Ally roster positions on level 4 (row, then evenly spaced columns).
pub const ALLY_ROW: usize = 37;
pub const ALLY_COLS: [usize; 5] = [34, 51, 68, 85, 102];

/// Rectangle the boss occupies; standing inside it is boss contact.
pub const BOSS_REGION_X: std::ops::Range<usize> = 100..118;
pub const BOSS_REGION_Y: std::ops::Range<usize> = 20..29;

/// The exit barrier band cleared by `enable_level_exit`.
pub const EXIT_BARRIER_X: std::ops::Range<usize> = 116..119;
pub const EXIT_BARRIER_Y: std::ops::Range<usize> = 37..39;

/// Requirements for the exit barrier to open, all of which must hold.
#[derive(Clone, Copy, Debug)]
pub struct ExitBarrier {
    pub nuts: u32,
    pub lamps: Option<u32>,
    pub shards: Option<u32>,
}

/// How a level ends.
#[derive(Clone, Copy, Debug)]
pub enum ExitRule {
    /// Step onto the portal, then win the named sub-challenge.
    Portal(ChallengeKind),
    /// Drain the boss to zero energy.
    BossDefeated,
}

/// Static per-level configuration. One canonical engine reads this table
/// instead of branching on the level number.
pub struct LevelSpec {
    pub number: u8,
    pub quotas: &'static [(ItemKind, usize)],
    pub lamps: usize,
    pub minions: usize,
    pub has_allies: bool,
    pub has_boss: bool,
    pub exit: ExitRule,
    pub barrier: Option<ExitBarrier>,
}

pub const LEVELS: [LevelSpec; 4] = [
    LevelSpec {
        number: 1,
        quotas: &[
            (ItemKind::Nut, 20),
            (ItemKind::Multiplier, 8),
            (ItemKind::Poison, 5),
            (ItemKind::Medicine, 8),
            (ItemKind::Cookie, 3),
            (ItemKind::Umbrella, 3),
            (ItemKind::Note, 3),
        ],
        lamps: 0,
        minions: 0,
        has_allies: false,
        has_boss: false,
        exit: ExitRule::Portal(ChallengeKind::Guess),
        barrier: Some(ExitBarrier { nuts: EXIT_NUTS, lamps: None, shards: None }),
    },
    LevelSpec {
        number: 2,
        quotas: &[
            (ItemKind::Nut, 20),
            (ItemKind::Multiplier, 4),
            (ItemKind::Poison, 15),
            (ItemKind::Medicine, 4),
            (ItemKind::Cookie, 3),
            (ItemKind::Umbrella, 3),
            (ItemKind::Note, 3),
        ],
        lamps: 6,
        minions: 5,
        has_allies: false,
        has_boss: false,
        exit: ExitRule::Portal(ChallengeKind::Arithmetic),
        barrier: Some(ExitBarrier { nuts: EXIT_NUTS, lamps: Some(6), shards: None }),
    },
    LevelSpec {
        number: 3,
        quotas: &[
            (ItemKind::Nut, 20),
            (ItemKind::Multiplier, 6),
            (ItemKind::Poison, 10),
            (ItemKind::Medicine, 6),
            (ItemKind::KeyShard, 4),
            (ItemKind::Cookie, 3),
            (ItemKind::Umbrella, 3),
            (ItemKind::Note, 3),
        ],
        lamps: 0,
        minions: 5,
        has_allies: false,
        has_boss: false,
        exit: ExitRule::Portal(ChallengeKind::Memory),
        barrier: Some(ExitBarrier { nuts: EXIT_NUTS, lamps: None, shards: Some(4) }),
    },
    LevelSpec {
        number: 4,
        quotas: &[
            (ItemKind::Nut, 20),
            (ItemKind::Multiplier, 5),
            (ItemKind::Poison, 20),
            (ItemKind::Medicine, 2),
            (ItemKind::Cookie, 3),
            (ItemKind::Umbrella, 3),
            (ItemKind::Note, 3),
        ],
        lamps: 0,
        minions: 5,
        has_allies: true,
        has_boss: true,
        exit: ExitRule::BossDefeated,
        barrier: None,
    },
];

pub fn spec(level: u8) -> &'static LevelSpec {
    LEVELS
        .iter()
        .find(|s| s.number == level)
        .unwrap_or_else(|| panic!("no such level: {level}"))
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Enter a level: load and decorate the board, reset per-level state,
/// apply the inventory carry-over rules, move the player to spawn.
pub fn enter_level(state: &mut GameState, level: u8, levels_dir: &Path) -> Result<(), GameError> {
    if level > FINAL_LEVEL {
        state.phase = Phase::Won;
        return Ok(());
    }
    let spec = spec(level);

    state.tiles = load_board(level, levels_dir)?;
    state.level = level;
    state.minions.clear();
    state.lamps_lit = 0;
    state.barrier_cleared = false;
    state.boss_energy = if spec.has_boss { BOSS_START_ENERGY } else { 0 };

    // Inventory carry-over: nuts always reset; the key-shard tool exists
    // only on level 3; treasures persist across levels.
    let inv = &mut state.player.inventory;
    inv.nuts = 0;
    match level {
        1 => *inv = Default::default(),
        3 => inv.key_shards = Some(0),
        4 => inv.key_shards = None,
        _ => {}
    }

    scatter_items(state, spec)?;
    scatter_lamps(state, spec)?;
    scatter_minions(state, spec)?;
    if spec.has_allies {
        for (i, &x) in ALLY_COLS.iter().enumerate() {
            state.set_tile(x, ALLY_ROW, Tile::Ally(i as u8));
        }
    }

    state.player.respawn();
    Ok(())
}

/// Load a board from `levels_dir`, falling back to the embedded copy.
/// A present-but-malformed file is an error, never silently replaced.
pub fn load_board(level: u8, levels_dir: &Path) -> Result<Vec<Vec<Tile>>, GameError> {
    let path = levels_dir.join(format!("level{level}.txt"));
    let text = if path.is_file() {
        std::fs::read_to_string(&path)
            .map_err(|source| GameError::LevelMissing { level, source })?
    } else {
        embedded_board(level).to_string()
    };
    parse_board(level, &text)
}

// ══════════════════════════════════════════════════════════════
// Parsing
// ══════════════════════════════════════════════════════════════

fn parse_board(level: u8, text: &str) -> Result<Vec<Vec<Tile>>, GameError> {
    let mut tiles = Vec::with_capacity(BOARD_HEIGHT);
    for (y, line) in text.lines().enumerate() {
        let row: Vec<Tile> = line.chars().map(Tile::from_symbol).collect();
        if row.len() != BOARD_WIDTH {
            return Err(GameError::MalformedLevel {
                level,
                reason: format!("row {y} has {} cells, expected {BOARD_WIDTH}", row.len()),
            });
        }
        tiles.push(row);
    }
    if tiles.len() != BOARD_HEIGHT {
        return Err(GameError::MalformedLevel {
            level,
            reason: format!("{} rows, expected {BOARD_HEIGHT}", tiles.len()),
        });
    }
    Ok(tiles)
}

// ══════════════════════════════════════════════════════════════
// Decoration: sampling without replacement
// ══════════════════════════════════════════════════════════════

/// Pick `needed` distinct empty interior cells. Errors out instead of
/// retrying forever on a crowded board.
fn pick_empty_cells(state: &mut GameState, needed: usize) -> Result<Vec<(usize, usize)>, GameError> {
    let empties = state.empty_interior();
    if empties.len() < needed {
        return Err(GameError::BoardFull {
            level: state.level,
            needed,
            free: empties.len(),
        });
    }
    let chosen = sample(&mut state.rng, empties.len(), needed);
    Ok(chosen.iter().map(|i| empties[i]).collect())
}

fn scatter_items(state: &mut GameState, spec: &LevelSpec) -> Result<(), GameError> {
    for &(kind, count) in spec.quotas {
        for (x, y) in pick_empty_cells(state, count)? {
            state.set_tile(x, y, Tile::Item(kind));
        }
    }
    Ok(())
}

fn scatter_lamps(state: &mut GameState, spec: &LevelSpec) -> Result<(), GameError> {
    for (x, y) in pick_empty_cells(state, spec.lamps)? {
        state.set_tile(x, y, Tile::Lamp { lit: false });
    }
    Ok(())
}

fn scatter_minions(state: &mut GameState, spec: &LevelSpec) -> Result<(), GameError> {
    for (x, y) in pick_empty_cells(state, spec.minions)? {
        state.minions.push(crate::domain::entity::Minion::new(x, y));
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Embedded fallback boards
// ══════════════════════════════════════════════════════════════

fn embedded_board(level: u8) -> &'static str {
    match level {
        1 => include_str!("../../levels/level1.txt"),
        2 => include_str!("../../levels/level2.txt"),
        3 => include_str!("../../levels/level3.txt"),
        4 => include_str!("../../levels/level4.txt"),
        _ => panic!("no such level: {level}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Player;
    use crossterm::style::Color;
    use std::path::PathBuf;

    fn state() -> GameState {
        GameState::new(Player::new("t".into(), Color::Yellow, 100), Some(42))
    }

    fn nowhere() -> PathBuf {
        PathBuf::from("/nonexistent-levels")
    }

    fn count_items(state: &GameState, kind: ItemKind) -> usize {
        state
            .tiles
            .iter()
            .flatten()
            .filter(|&&t| t == Tile::Item(kind))
            .count()
    }

    #[test]
    fn embedded_boards_are_well_formed() {
        for level in 1..=FINAL_LEVEL {
            let board = load_board(level, &nowhere()).unwrap();
            assert_eq!(board.len(), BOARD_HEIGHT);
            assert!(board.iter().all(|r| r.len() == BOARD_WIDTH));
            assert!(board[0].iter().all(|&t| t == Tile::Wall));
        }
    }

    #[test]
    fn malformed_board_is_rejected() {
        let short = "XXX\nX X\nXXX\n";
        assert!(matches!(
            parse_board(1, short),
            Err(GameError::MalformedLevel { level: 1, .. })
        ));
    }

    #[test]
    fn quotas_are_placed_exactly() {
        let mut s = state();
        enter_level(&mut s, 2, &nowhere()).unwrap();
        assert_eq!(count_items(&s, ItemKind::Nut), 20);
        assert_eq!(count_items(&s, ItemKind::Poison), 15);
        assert_eq!(count_items(&s, ItemKind::Medicine), 4);
        let lamps = s
            .tiles
            .iter()
            .flatten()
            .filter(|t| matches!(t, Tile::Lamp { .. }))
            .count();
        assert_eq!(lamps, 6);
        assert_eq!(s.minions.len(), 5);
    }

    #[test]
    fn level_one_has_no_minions() {
        let mut s = state();
        enter_level(&mut s, 1, &nowhere()).unwrap();
        assert!(s.minions.is_empty());
    }

    #[test]
    fn transition_resets_nuts_and_manages_tool() {
        let mut s = state();
        enter_level(&mut s, 1, &nowhere()).unwrap();
        s.player.inventory.nuts = 77;
        s.player.inventory.cookies = 2;

        enter_level(&mut s, 3, &nowhere()).unwrap();
        assert_eq!(s.player.inventory.nuts, 0);
        assert_eq!(s.player.inventory.cookies, 2);
        assert_eq!(s.player.inventory.key_shards, Some(0));

        enter_level(&mut s, 4, &nowhere()).unwrap();
        assert_eq!(s.player.inventory.key_shards, None);
        assert_eq!(s.boss_energy, BOSS_START_ENERGY);
        for (i, &x) in ALLY_COLS.iter().enumerate() {
            assert_eq!(s.tile_at(x, ALLY_ROW), Tile::Ally(i as u8));
        }
    }

    #[test]
    fn past_final_level_wins() {
        let mut s = state();
        enter_level(&mut s, FINAL_LEVEL + 1, &nowhere()).unwrap();
        assert_eq!(s.phase, Phase::Won);
    }

    #[test]
    fn crowded_board_fails_fast() {
        let mut s = state();
        for y in 1..BOARD_HEIGHT - 1 {
            for x in 1..BOARD_WIDTH - 1 {
                s.set_tile(x, y, Tile::Wall);
            }
        }
        assert!(matches!(
            pick_empty_cells(&mut s, 5),
            Err(GameError::BoardFull { .. })
        ));
    }

    #[test]
    fn seeded_runs_place_identically() {
        let mut a = state();
        let mut b = state();
        enter_level(&mut a, 2, &nowhere()).unwrap();
        enter_level(&mut b, 2, &nowhere()).unwrap();
        assert_eq!(a.tiles, b.tiles);
        assert_eq!(a.minions, b.minions);
    }
}
