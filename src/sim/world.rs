/// GameState: the complete snapshot of a running game.
///
/// One instance is owned by the tick driver for the whole session and
/// handed to the resolvers by mutable reference, one at a time. The grid
/// holds terrain only; the player and minions live beside it, so drawing
/// the avatar never overwrites a cell.
///
/// All tile access goes through `tile_at` / `set_tile`, which treat an
/// out-of-range position as a logic bug and panic (the border is solid
/// wall, so walkable positions are always interior).

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::entity::{Minion, Player};
use crate::domain::rules::MapView;
use crate::domain::tile::Tile;

/// Fixed gameplay area. The header overlay renders to the right of it.
pub const BOARD_WIDTH: usize = 120;
pub const BOARD_HEIGHT: usize = 40;

/// Interior band used for random placement: one cell of margin inside
/// the border walls, so nothing spawns adjacent to the player start.
pub const SPAWN_X: std::ops::Range<usize> = 2..118;
pub const SPAWN_Y: std::ops::Range<usize> = 2..38;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Won,
    Lost,
    Quit,
}

pub struct GameState {
    // ── Board ──
    pub tiles: Vec<Vec<Tile>>,
    pub width: usize,
    pub height: usize,

    // ── Entities ──
    pub player: Player,
    pub minions: Vec<Minion>,

    // ── Level tracking ──
    pub level: u8,
    pub lamps_lit: u32,
    pub boss_energy: i32,
    pub barrier_cleared: bool,

    // ── Meta ──
    pub phase: Phase,
    pub started: Instant,
    pub rng: ChaCha8Rng,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

/// Bordered empty grid: wall ring, empty interior.
pub fn create_grid(width: usize, height: usize) -> Vec<Vec<Tile>> {
    let mut tiles = vec![vec![Tile::Empty; width]; height];
    for x in 0..width {
        tiles[0][x] = Tile::Wall;
        tiles[height - 1][x] = Tile::Wall;
    }
    for row in tiles.iter_mut() {
        row[0] = Tile::Wall;
        row[width - 1] = Tile::Wall;
    }
    tiles
}

impl GameState {
    pub fn new(player: Player, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        GameState {
            tiles: create_grid(BOARD_WIDTH, BOARD_HEIGHT),
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            player,
            minions: vec![],
            level: 0,
            lamps_lit: 0,
            boss_energy: 0,
            barrier_cleared: false,
            phase: Phase::Playing,
            started: Instant::now(),
            rng,
            message: String::new(),
            message_timer: 0,
        }
    }

    #[inline]
    pub fn tile_at(&self, x: usize, y: usize) -> Tile {
        assert!(x < self.width && y < self.height, "position ({x},{y}) outside grid");
        self.tiles[y][x]
    }

    #[inline]
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        assert!(x < self.width && y < self.height, "position ({x},{y}) outside grid");
        self.tiles[y][x] = tile;
    }

    pub fn map_view(&self) -> MapView {
        MapView { tiles: &self.tiles, width: self.width, height: self.height }
    }

    /// Is any minion standing at (x, y)?
    pub fn minion_at(&self, x: usize, y: usize) -> bool {
        self.minions.iter().any(|m| m.x == x && m.y == y)
    }

    /// Empty interior cells available for random placement, in row order.
    pub fn empty_interior(&self) -> Vec<(usize, usize)> {
        let mut cells = vec![];
        for y in SPAWN_Y {
            for x in SPAWN_X {
                if self.tiles[y][x] == Tile::Empty && !self.minion_at(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;

    fn state() -> GameState {
        GameState::new(Player::new("t".into(), Color::Yellow, 100), Some(7))
    }

    #[test]
    fn grid_is_bordered() {
        let g = create_grid(10, 5);
        assert!(g[0].iter().all(|&t| t == Tile::Wall));
        assert!(g[4].iter().all(|&t| t == Tile::Wall));
        assert_eq!(g[2][0], Tile::Wall);
        assert_eq!(g[2][9], Tile::Wall);
        assert_eq!(g[2][5], Tile::Empty);
    }

    #[test]
    fn empty_interior_excludes_occupied() {
        let mut s = state();
        let before = s.empty_interior().len();
        s.set_tile(10, 10, Tile::Wall);
        s.minions.push(Minion::new(11, 10));
        assert_eq!(s.empty_interior().len(), before - 2);
    }

    #[test]
    #[should_panic(expected = "outside grid")]
    fn tile_access_out_of_range_panics() {
        state().tile_at(500, 2);
    }
}
