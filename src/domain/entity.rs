/// Entities: Player, Minion, Inventory.
/// All of these are plain data mutated by the simulation; the grid never
/// stores them, so cell contents and occupancy stay independent.

use crossterm::style::Color;

/// The four cardinal directions a move request can take.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Input for one tick. `None` means the read timed out: no movement and
/// no direction-dependent interactions, while minions still move.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub movement: Option<Direction>,
}

/// Everything the player carries. Named counters instead of a symbol map,
/// so a missing key is unrepresentable. Key shards only exist on the level
/// that needs them; `None` means "not carried on this level".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub nuts: u32,
    pub cookies: u32,
    pub umbrellas: u32,
    pub notes: u32,
    pub key_shards: Option<u32>,
}

impl Inventory {
    /// Secondary-currency total shown in the header.
    pub fn treasures(&self) -> u32 {
        self.cookies + self.umbrellas + self.notes
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
    pub health: i32,
    pub inventory: Inventory,
    pub name: String,
    pub color: Color,
}

impl Player {
    pub fn new(name: String, color: Color, health: i32) -> Self {
        Player {
            x: 1,
            y: 1,
            health,
            inventory: Inventory::default(),
            name,
            color,
        }
    }

    /// Force-reset to the level spawn point (minion hit, boss contact).
    pub fn respawn(&mut self) {
        self.x = 1;
        self.y = 1;
    }
}

/// A hostile wanderer. Fixed count per level, never dies, only moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Minion {
    pub x: usize,
    pub y: usize,
}

impl Minion {
    pub fn new(x: usize, y: usize) -> Self {
        Minion { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treasures_sum_secondary_currencies() {
        let inv = Inventory {
            nuts: 40,
            cookies: 2,
            umbrellas: 1,
            notes: 3,
            key_shards: Some(4),
        };
        assert_eq!(inv.treasures(), 6);
    }

    #[test]
    fn respawn_resets_to_origin() {
        let mut p = Player::new("Hazel".into(), Color::Yellow, 100);
        p.x = 55;
        p.y = 20;
        p.respawn();
        assert_eq!((p.x, p.y), (1, 1));
    }
}
