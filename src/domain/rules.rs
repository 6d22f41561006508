/// Movement legality and the fixed gameplay costs.
///
/// Pure functions operating on a read-only map view — no side effects.
/// These encode "what is legal" without performing the action.
///
/// ## Player movement
/// A move is allowed unless the target cell blocks (wall, hazard, lamp in
/// either state). Ally cells block too, with one exception: carrying at
/// least `FEED_COST` nuts lets the player step onto the ally to feed it.
/// A rejected move is a no-op, never an error.
///
/// ## Minion movement
/// A minion may enter an empty, unoccupied cell or the player's cell.
/// Anything else (items, lamps, walls, allies, other minions) blocks.

use crate::domain::entity::Inventory;
use crate::domain::tile::Tile;

/// Nuts consumed by one ally feeding; also the carry threshold that lets
/// the player stand on an ally cell at all.
pub const FEED_COST: u32 = 20;
/// Boss energy drained per feeding.
pub const FEED_DRAIN: i32 = 100;
/// Boss energy at which the barricade falls.
pub const BARRIER_THRESHOLD: i32 = 100;
/// Boss energy at level-4 entry.
pub const BOSS_START_ENERGY: i32 = 600;
/// Health lost walking against a hazard cell.
pub const HAZARD_DAMAGE: i32 = 5;
/// Health lost per minion sharing the player's cell.
pub const MINION_DAMAGE: i32 = 10;
/// Nuts required before a level exit barrier can open.
pub const EXIT_NUTS: u32 = 60;
/// Health and inventory swing of medicine / poison pickups.
pub const REMEDY_DELTA: i32 = 5;
/// Nuts granted by a multiplier pickup.
pub const MULTIPLIER_BONUS: u32 = 20;

/// Read-only view over the board, for the legality checks.
pub struct MapView<'a> {
    pub tiles: &'a [Vec<Tile>],
    pub width: usize,
    pub height: usize,
}

impl<'a> MapView<'a> {
    /// Cell at (x, y). Out-of-range access is a logic bug upstream
    /// (the border is solid wall), so this panics rather than clamps.
    pub fn at(&self, x: usize, y: usize) -> Tile {
        assert!(x < self.width && y < self.height, "position ({x},{y}) outside grid");
        self.tiles[y][x]
    }
}

/// May the player enter (x, y)?
pub fn can_enter(map: &MapView, x: usize, y: usize, inventory: &Inventory) -> bool {
    let target = map.at(x, y);
    if target.is_ally() {
        return inventory.nuts >= FEED_COST;
    }
    !target.is_blocking()
}

/// May a minion enter a cell with this content? `player_here` marks the
/// player's current cell, `minion_here` another minion's.
pub fn minion_can_enter(tile: Tile, player_here: bool, minion_here: bool) -> bool {
    if player_here {
        return true;
    }
    tile == Tile::Empty && !minion_here
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::ItemKind;

    fn map_of(tiles: &[Vec<Tile>]) -> MapView {
        MapView { tiles, width: tiles[0].len(), height: tiles.len() }
    }

    fn row(tiles: &[Tile]) -> Vec<Vec<Tile>> {
        vec![tiles.to_vec()]
    }

    #[test]
    fn walls_and_lamps_always_block() {
        let tiles = row(&[Tile::Wall, Tile::Lamp { lit: false }, Tile::Lamp { lit: true }]);
        let map = map_of(&tiles);
        let inv = Inventory { nuts: 99, ..Default::default() };
        assert!(!can_enter(&map, 0, 0, &inv));
        assert!(!can_enter(&map, 1, 0, &inv));
        assert!(!can_enter(&map, 2, 0, &inv));
    }

    #[test]
    fn ally_opens_at_exactly_feed_cost() {
        let tiles = row(&[Tile::Ally(0)]);
        let map = map_of(&tiles);
        let mut inv = Inventory { nuts: 19, ..Default::default() };
        assert!(!can_enter(&map, 0, 0, &inv));
        inv.nuts = 20;
        assert!(can_enter(&map, 0, 0, &inv));
    }

    #[test]
    fn items_do_not_block_player() {
        let tiles = row(&[Tile::Item(ItemKind::Nut), Tile::Portal]);
        let map = map_of(&tiles);
        let inv = Inventory::default();
        assert!(can_enter(&map, 0, 0, &inv));
        assert!(can_enter(&map, 1, 0, &inv));
    }

    #[test]
    fn minion_targets_are_narrow() {
        assert!(minion_can_enter(Tile::Empty, false, false));
        assert!(minion_can_enter(Tile::Wall, true, false)); // player cell wins
        assert!(!minion_can_enter(Tile::Empty, false, true));
        assert!(!minion_can_enter(Tile::Item(ItemKind::Nut), false, false));
        assert!(!minion_can_enter(Tile::Lamp { lit: false }, false, false));
    }

    #[test]
    #[should_panic(expected = "outside grid")]
    fn out_of_range_is_fatal() {
        let tiles = row(&[Tile::Empty]);
        let map = map_of(&tiles);
        map.at(5, 0);
    }
}
