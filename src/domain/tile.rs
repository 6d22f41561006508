/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here. No other module
/// inspects raw level symbols.

/// Collectible item kinds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemKind {
    Nut,        // primary currency
    Multiplier, // +20 nuts at once
    Medicine,   // +5 health
    Poison,     // -5 health
    Cookie,     // treasure
    Umbrella,   // treasure
    Note,       // treasure
    KeyShard,   // level-3 tool, gates that level's exit
}

/// Decorative body cells of the boss image.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BossPart {
    Fur,   // '&'
    Shade, // '*'
    Glow,  // '%'
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Wall,
    /// Damaging barrier cell. Blocks movement and deals contact damage;
    /// bands of these form the boss barricade and the exit barrier.
    Hazard,
    /// Level exit. Stepping here triggers the level's sub-challenge.
    Portal,
    Item(ItemKind),
    Lamp { lit: bool },
    /// Friendly NPC, index into the ally roster. Enterable only while
    /// carrying enough nuts to feed it.
    Ally(u8),
    Boss(BossPart),
}

impl Tile {
    /// Can the player never enter this cell, regardless of inventory?
    pub fn is_blocking(self) -> bool {
        matches!(self, Tile::Wall | Tile::Hazard | Tile::Lamp { .. })
    }

    /// Does walking against this cell cost health?
    pub fn is_hazardous(self) -> bool {
        matches!(self, Tile::Hazard)
    }

    pub fn is_ally(self) -> bool {
        matches!(self, Tile::Ally(_))
    }

    /// Parse a level-file symbol. Unknown symbols are empty floor so that
    /// decorative text in a map never blocks movement.
    pub fn from_symbol(ch: char) -> Tile {
        match ch {
            'X' => Tile::Wall,
            '#' => Tile::Hazard,
            '\u{21f5}' => Tile::Portal, // ⇵
            '&' => Tile::Boss(BossPart::Fur),
            '*' => Tile::Boss(BossPart::Shade),
            '%' => Tile::Boss(BossPart::Glow),
            _ => Tile::Empty,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lamps_block_lit_or_not() {
        assert!(Tile::Lamp { lit: false }.is_blocking());
        assert!(Tile::Lamp { lit: true }.is_blocking());
    }

    #[test]
    fn boss_body_is_walkable() {
        assert!(!Tile::Boss(BossPart::Fur).is_blocking());
        assert!(!Tile::Boss(BossPart::Glow).is_hazardous());
    }

    #[test]
    fn symbol_parse() {
        assert_eq!(Tile::from_symbol('X'), Tile::Wall);
        assert_eq!(Tile::from_symbol('#'), Tile::Hazard);
        assert_eq!(Tile::from_symbol('⇵'), Tile::Portal);
        assert_eq!(Tile::from_symbol('?'), Tile::Empty);
    }
}
