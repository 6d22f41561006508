/// Events emitted during a simulation tick.
/// The driver consumes these for status messages; the simulation itself
/// never reads them back.

use crate::domain::tile::ItemKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    ItemPicked(ItemKind),
    LampLit { x: usize, y: usize },
    HazardHit,
    AllyFed { energy_left: i32 },
    MinionHit { count: usize },
    BarrierDown,
    ExitOpened,
    BossDefeated,
    LevelComplete { level: u8 },
}
