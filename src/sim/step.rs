/// The per-tick update pipeline.
///
/// The driver calls `move_minions` before the input read so the board
/// stays alive during idle ticks, then `resolve` with whatever the read
/// produced. `resolve` runs, in fixed order:
///
///   1. Player movement
///   2. Lamp lighting           (direction-adjacent from the new cell)
///   3. Hazard contact damage   (the cell the move was aimed at)
///   4. Item pickup             (tile cleared after the effect)
///   5. Ally feeding
///   6. Minion collision        (stacking damage, respawn to (1,1))
///   7. Boss barrier drop / boss contact
///   8. Exit-barrier unlock     (idempotent, re-checked every tick)
///   9. Lifecycle: loss check, then the level's exit rule
///
/// Order matters: later steps read inventory and health mutated by
/// earlier ones. None of the interaction steps can fail; a level
/// transition can (resource errors), and that bubbles up.

use std::path::Path;

use rand::seq::SliceRandom;

use crate::challenge::Gate;
use crate::domain::entity::{Direction, FrameInput};
use crate::domain::rules::{
    self, BARRIER_THRESHOLD, FEED_COST, FEED_DRAIN, HAZARD_DAMAGE, MINION_DAMAGE,
    MULTIPLIER_BONUS, REMEDY_DELTA,
};
use crate::domain::tile::{ItemKind, Tile};
use crate::error::GameError;
use crate::sim::event::GameEvent;
use crate::sim::level::{
    self, ExitRule, BOSS_REGION_X, BOSS_REGION_Y, EXIT_BARRIER_X, EXIT_BARRIER_Y, FINAL_LEVEL,
};
use crate::sim::world::{GameState, Phase};

// ══════════════════════════════════════════════════════════════
// Minion movement (runs before the input read)
// ══════════════════════════════════════════════════════════════

/// Move every minion one step to a uniformly chosen legal neighbor.
/// A minion with no legal neighbor stays put this tick.
pub fn move_minions(state: &mut GameState) {
    if state.phase != Phase::Playing {
        return;
    }
    let (px, py) = (state.player.x, state.player.y);

    for i in 0..state.minions.len() {
        let (mx, my) = (state.minions[i].x, state.minions[i].y);
        let neighbors = [
            (mx - 1, my),
            (mx + 1, my),
            (mx, my - 1),
            (mx, my + 1),
        ];
        let legal: Vec<(usize, usize)> = neighbors
            .iter()
            .copied()
            .filter(|&(x, y)| {
                let occupied = state
                    .minions
                    .iter()
                    .enumerate()
                    .any(|(j, m)| j != i && m.x == x && m.y == y);
                rules::minion_can_enter(state.tile_at(x, y), (x, y) == (px, py), occupied)
            })
            .collect();

        if let Some(&(x, y)) = legal.choose(&mut state.rng) {
            state.minions[i].x = x;
            state.minions[i].y = y;
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn resolve(
    state: &mut GameState,
    input: FrameInput,
    gate: &mut dyn Gate,
    levels_dir: &Path,
) -> Result<Vec<GameEvent>, GameError> {
    if state.phase != Phase::Playing {
        return Ok(vec![]);
    }
    let mut events: Vec<GameEvent> = Vec::new();

    let attempted = resolve_player_movement(state, input.movement);
    resolve_lamps(state, input.movement, &mut events);
    resolve_hazard_contact(state, attempted, &mut events);
    resolve_pickup(state, &mut events);
    resolve_feeding(state, &mut events);
    resolve_minion_collision(state, &mut events);
    resolve_boss(state, gate, &mut events);
    resolve_exit_barrier(state, &mut events);
    resolve_lifecycle(state, gate, levels_dir, &mut events)?;

    Ok(events)
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

/// Apply the requested move if legal. Returns the cell the move was
/// aimed at (for the hazard check), or None for an idle tick.
fn resolve_player_movement(
    state: &mut GameState,
    movement: Option<Direction>,
) -> Option<(usize, usize)> {
    let dir = movement?;
    let (dx, dy) = dir.delta();
    let tx = (state.player.x as i32 + dx) as usize;
    let ty = (state.player.y as i32 + dy) as usize;

    let map = state.map_view();
    if rules::can_enter(&map, tx, ty, &state.player.inventory) {
        state.player.x = tx;
        state.player.y = ty;
    }
    Some((tx, ty))
}

// ══════════════════════════════════════════════════════════════
// Interactions
// ══════════════════════════════════════════════════════════════

/// Light an unlit lamp the pressed direction points at. Lamps block, so
/// the neighbor of the new position is the lamp the player pushed into.
fn resolve_lamps(state: &mut GameState, movement: Option<Direction>, events: &mut Vec<GameEvent>) {
    let dir = match movement {
        Some(d) => d,
        None => return,
    };
    let (dx, dy) = dir.delta();
    let x = (state.player.x as i32 + dx) as usize;
    let y = (state.player.y as i32 + dy) as usize;
    if state.tile_at(x, y) == (Tile::Lamp { lit: false }) {
        state.set_tile(x, y, Tile::Lamp { lit: true });
        state.lamps_lit += 1;
        events.push(GameEvent::LampLit { x, y });
    }
}

/// Walking against a hazard cell costs health even though the move was
/// rejected.
fn resolve_hazard_contact(
    state: &mut GameState,
    attempted: Option<(usize, usize)>,
    events: &mut Vec<GameEvent>,
) {
    if let Some((x, y)) = attempted {
        if state.tile_at(x, y).is_hazardous() {
            state.player.health -= HAZARD_DAMAGE;
            events.push(GameEvent::HazardHit);
        }
    }
}

/// Collect whatever the player stands on. The tile is cleared so the
/// effect fires exactly once per spawned item.
fn resolve_pickup(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let (x, y) = (state.player.x, state.player.y);
    let kind = match state.tile_at(x, y) {
        Tile::Item(kind) => kind,
        _ => return,
    };
    let inv = &mut state.player.inventory;
    match kind {
        ItemKind::Nut => inv.nuts += 1,
        ItemKind::Multiplier => inv.nuts += MULTIPLIER_BONUS,
        ItemKind::Medicine => state.player.health += REMEDY_DELTA,
        ItemKind::Poison => state.player.health -= REMEDY_DELTA,
        ItemKind::Cookie => inv.cookies += 1,
        ItemKind::Umbrella => inv.umbrellas += 1,
        ItemKind::Note => inv.notes += 1,
        ItemKind::KeyShard => {
            if let Some(shards) = inv.key_shards.as_mut() {
                *shards += 1;
            }
        }
    }
    state.set_tile(x, y, Tile::Empty);
    events.push(GameEvent::ItemPicked(kind));
}

/// Standing on an ally with enough nuts feeds it once this tick.
fn resolve_feeding(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.tile_at(state.player.x, state.player.y).is_ally() {
        return;
    }
    if state.player.inventory.nuts >= FEED_COST {
        state.player.inventory.nuts -= FEED_COST;
        state.boss_energy -= FEED_DRAIN;
        events.push(GameEvent::AllyFed { energy_left: state.boss_energy });
    }
}

/// Every minion sharing the player's cell deals full damage, then the
/// player is sent back to spawn.
fn resolve_minion_collision(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let (px, py) = (state.player.x, state.player.y);
    let hits = state.minions.iter().filter(|m| m.x == px && m.y == py).count();
    if hits > 0 {
        state.player.health -= MINION_DAMAGE * hits as i32;
        state.player.respawn();
        events.push(GameEvent::MinionHit { count: hits });
    }
}

/// Barrier drop (latched, exactly once) and boss contact.
fn resolve_boss(state: &mut GameState, gate: &mut dyn Gate, events: &mut Vec<GameEvent>) {
    if !level::spec(state.level).has_boss {
        return;
    }

    if !state.barrier_cleared && state.boss_energy == BARRIER_THRESHOLD {
        for y in 0..state.height {
            for x in 0..state.width {
                if state.tiles[y][x] == Tile::Hazard {
                    state.tiles[y][x] = Tile::Empty;
                }
            }
        }
        state.barrier_cleared = true;
        events.push(GameEvent::BarrierDown);
    }

    let inside = BOSS_REGION_X.contains(&state.player.x) && BOSS_REGION_Y.contains(&state.player.y);
    if inside {
        let won = gate.run(crate::challenge::ChallengeKind::Deduce);
        state.player.respawn();
        if won {
            state.boss_energy = 0;
            events.push(GameEvent::BossDefeated);
        }
    }
}

/// Clear the exit barrier band once the level's thresholds hold. Runs
/// every tick; re-clearing empty cells is harmless.
fn resolve_exit_barrier(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let barrier = match level::spec(state.level).barrier {
        Some(b) => b,
        None => return,
    };
    let inv = &state.player.inventory;
    if inv.nuts < barrier.nuts {
        return;
    }
    if let Some(lamps) = barrier.lamps {
        if state.lamps_lit != lamps {
            return;
        }
    }
    if let Some(shards) = barrier.shards {
        if inv.key_shards != Some(shards) {
            return;
        }
    }

    let mut cleared = false;
    for y in EXIT_BARRIER_Y {
        for x in EXIT_BARRIER_X {
            if state.tiles[y][x] == Tile::Hazard {
                state.tiles[y][x] = Tile::Empty;
                cleared = true;
            }
        }
    }
    if cleared {
        events.push(GameEvent::ExitOpened);
    }
}

// ══════════════════════════════════════════════════════════════
// Lifecycle
// ══════════════════════════════════════════════════════════════

fn resolve_lifecycle(
    state: &mut GameState,
    gate: &mut dyn Gate,
    levels_dir: &Path,
    events: &mut Vec<GameEvent>,
) -> Result<(), GameError> {
    // Loss is checked once per tick, after all interactions, so health
    // may go negative transiently within the tick.
    if state.player.health <= 0 {
        state.phase = Phase::Lost;
        return Ok(());
    }

    let done = match level::spec(state.level).exit {
        ExitRule::Portal(kind) => {
            state.tile_at(state.player.x, state.player.y) == Tile::Portal && gate.run(kind)
        }
        ExitRule::BossDefeated => state.boss_energy == 0,
    };

    if done {
        events.push(GameEvent::LevelComplete { level: state.level });
        let next = state.level + 1;
        if next > FINAL_LEVEL {
            state.phase = Phase::Won;
        } else {
            level::enter_level(state, next, levels_dir)?;
        }
    }
    Ok(())
}
