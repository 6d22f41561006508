/// Entry point and tick driver.

mod challenge;
mod config;
mod domain;
mod error;
mod score;
mod sim;
mod ui;

use std::time::Duration;

use challenge::TerminalGate;
use config::GameConfig;
use domain::entity::FrameInput;
use domain::tile::ItemKind;
use error::GameError;
use sim::event::GameEvent;
use sim::level;
use sim::step;
use sim::world::{GameState, Phase};
use ui::input::{self, PlayerAction};
use ui::renderer::Renderer;
use ui::screens;

fn main() {
    let config = GameConfig::load();

    let player = screens::create_character(config.player.start_health);
    screens::intro();

    let mut state = GameState::new(player, config.seed);
    if let Err(e) = level::enter_level(&mut state, 1, &config.levels_dir) {
        eprintln!("Could not start level 1: {e}");
        return;
    }
    screens::level_title(1);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut state, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
        return;
    }

    finish(&state, &config);
}

fn game_loop(
    state: &mut GameState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), GameError> {
    let mut gate = TerminalGate;
    let timeout = Duration::from_millis(config.timing.input_timeout_ms);

    while state.phase == Phase::Playing {
        renderer.render(state)?;

        // Minions wander whether or not a key arrives in time.
        step::move_minions(state);

        let movement = match input::read_action(timeout)? {
            Some(PlayerAction::Quit) => {
                state.phase = Phase::Quit;
                break;
            }
            Some(PlayerAction::Info) => {
                let _ = crossterm::terminal::disable_raw_mode();
                screens::info_screen(&state.player);
                let _ = crossterm::terminal::enable_raw_mode();
                renderer.full_clear()?;
                None
            }
            Some(PlayerAction::Move(dir)) => Some(dir),
            None => None,
        };

        let level_before = state.level;
        let events = step::resolve(
            state,
            FrameInput { movement },
            &mut gate,
            &config.levels_dir,
        )?;
        announce(state, &events);

        if state.message_timer > 0 {
            state.message_timer -= 1;
            if state.message_timer == 0 {
                state.message.clear();
            }
        }

        // A challenge or a level switch leaves foreign text on screen.
        if state.level != level_before && state.phase == Phase::Playing {
            let _ = crossterm::terminal::disable_raw_mode();
            screens::level_title(state.level);
            let _ = crossterm::terminal::enable_raw_mode();
        }
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::LevelComplete { .. } | GameEvent::BossDefeated))
            || state.level != level_before
        {
            renderer.full_clear()?;
        }
    }
    Ok(())
}

/// Turn tick events into the one-line status message under the board.
fn announce(state: &mut GameState, events: &[GameEvent]) {
    for event in events {
        let text = match event {
            GameEvent::ItemPicked(kind) => match kind {
                ItemKind::Nut => "You found a nut.".to_string(),
                ItemKind::Multiplier => "A nut multiplier! +20 nuts.".to_string(),
                ItemKind::Medicine => "Medicine. You feel a bit better.".to_string(),
                ItemKind::Poison => "Poison berries! You feel sick.".to_string(),
                ItemKind::Cookie => "A fortune cookie for your stash.".to_string(),
                ItemKind::Umbrella => "A tiny umbrella for your stash.".to_string(),
                ItemKind::Note => "A sheet of old music for your stash.".to_string(),
                ItemKind::KeyShard => "A key shard. It might fit something.".to_string(),
            },
            GameEvent::LampLit { .. } => "A lamp flickers to life.".to_string(),
            GameEvent::HazardHit => "Ouch! The thorns sting.".to_string(),
            GameEvent::AllyFed { energy_left } => {
                format!("A hamster devours your nuts. Boss energy: {energy_left}")
            }
            GameEvent::MinionHit { count } if *count > 1 => {
                format!("{count} rats bite you at once!")
            }
            GameEvent::MinionHit { .. } => "A rat bites you!".to_string(),
            GameEvent::BarrierDown => "The thorn barricade withers away!".to_string(),
            GameEvent::ExitOpened => "The way out is open!".to_string(),
            GameEvent::BossDefeated => "The Great Hamster collapses!".to_string(),
            GameEvent::LevelComplete { level } => format!("Level {level} cleared!"),
        };
        state.set_message(&text, 8);
    }
}

/// Post-game: closing slideshow, then the score table. Only a finished
/// run is recorded; a loss still shows the existing table.
fn finish(state: &GameState, config: &GameConfig) {
    match state.phase {
        Phase::Won => {
            screens::ending(true);
            let table = match score::record(
                &config.highscores_file,
                &state.player.name,
                state.player.health,
                state.elapsed_secs(),
            ) {
                Ok(scores) => score::render(&scores),
                Err(_) => score::render(&score::load(&config.highscores_file)),
            };
            screens::show_scores(&table);
        }
        Phase::Lost => {
            screens::ending(false);
            let scores = score::load(&config.highscores_file);
            screens::show_scores(&score::render(&scores));
        }
        Phase::Quit | Phase::Playing => {
            println!("Thanks for playing The Day of the Squirrel!");
        }
    }
}
