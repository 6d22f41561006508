/// Full-screen interludes shown outside the main loop: the intro, the
/// per-level title cards, the inventory screen and the end sequences.
/// All of these run in cooked mode; the caller toggles raw mode around
/// them.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::style::Color;

use crate::challenge::{clear_screen, read_line};
use crate::domain::entity::Player;

const INTRO: &str = include_str!("../../assets/intro.txt");
const TITLES: &str = include_str!("../../assets/levels_title.txt");
const END_IMAGES: &str = include_str!("../../assets/end_images.txt");

const CHALLENGE_BANNER: usize = 4;
const BOSS_BANNER: usize = 5;

/// Sections inside an asset file are separated by a line of `***`.
fn section(file: &str, idx: usize) -> &str {
    file.split("***").nth(idx).unwrap_or("").trim_matches('\n')
}

pub fn intro() {
    clear_screen();
    println!("{}", INTRO);
    println!();
    println!("Press Enter to begin...");
    let _ = read_line();
}

pub fn level_title(level: u8) {
    clear_screen();
    println!("{}", section(TITLES, (level as usize).saturating_sub(1)));
    io::stdout().flush().ok();
    thread::sleep(Duration::from_millis(1500));
}

pub fn challenge_banner() {
    clear_screen();
    println!("{}", section(TITLES, CHALLENGE_BANNER));
    io::stdout().flush().ok();
    thread::sleep(Duration::from_millis(1200));
}

pub fn boss_banner() {
    clear_screen();
    println!("{}", section(TITLES, BOSS_BANNER));
    io::stdout().flush().ok();
    thread::sleep(Duration::from_millis(1200));
}

pub fn create_character(start_health: i32) -> Player {
    clear_screen();
    println!("Name your squirrel:");
    let mut name = read_line();
    if name.is_empty() {
        name = "Squirrel".to_string();
    }
    name.truncate(10);

    println!("Pick a fur color: 1) red  2) green  3) yellow");
    let color = loop {
        match read_line().as_str() {
            "1" => break Color::Red,
            "2" => break Color::Green,
            "3" => break Color::Yellow,
            _ => println!("Enter 1, 2 or 3."),
        }
    };
    Player::new(name, color, start_health)
}

/// Inventory breakdown with carry weights. Nuts are food, the rest is
/// either loot or a tool.
pub fn info_screen(player: &Player) {
    clear_screen();
    let inv = &player.inventory;
    let mut weight = inv.nuts as f32 * 0.1;
    println!("{:12} {:>6} {:>8} {:>8}", "item", "count", "kind", "weight");
    println!("{:12} {:>6} {:>8} {:>8.1}", "nuts", inv.nuts, "food", inv.nuts as f32 * 0.1);
    for (label, count) in [
        ("cookies", inv.cookies),
        ("umbrellas", inv.umbrellas),
        ("notes", inv.notes),
    ] {
        weight += count as f32 * 0.5;
        println!("{:12} {:>6} {:>8} {:>8.1}", label, count, "treasure", count as f32 * 0.5);
    }
    if let Some(shards) = inv.key_shards {
        weight += shards as f32 * 0.25;
        println!("{:12} {:>6} {:>8} {:>8.2}", "key shards", shards, "tool", shards as f32 * 0.25);
    }
    println!();
    println!("total weight: {:.2}", weight);
    println!("health: {}", player.health);
    println!();
    println!("Press Enter to return...");
    let _ = read_line();
}

/// The closing slideshow. Images 0..3 tell the losing story, 3..6 the
/// winning one.
pub fn ending(won: bool) {
    let range = if won { 3..6 } else { 0..3 };
    for idx in range {
        clear_screen();
        println!("{}", section(END_IMAGES, idx));
        io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(1800));
    }
}

pub fn show_scores(table: &str) {
    clear_screen();
    println!("{}", table);
    println!();
    println!("Press Enter to exit...");
    let _ = read_line();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_file_has_six_sections() {
        assert!(TITLES.split("***").count() >= 6);
        assert!(!section(TITLES, BOSS_BANNER).is_empty());
    }

    #[test]
    fn end_images_cover_both_outcomes() {
        assert!(END_IMAGES.split("***").count() >= 6);
        for idx in 0..6 {
            assert!(!section(END_IMAGES, idx).is_empty());
        }
    }

    #[test]
    fn section_out_of_range_is_empty() {
        assert_eq!(section("a***b", 5), "");
    }
}
