/// Sub-challenges: self-contained minigames gating level transitions and
/// the boss fight. The engine only sees the `Gate` trait: one blocking
/// call, one boolean. Tests substitute a scripted gate; the real one
/// drops out of raw mode, talks to the user over stdin, and restores the
/// terminal afterwards.

pub mod arithmetic;
pub mod deduce;
pub mod guess;
pub mod memory;

use std::io::{self, Write};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChallengeKind {
    /// Guess a number between 1 and 30 (level 1 portal).
    Guess,
    /// Sum two three-digit numbers against the clock (level 2 portal).
    Arithmetic,
    /// Reproduce a nine-digit telephone number (level 3 portal).
    Memory,
    /// Deduce a three-digit code from hot/warm/cold hints (boss fight).
    Deduce,
}

pub trait Gate {
    /// Run the challenge to completion and report whether it was solved.
    fn run(&mut self, kind: ChallengeKind) -> bool;
}

/// The interactive implementation used by the real game.
pub struct TerminalGate;

impl Gate for TerminalGate {
    fn run(&mut self, kind: ChallengeKind) -> bool {
        // The board loop runs in raw mode; the prompt loops below want
        // ordinary line-buffered input.
        let _ = crossterm::terminal::disable_raw_mode();
        if kind == ChallengeKind::Deduce {
            crate::ui::screens::boss_banner();
        } else {
            crate::ui::screens::challenge_banner();
        }
        let solved = match kind {
            ChallengeKind::Guess => guess::play(),
            ChallengeKind::Arithmetic => arithmetic::play(),
            ChallengeKind::Memory => memory::play(),
            ChallengeKind::Deduce => deduce::play(),
        };
        let _ = crossterm::terminal::enable_raw_mode();
        solved
    }
}

/// Read one trimmed line from stdin. Returns an empty string on EOF so
/// the prompt loops terminate instead of spinning.
pub(crate) fn read_line() -> String {
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(_) => buf.trim().to_string(),
        Err(_) => String::new(),
    }
}

/// Prompt until the user types a number. Invalid input re-prompts locally
/// and is never reported upward.
pub(crate) fn read_number(prompt: &str) -> u32 {
    loop {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let line = read_line();
        match line.parse::<u32>() {
            Ok(n) => return n,
            Err(_) => println!("Invalid input. You must type a number!"),
        }
    }
}

pub(crate) fn clear_screen() {
    print!("\x1b[2J\x1b[H");
    let _ = io::stdout().flush();
}
