/// Deduce-a-3-digit-code: the boss fight. Ten guesses at a code of three
/// distinct digits, with hot/warm/cold hints after each guess. This is
/// the one challenge the player can lose.

use std::io::{self, Write};

use rand::seq::SliceRandom;

use super::{clear_screen, read_line};

const MAX_TURNS: u32 = 10;

/// Hint for one guess: digits in the right place, and digits present but
/// misplaced.
fn score(code: &str, guess: &str) -> (usize, usize) {
    let mut hot = 0;
    let mut warm = 0;
    for (i, c) in code.chars().enumerate() {
        if guess.chars().nth(i) == Some(c) {
            hot += 1;
        } else if guess.contains(c) {
            warm += 1;
        }
    }
    (hot, warm)
}

fn generate_code() -> String {
    let mut digits: Vec<u8> = (b'0'..=b'9').collect();
    digits.shuffle(&mut rand::thread_rng());
    digits[..3].iter().map(|&b| char::from(b)).collect()
}

/// Prompt until the user types exactly three digits.
fn read_guess() -> String {
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let line = read_line();
        if line.len() == 3 && line.chars().all(|c| c.is_ascii_digit()) {
            return line;
        }
        println!("Try again! You should provide only a 3-digit number!");
    }
}

pub fn play() -> bool {
    clear_screen();
    println!("    I am thinking of a 3-digit number. Try to guess what it is.");
    println!();
    println!("    Here are some clues:");
    println!();
    println!("      Cold    No digit is correct.");
    println!("      Warm    One digit is correct but in the wrong position.");
    println!("      Hot     One digit is correct and in the right position.");
    println!();
    println!("    I have thought up a number. You have {MAX_TURNS} guesses to get it.");

    let code = generate_code();
    for turn in 1..=MAX_TURNS {
        println!("Guess #{turn}");
        let guess = read_guess();
        let (hot, warm) = score(&code, &guess);
        if hot == 3 {
            println!("You got it!");
            return true;
        }
        if hot + warm == 0 {
            println!("cold");
        } else {
            println!("{}{}", "hot ".repeat(hot), "warm ".repeat(warm));
        }
    }
    println!("You lost!");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_has_three_distinct_digits() {
        for _ in 0..20 {
            let code = generate_code();
            assert_eq!(code.len(), 3);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            let mut sorted = code.chars().collect::<Vec<_>>();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 3);
        }
    }

    #[test]
    fn scoring_matches_hints() {
        assert_eq!(score("123", "123"), (3, 0));
        assert_eq!(score("123", "321"), (1, 2));
        assert_eq!(score("123", "456"), (0, 0));
        assert_eq!(score("123", "145"), (1, 0));
        assert_eq!(score("123", "312"), (0, 3));
    }
}
