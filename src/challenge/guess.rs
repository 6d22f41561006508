/// Guess-a-number: the level 1 portal challenge.
/// Loops until the number is found, so it always resolves to a win.

use std::thread;
use std::time::Duration;

use rand::Rng;

use super::{clear_screen, read_number};

pub fn play() -> bool {
    clear_screen();
    println!("*** Guess the number! ***");
    println!("    I'm thinking about a number between 1 and 30. Try to guess it.");

    let number: u32 = rand::thread_rng().gen_range(1..=30);
    loop {
        let guess = read_number("> ");
        if guess > number {
            println!("{guess} is too high");
        } else if guess < number {
            println!("{guess} is too low");
        } else {
            println!();
            println!("Congratulations! You've guessed my number.");
            thread::sleep(Duration::from_secs(2));
            return true;
        }
    }
}
