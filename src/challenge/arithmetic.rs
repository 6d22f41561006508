/// Sum-two-numbers: the level 2 portal challenge. Each round poses a new
/// sum with a 15 second allowance; a timeout or wrong answer starts a
/// fresh round, so the call only returns once the player succeeds.

use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use super::{clear_screen, read_number};

const TIME_LIMIT: Duration = Duration::from_secs(15);

pub fn play() -> bool {
    loop {
        clear_screen();
        println!("*** Add 2 numbers! ***");
        println!("    You have 15 seconds.");
        println!();

        let mut rng = rand::thread_rng();
        let a: u32 = rng.gen_range(100..1000);
        let b: u32 = rng.gen_range(100..1000);
        println!("{a} + {b} = ");

        let round_start = Instant::now();
        loop {
            let guess = read_number("> ");
            if round_start.elapsed() > TIME_LIMIT {
                println!("You've exceeded the time. Try again.");
                thread::sleep(Duration::from_secs(2));
                break; // new round
            }
            if guess == a + b {
                println!("Well done!");
                thread::sleep(Duration::from_secs(2));
                return true;
            }
            println!("Wrong answer. Try again");
        }
    }
}
