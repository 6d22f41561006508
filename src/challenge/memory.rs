/// Remember-a-number: the level 3 portal challenge. A nine-digit
/// "telephone number" is shown for five seconds, then must be typed back
/// in the same 3-digit grouping. Rounds repeat until the player gets one
/// right.

use std::thread;
use std::time::Duration;

use rand::Rng;

use super::{clear_screen, read_line};

fn instructions() {
    clear_screen();
    println!("*** Remember the telephone number!");
    println!("    Write it down in the same format (divided into 3-digit blocks) ***");
    println!();
}

fn generate_number() -> String {
    let mut rng = rand::thread_rng();
    let blocks: Vec<String> = (0..3)
        .map(|_| (0..3).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect())
        .collect();
    blocks.join(" ")
}

pub fn play() -> bool {
    loop {
        instructions();
        let number = generate_number();
        println!("telephone:  {number}");
        thread::sleep(Duration::from_secs(5));

        instructions();
        let guess = read_line();
        if guess == number {
            println!("Well done!");
            thread::sleep(Duration::from_secs(2));
            return true;
        }
        println!("Wrong answer. Try again");
        thread::sleep(Duration::from_secs(2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_number_is_grouped() {
        let n = generate_number();
        assert_eq!(n.len(), 11);
        let blocks: Vec<&str> = n.split(' ').collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.len() == 3 && b.chars().all(|c| c.is_ascii_digit())));
    }
}
