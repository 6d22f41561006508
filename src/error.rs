/// Error taxonomy.
///
/// Only resource problems are recoverable errors worth a type: a missing
/// or malformed level aborts startup or a level transition. Invariant
/// violations (out-of-range positions) panic at the site. Blocked moves,
/// already-lit lamps and insufficient nuts are ordinary outcomes, not
/// errors.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("level {level} resource missing: {source}")]
    LevelMissing {
        level: u8,
        #[source]
        source: io::Error,
    },

    #[error("level {level} is malformed: {reason}")]
    MalformedLevel { level: u8, reason: String },

    #[error("level {level} has no room left for placement ({needed} needed, {free} free)")]
    BoardFull { level: u8, needed: usize, free: usize },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
