/// High-score store: a flat ordered list in a text file.
///
/// One line per score, ` | `-separated columns:
///   `name       |   M:SS |   health | YYYY-MM-DD`
/// Ordering: elapsed time ascending, then health descending; the file is
/// truncated to the top 10 on every write. Unparseable lines are dropped
/// rather than aborting the table.

use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;

const MAX_ENTRIES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub secs: u64,
    pub health: i32,
    pub date: String,
}

impl ScoreEntry {
    fn time_column(&self) -> String {
        format!("{:3}:{:02}", self.secs / 60, self.secs % 60)
    }

    fn to_line(&self) -> String {
        format!(
            "{:10} | {} | {:5} | {}",
            self.name,
            self.time_column(),
            self.health,
            self.date
        )
    }

    fn parse(line: &str) -> Option<ScoreEntry> {
        let cols: Vec<&str> = line.split('|').map(str::trim).collect();
        if cols.len() != 4 {
            return None;
        }
        let (m, s) = cols[1].split_once(':')?;
        let secs = m.trim().parse::<u64>().ok()? * 60 + s.trim().parse::<u64>().ok()?;
        let health = cols[2].parse::<i32>().ok()?;
        Some(ScoreEntry {
            name: cols[0].to_string(),
            secs,
            health,
            date: cols[3].to_string(),
        })
    }
}

/// Read the table. A missing file is an empty table, not an error.
pub fn load(path: &Path) -> Vec<ScoreEntry> {
    match fs::read_to_string(path) {
        Ok(text) => text.lines().filter_map(ScoreEntry::parse).collect(),
        Err(_) => vec![],
    }
}

fn sort_and_truncate(scores: &mut Vec<ScoreEntry>) {
    scores.sort_by(|a, b| a.secs.cmp(&b.secs).then(b.health.cmp(&a.health)));
    scores.truncate(MAX_ENTRIES);
}

/// Append a finished run, re-sort, truncate, persist. Returns the table
/// as written so the caller can display it.
pub fn record(
    path: &Path,
    name: &str,
    health: i32,
    secs: u64,
) -> io::Result<Vec<ScoreEntry>> {
    let mut scores = load(path);
    scores.push(ScoreEntry {
        name: name.to_string(),
        secs,
        health,
        date: Local::now().date_naive().to_string(),
    });
    sort_and_truncate(&mut scores);

    let mut text = String::new();
    for entry in &scores {
        text.push_str(&entry.to_line());
        text.push('\n');
    }
    fs::write(path, text)?;
    Ok(scores)
}

/// Render the table for the end-of-game screen.
pub fn render(scores: &[ScoreEntry]) -> String {
    let mut out = String::from("\nHigh scores\n");
    let head = format!("{:10} | {:6} | {:6} | {:10}", "name", "time", "health", "date");
    out.push_str(&"-".repeat(head.len()));
    out.push('\n');
    out.push_str(&head);
    out.push('\n');
    out.push_str(&"-".repeat(head.len()));
    out.push('\n');
    for entry in scores {
        out.push_str(&entry.to_line());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, secs: u64, health: i32) -> ScoreEntry {
        ScoreEntry {
            name: name.into(),
            secs,
            health,
            date: "2026-08-30".into(),
        }
    }

    #[test]
    fn sorts_time_ascending_then_health_descending() {
        let mut scores = vec![entry("slow", 300, 90), entry("fast", 120, 10), entry("tough", 120, 80)];
        sort_and_truncate(&mut scores);
        let names: Vec<&str> = scores.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["tough", "fast", "slow"]);
    }

    #[test]
    fn keeps_only_top_ten() {
        let mut scores: Vec<ScoreEntry> = (0..15).map(|i| entry("x", i * 10, 50)).collect();
        sort_and_truncate(&mut scores);
        assert_eq!(scores.len(), 10);
        assert_eq!(scores.last().unwrap().secs, 90);
    }

    #[test]
    fn line_round_trip() {
        let e = entry("Hazel", 125, 85);
        let parsed = ScoreEntry::parse(&e.to_line()).unwrap();
        assert_eq!(parsed, e);
    }

    #[test]
    fn garbage_lines_are_dropped() {
        assert_eq!(ScoreEntry::parse(""), None);
        assert_eq!(ScoreEntry::parse("no pipes here"), None);
        assert_eq!(ScoreEntry::parse("a | b | c | d"), None);
    }
}
