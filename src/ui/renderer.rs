/// Presentation layer: maps cell variants to glyph/color and draws one
/// frame per tick. The simulation never sees a glyph or an escape code;
/// everything visual is decided here.
///
/// Layout per frame:
///   - the 120x40 board, with minions and the avatar composited over
///     their cells (the grid itself is never written to)
///   - the header overlay in the column band right of the board
///   - a transient message line underneath the board

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::tile::{BossPart, ItemKind, Tile};
use crate::sim::world::GameState;

/// Column where the header overlay starts.
const HEADER_X: u16 = 121;

const ALLY_GLYPHS: [char; 5] = ['☹', '☃', '♞', '☻', '☬'];

pub struct Renderer {
    out: BufWriter<Stdout>,
}

fn glyph_for(tile: Tile) -> (char, Color) {
    match tile {
        Tile::Empty => (' ', Color::Reset),
        Tile::Wall => ('X', Color::White),
        Tile::Hazard => ('#', Color::Red),
        Tile::Portal => ('⇵', Color::Cyan),
        Tile::Item(ItemKind::Nut) => ('●', Color::Yellow),
        Tile::Item(ItemKind::Multiplier) => ('⚛', Color::Blue),
        Tile::Item(ItemKind::Medicine) => ('✡', Color::Blue),
        Tile::Item(ItemKind::Poison) => ('✿', Color::Red),
        Tile::Item(ItemKind::Cookie) => ('☯', Color::Green),
        Tile::Item(ItemKind::Umbrella) => ('☂', Color::Green),
        Tile::Item(ItemKind::Note) => ('♫', Color::Green),
        Tile::Item(ItemKind::KeyShard) => ('℥', Color::Green),
        Tile::Lamp { lit: false } => ('☀', Color::Yellow),
        Tile::Lamp { lit: true } => ('☀', Color::Red),
        Tile::Ally(i) => (ALLY_GLYPHS[i as usize % ALLY_GLYPHS.len()], Color::White),
        Tile::Boss(BossPart::Fur) => ('&', Color::Blue),
        Tile::Boss(BossPart::Shade) => ('*', Color::DarkGrey),
        Tile::Boss(BossPart::Glow) => ('%', Color::Yellow),
    }
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { out: BufWriter::new(io::stdout()) }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Clear whatever previous screens left behind (intro, challenges).
    pub fn full_clear(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    pub fn render(&mut self, state: &GameState) -> io::Result<()> {
        for y in 0..state.height {
            queue!(self.out, MoveTo(0, y as u16))?;
            let mut current = Color::Reset;
            for x in 0..state.width {
                let (mut ch, mut color) = glyph_for(state.tiles[y][x]);
                if state.minion_at(x, y) {
                    ch = 'ᴥ';
                    color = Color::Red;
                }
                if (x, y) == (state.player.x, state.player.y) {
                    ch = '@';
                    color = state.player.color;
                }
                if color != current {
                    queue!(self.out, SetForegroundColor(color))?;
                    current = color;
                }
                queue!(self.out, Print(ch))?;
            }
            queue!(self.out, ResetColor)?;
        }

        self.render_header(state)?;
        self.render_message(state)?;
        self.out.flush()
    }

    /// Status fields at their fixed offsets in the header region.
    fn render_header(&mut self, state: &GameState) -> io::Result<()> {
        let fields: Vec<(u16, String)> = vec![
            (0, format!("Level: {}", state.level)),
            (1, format!("Player: {}", state.player.name)),
            (2, format!("Health: {}", state.player.health)),
            (3, {
                let secs = state.elapsed_secs();
                format!("Time: {}:{:02}", secs / 60, secs % 60)
            }),
            (6, format!("● : {}", state.player.inventory.nuts)),
            (7, format!("Treasures found:  {}", state.player.inventory.treasures())),
        ];
        for (row, text) in fields {
            queue!(
                self.out,
                MoveTo(HEADER_X, row),
                Clear(ClearType::UntilNewLine),
                Print(text)
            )?;
        }
        if state.level == 4 {
            queue!(
                self.out,
                MoveTo(HEADER_X, 4),
                Clear(ClearType::UntilNewLine),
                Print(format!("Boss energy: {}", state.boss_energy))
            )?;
        }
        Ok(())
    }

    fn render_message(&mut self, state: &GameState) -> io::Result<()> {
        queue!(self.out, MoveTo(0, state.height as u16), Clear(ClearType::CurrentLine))?;
        if state.message_timer > 0 {
            queue!(self.out, Print(&state.message))?;
        }
        Ok(())
    }
}
