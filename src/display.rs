/// Rendering layer — all terminal output lives here.
///
/// The game runs in world units (1200 x 800 by default); `Viewport` scales
/// that rectangle onto however many terminal cells are available.  No game
/// logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use alien_invasion::entities::{GameStatus, Rect};
use alien_invasion::game::AlienInvasion;
use alien_invasion::settings::Rgb;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::Rgb { r: 30, g: 30, b: 30 };
const C_SHIP: Color = Color::Rgb { r: 40, g: 60, b: 160 };
const C_ALIEN: Color = Color::Rgb { r: 30, g: 140, b: 60 };
const C_BUTTON: Color = Color::Rgb { r: 0, g: 135, b: 0 };
const C_BUTTON_TEXT: Color = Color::Rgb { r: 255, g: 255, b: 255 };

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Mapping between world coordinates and terminal cells.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_width: i32,
    world_height: i32,
}

/// A rectangle in terminal cells, already clipped to the screen.
struct CellRect {
    col: u16,
    row: u16,
    width: u16,
    height: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: i32, world_height: i32) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(1),
            world_width: world_width.max(1),
            world_height: world_height.max(1),
        }
    }

    /// World point at the centre of a terminal cell.
    pub fn to_world(&self, col: u16, row: u16) -> (i32, i32) {
        let x = ((2 * col as i64 + 1) * self.world_width as i64) / (2 * self.cols as i64);
        let y = ((2 * row as i64 + 1) * self.world_height as i64) / (2 * self.rows as i64);
        (x as i32, y as i32)
    }

    fn to_col(&self, x: i32) -> i64 {
        x as i64 * self.cols as i64 / self.world_width as i64
    }

    fn to_row(&self, y: i32) -> i64 {
        y as i64 * self.rows as i64 / self.world_height as i64
    }

    /// Cells covered by `rect`; every visible rect covers at least one cell.
    fn cells(&self, rect: &Rect) -> Option<CellRect> {
        if rect.right() <= 0
            || rect.bottom() <= 0
            || rect.left() >= self.world_width
            || rect.top() >= self.world_height
        {
            return None;
        }
        let c0 = self.to_col(rect.left()).max(0);
        let r0 = self.to_row(rect.top()).max(0);
        let c1 = self.to_col(rect.right()).max(c0 + 1).min(self.cols as i64);
        let r1 = self.to_row(rect.bottom()).max(r0 + 1).min(self.rows as i64);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16,
            width: (c1 - c0) as u16,
            height: (r1 - r0) as u16,
        })
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    game: &AlienInvasion,
    viewport: &Viewport,
) -> std::io::Result<()> {
    let settings = &game.settings;

    out.queue(style::SetBackgroundColor(rgb(settings.bg_color)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for bullet in &game.bullets {
        fill_rect(out, viewport, &bullet.rect, rgb(settings.bullet_color), '█')?;
    }
    draw_ship(out, viewport, &game.ship.rect)?;
    for alien in &game.aliens {
        draw_alien(out, viewport, &alien.rect)?;
    }
    draw_scoreboard(out, game, viewport)?;

    if game.status == GameStatus::Inactive {
        draw_play_button(out, viewport, &game.play_button)?;
    }

    // Park the cursor: on the button when the pointer is shown, out of the
    // way otherwise.
    let (col, row) = if game.pointer_visible {
        match viewport.cells(&game.play_button) {
            Some(c) => (c.col + c.width / 2, c.row + c.height / 2),
            None => (0, viewport.rows - 1),
        }
    } else {
        (0, viewport.rows - 1)
    };
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(col, row))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    rect: &Rect,
    color: Color,
    glyph: char,
) -> std::io::Result<()> {
    let Some(cells) = viewport.cells(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(cells.width as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for r in 0..cells.height {
        out.queue(cursor::MoveTo(cells.col, cells.row + r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn print_at<W: Write>(out: &mut W, col: u16, row: u16, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, viewport: &Viewport, rect: &Rect) -> std::io::Result<()> {
    let Some(cells) = viewport.cells(rect) else {
        return Ok(());
    };
    // Nose on the first row, hull below:
    //    ▲
    //  ▟███▙
    out.queue(style::SetForegroundColor(C_SHIP))?;
    print_at(out, cells.col + cells.width / 2, cells.row, "▲")?;
    if cells.height > 1 {
        let hull = if cells.width >= 3 {
            format!("▟{}▙", "█".repeat(cells.width as usize - 2))
        } else {
            "█".repeat(cells.width as usize)
        };
        for r in 1..cells.height {
            print_at(out, cells.col, cells.row + r, &hull)?;
        }
    }
    Ok(())
}

fn draw_alien<W: Write>(out: &mut W, viewport: &Viewport, rect: &Rect) -> std::io::Result<()> {
    let Some(cells) = viewport.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_ALIEN))?;
    for r in 0..cells.height {
        // Eyes on the top row, legs on the bottom, body in between.
        let glyph = if r == 0 && cells.height > 1 {
            '▀'
        } else if r + 1 == cells.height && cells.height > 2 {
            '╨'
        } else {
            '█'
        };
        let line: String = std::iter::repeat(glyph).take(cells.width as usize).collect();
        print_at(out, cells.col, cells.row + r, &line)?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_scoreboard<W: Write>(
    out: &mut W,
    game: &AlienInvasion,
    viewport: &Viewport,
) -> std::io::Result<()> {
    let sb = &game.scoreboard;
    let width = viewport.cols;

    // Ships left — top left
    out.queue(style::SetForegroundColor(C_SHIP))?;
    let lives: String = "▲ ".repeat(sb.ships as usize);
    print_at(out, 1, 0, &lives)?;

    out.queue(style::SetForegroundColor(C_TEXT))?;

    // High score — top centre
    let high = format!("High {}", sb.high_score_text);
    let hx = (width / 2).saturating_sub(high.chars().count() as u16 / 2);
    print_at(out, hx, 0, &high)?;

    // Score and level — top right, level underneath
    let sx = width.saturating_sub(sb.score_text.chars().count() as u16 + 1);
    print_at(out, sx, 0, &sb.score_text)?;
    let level = format!("L{}", sb.level_text);
    let lx = width.saturating_sub(level.chars().count() as u16 + 1);
    print_at(out, lx, 1, &level)?;

    Ok(())
}

fn draw_play_button<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    rect: &Rect,
) -> std::io::Result<()> {
    let Some(cells) = viewport.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetBackgroundColor(C_BUTTON))?;
    let blank = " ".repeat(cells.width as usize);
    for r in 0..cells.height {
        print_at(out, cells.col, cells.row + r, &blank)?;
    }

    let label = "Play";
    let lx = cells.col + (cells.width / 2).saturating_sub(label.len() as u16 / 2);
    out.queue(style::SetForegroundColor(C_BUTTON_TEXT))?;
    print_at(out, lx, cells.row + cells.height / 2, label)?;
    out.queue(style::ResetColor)?;
    Ok(())
}
