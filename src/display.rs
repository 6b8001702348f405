/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; drawing intents from `render`
/// are rasterized onto a character grid and the HUD is filled through the
/// `StatusSink` outputs.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use boss_rush::constants::playfield;
use boss_rush::entities::{BossKind, GameStatus, Rgba, SimulationContext};
use boss_rush::geometry::Vec2;
use boss_rush::render::{self, DrawCommand, Primitive};
use boss_rush::status::{publish_status, PlayerStatus, StatusSink, WeaponStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_PLAYER: Color = Color::Cyan;
const C_HUD_BOSS: Color = Color::Red;
const C_HUD_WEAPON: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Rows taken by the HUD above and the hint line below the playfield.
const TOP: u16 = 2;
const BOTTOM: u16 = 2;

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

/// The playfield as a grid of cells. World units map linearly onto it.
struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    fn new(cols: u16, rows: u16) -> Self {
        Canvas { cols, rows, cells: vec![BLANK; cols as usize * rows as usize] }
    }

    fn sx(&self) -> f32 {
        self.cols as f32 / playfield::WIDTH
    }

    fn sy(&self) -> f32 {
        self.rows as f32 / playfield::HEIGHT
    }

    fn to_cell(&self, p: Vec2) -> (i32, i32) {
        ((p.x * self.sx()).floor() as i32, (p.y * self.sy()).floor() as i32)
    }

    /// Centre of a cell back in world units.
    fn to_world(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new((col as f32 + 0.5) / self.sx(), (row as f32 + 0.5) / self.sy())
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, color };
    }

    /// Visit every cell whose centre falls inside the world-space box.
    fn fill_where(&mut self, min: Vec2, max: Vec2, ch: char, color: Color, inside: impl Fn(Vec2) -> bool) {
        let (c0, r0) = self.to_cell(min);
        let (c1, r1) = self.to_cell(max);
        let mut hit = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if inside(self.to_world(col, row)) {
                    self.put(col, row, ch, color);
                    hit = true;
                }
            }
        }
        // too small to cover a cell centre: still show it
        if !hit {
            let (c, r) = self.to_cell(min.lerp(max, 0.5));
            self.put(c, r, ch, color);
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, ch: char, color: Color) {
        let (mut x0, mut y0) = self.to_cell(from);
        let (x1, y1) = self.to_cell(to);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        // long telegraphs run far off screen; bound the walk
        for _ in 0..(self.cols as i32 + self.rows as i32) * 4 {
            self.put(x0, y0, ch, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn text(&mut self, centre: Vec2, text: &str, color: Color) {
        let (c, r) = self.to_cell(centre);
        let start = c - text.chars().count() as i32 / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, r, ch, color);
        }
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        let Some(color) = to_color(cmd.color) else {
            return;
        };
        let pos = cmd.pos;
        match &cmd.primitive {
            Primitive::Circle { radius } => {
                let r = *radius;
                let ch = if cmd.filled { '●' } else { '○' };
                let ring = !cmd.filled;
                self.fill_where(pos - Vec2::new(r, r), pos + Vec2::new(r, r), ch, color, |p| {
                    let d = p.distance(pos);
                    d <= r && (!ring || d >= r - 12.0)
                });
            }
            Primitive::Ellipse { rx, ry } => {
                let (rx, ry) = (*rx, *ry);
                let rot = cmd.rotation;
                let extent = rx.max(ry);
                self.fill_where(pos - Vec2::new(extent, extent), pos + Vec2::new(extent, extent), '▒', color, |p| {
                    let local = Vec2::from_angle(-rot).rotate(p - pos);
                    (local.x / rx).powi(2) + (local.y / ry).powi(2) <= 1.0
                });
            }
            Primitive::Rect { w, h } => {
                let (hw, hh) = (w / 2.0, h / 2.0);
                let ch = if cmd.filled { '█' } else { '□' };
                self.fill_where(pos - Vec2::new(hw, hh), pos + Vec2::new(hw, hh), ch, color, |_| true);
            }
            Primitive::Polygon { points } => {
                let turn = Vec2::from_angle(cmd.rotation);
                let world: Vec<Vec2> = points.iter().map(|p| pos + turn.rotate(*p)).collect();
                if cmd.filled {
                    let (min, max) = bounds(&world);
                    self.fill_where(min, max, '▓', color, |p| point_in_polygon(p, &world));
                } else {
                    for (i, a) in world.iter().enumerate() {
                        let b = world[(i + 1) % world.len()];
                        self.line(*a, b, '·', color);
                    }
                }
            }
            Primitive::Line { to, width } => {
                let ch = if *width >= 8.0 { '█' } else { '░' };
                self.line(pos, *to, ch, color);
            }
            Primitive::Text { text, .. } => self.text(pos, text, color),
        }
    }

    fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current = Color::Reset;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(1, TOP + row))?;
            let line = &self.cells[row as usize * self.cols as usize..(row as usize + 1) * self.cols as usize];
            for cell in line {
                if cell.color != current {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    current = cell.color;
                }
                out.queue(Print(cell.ch))?;
            }
        }
        Ok(())
    }
}

/// Alpha is folded into brightness; nearly transparent colours are skipped.
fn to_color(c: Rgba) -> Option<Color> {
    if c.a < 30 {
        return None;
    }
    let k = c.a as f32 / 255.0;
    let scale = |v: u8| (v as f32 * k) as u8;
    Some(Color::Rgb { r: scale(c.r), g: scale(c.g), b: scale(c.b) })
}

fn bounds(points: &[Vec2]) -> (Vec2, Vec2) {
    points.iter().fold(
        (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN)),
        |(lo, hi), p| (Vec2::new(lo.x.min(p.x), lo.y.min(p.y)), Vec2::new(hi.x.max(p.x), hi.y.max(p.y))),
    )
}

fn point_in_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = poly.len().wrapping_sub(1);
    for i in 0..poly.len() {
        let (a, b) = (poly[i], poly[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Collects the pushed status outputs for one frame.
#[derive(Default)]
struct Hud {
    score: u32,
    player_health: f32,
    boss_health: f32,
    stage: u8,
    weapon: Option<WeaponStatus>,
    player: Option<PlayerStatus>,
    status: GameStatus,
}

impl StatusSink for Hud {
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }
    fn set_player_health(&mut self, percent: f32) {
        self.player_health = percent;
    }
    fn set_boss_health(&mut self, percent: f32) {
        self.boss_health = percent;
    }
    fn set_stage(&mut self, stage: u8) {
        self.stage = stage;
    }
    fn set_weapon(&mut self, weapon: WeaponStatus) {
        self.weapon = Some(weapon);
    }
    fn set_player_status(&mut self, status: PlayerStatus) {
        self.player = Some(status);
    }
    fn set_game_status(&mut self, status: GameStatus) {
        self.status = status;
    }
}

fn bar(percent: f32, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f32).round() as usize;
    format!("{}{}", "█".repeat(filled.min(width)), "░".repeat(width.saturating_sub(filled)))
}

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, boss: BossKind, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>7}  ", hud.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_PLAYER))?;
    out.queue(Print(format!("HP {} ", bar(hud.player_health, 10))))?;
    if let Some(p) = &hud.player {
        let shield = if p.shield_seconds > 0 { format!(" ({}s)", p.shield_seconds) } else { String::new() };
        out.queue(Print(format!("Shield:{}{}  ", "◆".repeat(p.shield_charges as usize), shield)))?;
    }
    if let Some(w) = &hud.weapon {
        out.queue(style::SetForegroundColor(C_HUD_WEAPON))?;
        let timer = if w.remaining_seconds > 0 { format!(" {}s", w.remaining_seconds) } else { String::new() };
        out.queue(Print(format!("{} Lv{}{}", w.name, w.level, timer)))?;
    }

    let boss_line = format!("{} STAGE {}  {}", boss.name().to_uppercase(), hud.stage, bar(hud.boss_health, 20));
    let bx = width.saturating_sub(boss_line.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(bx, 1))?;
    out.queue(style::SetForegroundColor(C_HUD_BOSS))?;
    out.queue(Print(boss_line))?;
    Ok(())
}

// ── Border & hints ────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(BOTTOM)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;
    for row in TOP..height.saturating_sub(BOTTOM) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shield   Q : Quit"))?;
    Ok(())
}

fn draw_end_banner<W: Write>(out: &mut W, hud: &Hud, width: u16, height: u16) -> std::io::Result<()> {
    let (title, color) = match hud.status {
        GameStatus::Victory => ("║   BOSS DEFEATED    ║", Color::Yellow),
        GameStatus::GameOver => ("║    GAME  OVER      ║", Color::Red),
        _ => return Ok(()),
    };
    let score_line = format!("Final Score: {:>7}", hud.score);
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", color),
        (title, color),
        ("╚════════════════════╝", color),
        (&score_line, Color::Yellow),
        ("R - Menu   Q - Quit", Color::White),
    ];
    let cx = width / 2;
    let start = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(msg.chars().count() as u16 / 2), start + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

// ── Public entry points ───────────────────────────────────────────────────────

fn canvas_for(width: u16, height: u16) -> Canvas {
    Canvas::new(width.saturating_sub(2), height.saturating_sub(TOP + BOTTOM))
}

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &SimulationContext) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut hud = Hud::default();
    publish_status(state, &mut hud);

    let mut canvas = canvas_for(width, height);
    for cmd in render::frame_commands(state) {
        canvas.draw(&cmd);
    }
    canvas.flush(out)?;

    draw_border(out, width, height)?;
    draw_hud(out, &hud, state.boss.kind, width)?;
    draw_controls_hint(out, height)?;
    draw_end_banner(out, &hud, width, height)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Entrance animation frame; variants without one show a plain title card.
pub fn render_intro<W: Write>(out: &mut W, kind: BossKind, progress: f32) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut canvas = canvas_for(width, height);
    let commands = render::intro_commands(kind, progress).unwrap_or_default();
    for cmd in &commands {
        canvas.draw(cmd);
    }
    canvas.text(
        Vec2::new(playfield::WIDTH / 2.0, playfield::HEIGHT / 2.0),
        &format!("- {} -", kind.name().to_uppercase()),
        Color::White,
    );
    canvas.flush(out)?;
    draw_border(out, width, height)?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
