//! Drawing intents. The core never touches pixels: it describes what must be
//! on screen as a flat list of primitives for whatever renderer sits on top.

use crate::bosses::intro_commands as boss_intro;
use crate::constants::{colors, playfield};
use crate::entities::{
    BossKind, Bullet, Minion, MinionKind, Pickup, PickupKind, Rgba, Shape, SimulationContext,
};
use crate::geometry::{star_points, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Circle { radius: f32 },
    Ellipse { rx: f32, ry: f32 },
    Rect { w: f32, h: f32 },
    /// Points relative to the command position, before rotation.
    Polygon { points: Vec<Vec2> },
    /// Absolute end point; `pos` is the start.
    Line { to: Vec2, width: f32 },
    Text { text: String, size: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub pos: Vec2,
    pub rotation: f32,
    pub color: Rgba,
    pub filled: bool,
}

impl DrawCommand {
    fn new(primitive: Primitive, pos: Vec2, color: Rgba) -> Self {
        DrawCommand { primitive, pos, rotation: 0.0, color, filled: true }
    }

    pub fn circle(pos: Vec2, radius: f32, color: Rgba) -> Self {
        DrawCommand::new(Primitive::Circle { radius }, pos, color)
    }

    pub fn ellipse(pos: Vec2, rx: f32, ry: f32, color: Rgba) -> Self {
        DrawCommand::new(Primitive::Ellipse { rx, ry }, pos, color)
    }

    pub fn rect(pos: Vec2, w: f32, h: f32, color: Rgba) -> Self {
        DrawCommand::new(Primitive::Rect { w, h }, pos, color)
    }

    pub fn polygon(pos: Vec2, points: Vec<Vec2>, color: Rgba) -> Self {
        DrawCommand::new(Primitive::Polygon { points }, pos, color)
    }

    pub fn line(from: Vec2, to: Vec2, width: f32, color: Rgba) -> Self {
        DrawCommand::new(Primitive::Line { to, width }, from, color)
    }

    pub fn text(pos: Vec2, text: impl Into<String>, size: f32, color: Rgba) -> Self {
        DrawCommand::new(Primitive::Text { text: text.into(), size }, pos, color)
    }

    pub fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn outline(mut self) -> Self {
        self.filled = false;
        self
    }
}

// ── Whole frame ───────────────────────────────────────────────────────────────

/// Everything gameplay needs on screen, back to front.
pub fn frame_commands(state: &SimulationContext) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    let arena = &state.arena;

    for trap in &arena.sand_traps {
        out.push(DrawCommand::circle(trap.pos, trap.radius, colors::SAND_TRAP));
    }
    for blocker in &arena.blockers {
        out.push(DrawCommand::rect(
            blocker.center,
            blocker.half_w * 2.0,
            blocker.half_h * 2.0,
            colors::BLOCKER,
        ));
    }
    for orb in &arena.stasis_orbs {
        out.push(DrawCommand::circle(orb.pos, orb.radius, colors::STASIS_ORB).outline());
    }

    if state.boss.body.active {
        out.extend(state.boss.draw(state.frame, state.stage));
    }

    out.extend(arena.minions.iter().map(minion_command));
    out.extend(arena.pickups.iter().flat_map(pickup_commands));
    out.extend(arena.enemy_bullets.iter().map(bullet_command));
    out.extend(arena.player_bullets.iter().map(bullet_command));

    out.extend(player_commands(state));

    for p in &arena.particles {
        let color = p.color.with_alpha((p.life.clamp(0.0, 1.0) * 255.0) as u8);
        let cmd = DrawCommand::circle(p.pos, p.size, color);
        out.push(if p.shockwave { cmd.outline() } else { cmd });
    }

    if state.time_scale.is_frozen() {
        out.push(DrawCommand::rect(
            Vec2::new(playfield::WIDTH / 2.0, playfield::HEIGHT / 2.0),
            playfield::WIDTH,
            playfield::HEIGHT,
            Rgba::rgba(120, 120, 120, 60),
        ));
        out.push(DrawCommand::text(
            Vec2::new(playfield::WIDTH / 2.0, playfield::HEIGHT / 2.0),
            "TIME STOPPED",
            32.0,
            colors::BOSS_HOURGLASS,
        ));
    }
    if arena.effects.glitch_frames > 0 {
        // deterministic slices so the frame list stays a pure function of state
        for i in 0..5u64 {
            let y = ((state.frame * 37 + i * 113) % playfield::HEIGHT as u64) as f32;
            out.push(DrawCommand::rect(
                Vec2::new(playfield::WIDTH / 2.0, y),
                playfield::WIDTH,
                4.0 + i as f32 * 3.0,
                colors::BOSS_HOURGLASS.with_alpha(70),
            ));
        }
    }
    out
}

/// Entrance animation for a boss; `progress` runs 0.0 → 1.0. `None` for
/// variants that simply appear.
pub fn intro_commands(kind: BossKind, progress: f32) -> Option<Vec<DrawCommand>> {
    boss_intro(kind, progress.clamp(0.0, 1.0))
}

fn bullet_command(b: &Bullet) -> DrawCommand {
    match b.shape {
        Shape::Circle | Shape::Heal => DrawCommand::circle(b.pos, b.radius, b.color),
        Shape::Rect => DrawCommand::rect(b.pos, b.radius * 2.5, b.radius * 1.2, b.color).rotated(b.angle),
        Shape::Triangle => DrawCommand::polygon(
            b.pos,
            vec![Vec2::new(10.0, 0.0), Vec2::new(-6.0, -7.0), Vec2::new(-6.0, 7.0)],
            b.color,
        )
        .rotated(b.angle),
        Shape::Knife => DrawCommand::polygon(
            b.pos,
            vec![Vec2::new(12.0, 0.0), Vec2::new(-8.0, -3.0), Vec2::new(-8.0, 3.0)],
            b.color,
        )
        .rotated(b.angle),
        Shape::Meteor => DrawCommand::circle(b.pos, 15.0, b.color),
        Shape::Star => DrawCommand::polygon(b.pos, star_points(5, b.radius * 1.4, b.radius * 0.6, 0.0), b.color)
            .rotated(b.angle),
        Shape::Binary => DrawCommand::text(b.pos, if (b.pos.x as i32) % 2 == 0 { "0" } else { "1" }, 12.0, b.color),
    }
}

fn minion_command(m: &Minion) -> DrawCommand {
    match m.kind {
        MinionKind::Drone => DrawCommand::rect(m.pos, m.radius * 2.0, m.radius * 2.0, colors::MINION),
        MinionKind::Swooper => DrawCommand::polygon(
            m.pos,
            vec![Vec2::new(0.0, m.radius), Vec2::new(-m.radius, -m.radius), Vec2::new(m.radius, -m.radius)],
            colors::MINION,
        ),
        MinionKind::Orbiter => DrawCommand::circle(m.pos, m.radius, colors::BOSS_TRIANGLE),
        MinionKind::MiniBoss => DrawCommand::circle(m.pos, m.radius, colors::MINI_BOSS),
        MinionKind::LustOrb => DrawCommand::circle(m.pos, m.radius, colors::LUST_ORB),
    }
}

fn pickup_commands(p: &Pickup) -> Vec<DrawCommand> {
    let (label, color) = match p.kind {
        PickupKind::Spread => ("S", colors::BULLET_GOLD),
        PickupKind::Rapid => ("R", colors::BULLET_ORANGE),
        PickupKind::Homing => ("H", colors::BULLET_PURPLE),
        PickupKind::ShieldCharge => ("O", colors::SHIELD),
        // traps look like heals on purpose
        PickupKind::Heal | PickupKind::Trap => ("+", colors::MATH_HEAL),
    };
    vec![
        DrawCommand::circle(p.pos, p.radius, color).outline(),
        DrawCommand::text(p.pos, label, 12.0, color),
    ]
}

fn player_commands(state: &SimulationContext) -> Vec<DrawCommand> {
    let p = &state.player;
    // blink while invulnerable
    if p.invulnerable > 0 && (state.frame / 4) % 2 == 0 {
        return Vec::new();
    }
    let color = if p.frozen { colors::STASIS_ORB } else { colors::PLAYER };
    let mut out = vec![DrawCommand::polygon(
        p.pos,
        vec![Vec2::new(0.0, -p.radius * 1.5), Vec2::new(-p.radius, p.radius), Vec2::new(p.radius, p.radius)],
        color,
    )];
    if p.shield_timer > 0 {
        out.push(DrawCommand::circle(p.pos, p.radius * 3.0, colors::SHIELD).outline());
    }
    out
}
