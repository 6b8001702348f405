//! Math: SPIN → RESOLVE → ATTACK → SPIN.
//!
//! SPIN shows decoy digits and is the only window where the hull takes
//! damage. RESOLVE draws an operator from the stage's pool and computes its
//! operands. ATTACK runs the operator's pattern, then SPIN returns with a
//! shorter cooldown each stage.

use std::f32::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::BossContext;
use crate::constants::{colors, playfield};
use crate::entities::{BossBody, Rgba};
use crate::geometry::Vec2;
use crate::patterns;
use crate::render::DrawCommand;

const FIRST_SPIN: u32 = 120;
/// ATTACK tick on which one-shot operators fire.
pub const FIRE_MARK: u32 = 20;
const ATTACK_FRAMES: u32 = 30;
const ZONE_FRAMES: u32 = 120;
const ZONE_WARN_UNTIL: u32 = 60;
const ZONE_DAMAGE: f32 = 2.0;
const SIDE_SHOT_GAP: u32 = 6;
const CLONE_ORBIT: f32 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MathPhase {
    #[default]
    Spin,
    Resolve,
    Attack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    Add,
    Sub,
    Div,
    Mul,
    Pow,
    Mod,
    Factorial,
    Phi,
    Tan,
    Integral,
    Less,
    Greater,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Div => "/",
            Operator::Mul => "x",
            Operator::Pow => "^",
            Operator::Mod => "%",
            Operator::Factorial => "!",
            Operator::Phi => "Φ",
            Operator::Tan => "tan",
            Operator::Integral => "∫",
            Operator::Less => "<",
            Operator::Greater => ">",
        }
    }

    pub fn is_zone(self) -> bool {
        matches!(self, Operator::Less | Operator::Greater)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneAxis {
    X,
    Y,
}

/// Half-plane that turns lethal once the warning runs out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DangerZone {
    pub axis: ZoneAxis,
    pub split: f32,
    /// `true` for the `<` side of the split.
    pub below: bool,
}

impl DangerZone {
    pub fn contains(&self, point: Vec2) -> bool {
        let v = match self.axis {
            ZoneAxis::X => point.x,
            ZoneAxis::Y => point.y,
        };
        if self.below {
            v < self.split
        } else {
            v > self.split
        }
    }

    /// Centre and size of the covered rectangle.
    pub fn rect(&self, width: f32, height: f32) -> (Vec2, f32, f32) {
        match (self.axis, self.below) {
            (ZoneAxis::X, true) => (Vec2::new(self.split / 2.0, height / 2.0), self.split, height),
            (ZoneAxis::X, false) => (
                Vec2::new((self.split + width) / 2.0, height / 2.0),
                width - self.split,
                height,
            ),
            (ZoneAxis::Y, true) => (Vec2::new(width / 2.0, self.split / 2.0), width, self.split),
            (ZoneAxis::Y, false) => (
                Vec2::new(width / 2.0, (self.split + height) / 2.0),
                width,
                height - self.split,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MathClone {
    pub pos: Vec2,
    pub angle: f32,
    pub offset: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MathState {
    pub phase: MathPhase,
    pub timer: u32,
    pub operator: Operator,
    pub operands: (i32, i32),
    pub result: i32,
    pub decoys: (i32, i32),
    pub zone: Option<DangerZone>,
    /// `-` side shots still to fire, one every few ticks.
    pub side_shots: u32,
    pub glitch: u32,
    pub clones: Vec<MathClone>,
}

pub fn init(_body: &mut BossBody) -> MathState {
    MathState {
        phase: MathPhase::Spin,
        timer: FIRST_SPIN,
        operator: Operator::Add,
        operands: (0, 0),
        result: 0,
        decoys: (0, 0),
        zone: None,
        side_shots: 0,
        glitch: 0,
        clones: Vec::new(),
    }
}

pub fn on_stage_change(state: &mut MathState, _body: &mut BossBody, stage: u8) {
    if stage == 4 && state.clones.is_empty() {
        state.clones = (0..3)
            .map(|i| MathClone { pos: Vec2::ZERO, angle: 0.0, offset: TAU / 3.0 * i as f32 })
            .collect();
    }
}

/// The hull only takes damage while the digits spin.
pub fn is_vulnerable(state: &MathState) -> bool {
    state.phase == MathPhase::Spin
}

fn max_range(stage: u8) -> i32 {
    match stage {
        0 => 9,
        1 => 20,
        2 => 30,
        3 => 50,
        _ => 99,
    }
}

fn factorial(n: i32) -> i32 {
    (1..=n).product()
}

/// Operators available at `stage`; the stage 3+ and stage 4 extras are
/// rolled each time.
pub fn operator_pool<R: Rng + ?Sized>(stage: u8, rng: &mut R) -> Vec<Operator> {
    let mut ops = vec![Operator::Add, Operator::Sub];
    if stage >= 1 {
        ops.extend([Operator::Div, Operator::Mod]);
    }
    if stage >= 2 {
        ops.extend([Operator::Mul, Operator::Tan]);
    }
    if stage >= 3 {
        ops.extend([Operator::Pow, Operator::Factorial]);
        if rng.gen_bool(0.3) {
            ops.push(Operator::Less);
        }
        if rng.gen_bool(0.3) {
            ops.push(Operator::Greater);
        }
    }
    if stage >= 4 {
        if rng.gen_bool(0.6) {
            ops.push(Operator::Phi);
        }
        if rng.gen_bool(0.6) {
            ops.push(Operator::Integral);
        }
    }
    ops
}

/// RESOLVE: pick an operator and compute its operands and result.
pub fn resolve<R: Rng + ?Sized>(state: &mut MathState, stage: u8, rng: &mut R) {
    let op = operator_pool(stage, rng).choose(rng).copied().unwrap_or_default();
    apply_operator(state, op, stage, rng);
}

/// Compute operands and result for a fixed operator and enter ATTACK.
pub fn apply_operator<R: Rng + ?Sized>(state: &mut MathState, op: Operator, stage: u8, rng: &mut R) {
    let range = max_range(stage);
    let s = stage as i32;
    state.operator = op;
    state.zone = None;
    match op {
        Operator::Add | Operator::Sub => {
            let (a, b) = (rng.gen_range(1..range), rng.gen_range(1..range));
            state.operands = (a, b);
            state.result = if op == Operator::Add { a + b } else { a - b };
        }
        Operator::Div => {
            state.result = rng.gen_range(2..6 + s);
            let denominator = rng.gen_range(2..5);
            state.operands = (state.result * denominator, denominator);
        }
        Operator::Mul => {
            let (a, b) = (rng.gen_range(3..8 + s), rng.gen_range(2..6 + s));
            state.operands = (a, b);
            state.result = a * b;
        }
        Operator::Pow => {
            let (a, b): (i32, i32) = (rng.gen_range(2..6), rng.gen_range(2..4));
            state.operands = (a, b);
            state.result = a.pow(b as u32).min(150);
        }
        Operator::Mod => {
            let m = rng.gen_range(50..150);
            state.operands = (0, m);
            state.result = m;
        }
        Operator::Factorial => {
            let n = rng.gen_range(3..6);
            state.operands = (n, 0);
            state.result = factorial(n);
        }
        Operator::Phi => {
            state.operands = (1, 1);
            state.result = 150;
        }
        Operator::Tan => {
            state.operands = (90, 0);
            state.result = 20;
        }
        Operator::Integral => {
            state.operands = (0, 1);
            state.result = 100;
        }
        Operator::Less | Operator::Greater => {
            let (axis, extent) = if rng.gen_bool(0.5) {
                (ZoneAxis::X, playfield::WIDTH)
            } else {
                (ZoneAxis::Y, playfield::HEIGHT)
            };
            let split = rng.gen_range(extent * 0.3..extent * 0.7).floor();
            state.zone = Some(DangerZone { axis, split, below: op == Operator::Less });
            state.result = 0;
        }
    }
    if !op.is_zone() {
        state.decoys = state.operands;
    }
    state.timer = if op.is_zone() { ZONE_FRAMES } else { ATTACK_FRAMES };
    state.phase = MathPhase::Attack;
}

/// SPIN cooldown after an attack.
pub fn spin_cooldown(stage: u8) -> u32 {
    60u32.saturating_sub(stage as u32 * 5).max(20)
}

/// The one-shot volley of `op` from `origin`, shared by the boss and its clones.
fn one_shot<R: Rng + ?Sized>(op: Operator, result: i32, origin: Vec2, ctx: &mut BossContext<'_, R>) {
    let (target, speed) = (ctx.player.pos, ctx.base_speed);
    let count = result.max(0) as usize;
    match op {
        Operator::Add => patterns::math_plus(origin, target, count.min(50), speed + 2.0, &mut ctx.arena.spawner()),
        Operator::Div => patterns::math_div(origin, count.min(15), 2, speed, ctx.rng, &mut ctx.arena.spawner()),
        Operator::Pow => patterns::math_power_spiral(origin, count, speed, &mut ctx.arena.spawner()),
        Operator::Factorial => patterns::math_factorial(origin, count, speed, &mut ctx.arena.spawner()),
        _ => {}
    }
}

pub fn update<R: Rng + ?Sized>(state: &mut MathState, body: &mut BossBody, ctx: &mut BossContext<'_, R>) {
    let f = ctx.frame as f32;
    let (w, h) = (playfield::WIDTH, playfield::HEIGHT);
    body.pos = Vec2::new(w / 2.0, 150.0 + (f * 0.05).sin() * 5.0);
    state.glitch = state.glitch.saturating_sub(1);

    if ctx.stage == 4 {
        let mirror = state.phase == MathPhase::Attack && !state.operator.is_zone();
        for i in 0..state.clones.len() {
            let clone = &mut state.clones[i];
            clone.angle += 0.02;
            clone.pos = body.pos + Vec2::from_angle(clone.angle + clone.offset) * CLONE_ORBIT;
            let origin = clone.pos;
            if !mirror || !ctx.can_attack() {
                continue;
            }
            if state.timer == FIRE_MARK {
                one_shot(state.operator, state.result, origin, ctx);
            }
            match state.operator {
                Operator::Phi => patterns::golden_spiral(origin, ctx.frame, ctx.base_speed * 0.8, &mut ctx.arena.spawner()),
                Operator::Mul if ctx.every(30) => {
                    let count = state.result.clamp(0, 40) as usize;
                    patterns::matrix_rain(w, count, ctx.base_speed, ctx.rng, &mut ctx.arena.spawner());
                }
                _ => {}
            }
        }
    }

    if !ctx.can_attack() {
        return;
    }

    if state.side_shots > 0 && ctx.every(SIDE_SHOT_GAP as u64) {
        state.side_shots -= 1;
        let y = ctx.rng.gen_range(100.0..h - 100.0);
        patterns::math_side(w, y, ctx.base_speed, false, &mut ctx.arena.spawner());
    }

    match state.phase {
        MathPhase::Spin => {
            state.timer = state.timer.saturating_sub(1);
            if ctx.every(5) {
                let max = match ctx.stage {
                    0 | 1 => 9,
                    2 | 3 => 20,
                    _ => 99,
                };
                state.decoys = (ctx.rng.gen_range(1..max), ctx.rng.gen_range(1..max));
            }
            if state.timer == 0 {
                state.phase = MathPhase::Resolve;
                state.glitch = 10;
            }
        }
        MathPhase::Resolve => {
            resolve(state, ctx.stage, ctx.rng);
            debug!(op = state.operator.symbol(), result = state.result, "math resolved");
        }
        MathPhase::Attack => {
            state.timer = state.timer.saturating_sub(1);
            attack(state, body, ctx);
            if state.timer == 0 {
                state.phase = MathPhase::Spin;
                state.timer = spin_cooldown(ctx.stage);
                state.zone = None;
            }
        }
    }
}

fn attack<R: Rng + ?Sized>(state: &mut MathState, body: &BossBody, ctx: &mut BossContext<'_, R>) {
    let (w, h, speed) = (playfield::WIDTH, playfield::HEIGHT, ctx.base_speed);
    let op = state.operator;

    if !op.is_zone() && state.timer == FIRE_MARK {
        match op {
            Operator::Sub if state.result < 0 => {
                for y in [h / 2.0, h / 3.0] {
                    patterns::math_side(w, y, speed, true, &mut ctx.arena.spawner());
                }
            }
            Operator::Sub => state.side_shots = state.result.unsigned_abs().min(20),
            Operator::Mul => {
                let count = (state.result * 2).clamp(0, 80) as usize;
                patterns::matrix_rain(w, count, speed, ctx.rng, &mut ctx.arena.spawner());
            }
            Operator::Tan => patterns::math_tangent(w, 15, speed, &mut ctx.arena.spawner()),
            Operator::Mod => patterns::math_modulo(w, state.result.max(0) as u32, speed, &mut ctx.arena.spawner()),
            _ => one_shot(op, state.result, body.pos, ctx),
        }
    }

    match op {
        Operator::Phi => patterns::golden_spiral(body.pos, ctx.frame, speed, &mut ctx.arena.spawner()),
        Operator::Integral => patterns::math_riemann(w, ctx.frame, speed, &mut ctx.arena.spawner()),
        Operator::Less | Operator::Greater => {
            if let Some(zone) = state.zone {
                if state.timer <= ZONE_WARN_UNTIL && zone.contains(ctx.player.pos) && ctx.hurt_player(ZONE_DAMAGE, 0) {
                    ctx.arena.explosion(ctx.player.pos, colors::PLAYER, 1, ctx.rng);
                }
            }
        }
        _ => {}
    }
}

fn cube(pos: Vec2, scale: f32, fill: Rgba) -> Vec<DrawCommand> {
    let size = 80.0 * scale;
    vec![
        DrawCommand::rect(pos, size, size, fill),
        DrawCommand::rect(pos, size, size, colors::WHITE).outline(),
    ]
}

const DECOY_SYMBOLS: [&str; 12] = ["+", "-", "/", "x", "^", "Φ", "tan", "∫", "<", ">", "%", "!"];

pub fn draw(state: &MathState, body: &BossBody, frame: u64) -> Vec<DrawCommand> {
    let f = frame as f32;
    let (w, h) = (playfield::WIDTH, playfield::HEIGHT);
    let mut out = Vec::new();

    if let Some(zone) = state.zone {
        let (centre, zw, zh) = zone.rect(w, h);
        if state.timer > ZONE_WARN_UNTIL {
            if frame % 20 < 10 {
                out.push(DrawCommand::rect(centre, zw, zh, Rgba::rgba(255, 200, 0, 100)));
                out.push(DrawCommand::text(centre, "WARNING", 40.0, colors::WHITE));
            }
        } else {
            out.push(DrawCommand::rect(centre, zw, zh, colors::DANGER_ZONE));
            out.push(DrawCommand::text(centre, "DANGER", 40.0, colors::WHITE));
        }
    }

    let pos = if state.glitch > 0 {
        body.pos + Vec2::new((f * 3.1).sin() * 5.0, (f * 4.7).cos() * 5.0)
    } else {
        body.pos
    };
    let flashing = body.flash_timer > 0;
    let fill = if flashing { colors::WHITE } else { Rgba::rgb(50, 50, 50) };
    out.extend(cube(pos, 1.0, fill));

    if state.phase != MathPhase::Spin && !flashing {
        let pulse = 90.0 + (f * 0.2).sin() * 5.0;
        out.push(DrawCommand::rect(pos, pulse, pulse, Rgba::rgb(150, 150, 150)).outline());
        let red = Rgba::rgba(255, 0, 0, 100);
        out.push(DrawCommand::line(pos + Vec2::new(-40.0, -40.0), pos + Vec2::new(40.0, 40.0), 1.0, red));
        out.push(DrawCommand::line(pos + Vec2::new(40.0, -40.0), pos + Vec2::new(-40.0, 40.0), 1.0, red));
    }

    let glyph_color = if flashing { Rgba::rgb(0, 0, 0) } else { colors::WHITE };
    if state.phase == MathPhase::Spin {
        let decoy = DECOY_SYMBOLS[(frame as usize / 3) % DECOY_SYMBOLS.len()];
        out.push(DrawCommand::text(pos, decoy, 40.0, glyph_color));
        if frame % 10 < 5 {
            out.push(DrawCommand::text(pos + Vec2::new(0.0, 60.0), "VULNERABLE", 15.0, colors::MATH_HEAL));
        }
    } else {
        out.push(DrawCommand::text(pos, state.operator.symbol(), 40.0, glyph_color));
    }

    if !state.operator.is_zone() || state.phase == MathPhase::Spin {
        let wobble = Vec2::new((f * 0.1).sin() * 10.0, (f * 0.1).cos() * 10.0);
        let digits = Rgba::rgb(200, 200, 255);
        out.push(DrawCommand::text(pos + Vec2::new(-80.0, 0.0) + wobble, state.decoys.0.to_string(), 30.0, digits));
        out.push(DrawCommand::text(pos + Vec2::new(80.0, 0.0) - wobble, state.decoys.1.to_string(), 30.0, digits));
    }

    if state.phase != MathPhase::Spin {
        let shown = match state.operator {
            Operator::Mul | Operator::Pow | Operator::Tan | Operator::Integral => "MAX".to_string(),
            Operator::Phi => "GOLDEN".to_string(),
            Operator::Less | Operator::Greater => "ZONE".to_string(),
            _ => state.result.to_string(),
        };
        out.push(DrawCommand::text(pos + Vec2::new(0.0, -60.0), format!("= {shown}"), 20.0, Rgba::rgb(100, 255, 100)));
    }

    for clone in &state.clones {
        out.extend(cube(clone.pos, 0.5, Rgba::rgb(50, 50, 50)));
        out.push(DrawCommand::text(clone.pos, state.operator.symbol(), 20.0, colors::WHITE));
    }
    out
}

/// Binary digits coalescing into the cube.
pub fn draw_intro(centre: Vec2, progress: f32) -> Vec<DrawCommand> {
    let spread = 100.0 * (1.0 - progress);
    let digit_color = colors::BOSS_MATH.with_alpha((255.0 * progress) as u8);
    let mut out: Vec<DrawCommand> = (0..30)
        .map(|i| {
            let a = i as f32 * 2.39996;
            let r = ((i * 37) % 100) as f32 / 100.0;
            let pos = centre + Vec2::from_angle(a) * spread * r;
            DrawCommand::text(pos, if i % 2 == 0 { "0" } else { "1" }, 12.0, digit_color)
        })
        .collect();
    out.extend(cube(centre, progress, Rgba::rgb(50, 50, 50)));
    out.push(DrawCommand::text(centre, "∑", 40.0 * progress, colors::WHITE));
    out
}
