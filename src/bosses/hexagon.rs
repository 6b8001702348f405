//! Hexagon: a spinning storm cell that blinks around and calls meteors
//! down after a telegraph.

use std::f32::consts::TAU;

use rand::Rng;
use tracing::debug;

use super::{flash_color, BossContext};
use crate::constants::{boss as boss_k, colors, playfield};
use crate::entities::BossBody;
use crate::geometry::{bearing, lerp, polygon_points, Vec2};
use crate::patterns;
use crate::render::DrawCommand;

const SCALE_LERP: f32 = 0.2;
const TELEGRAPH_LENGTH: f32 = 2000.0;
/// Meteor speed as a multiple of the stage base speed.
pub const METEOR_SPEED_MULT: f32 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HexPhase {
    #[default]
    Idle,
    TeleportOut,
    TeleportIn,
}

/// A meteor waiting out its telegraph before it fires.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingMeteor {
    pub from: Vec2,
    pub dir: Vec2,
    pub timer: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HexagonState {
    pub phase: HexPhase,
    pub timer: u32,
    pub scale: f32,
    pub spin_speed: f32,
    pub pending: Vec<PendingMeteor>,
}

pub fn init(_body: &mut BossBody) -> HexagonState {
    HexagonState { phase: HexPhase::Idle, timer: 0, scale: 1.0, spin_speed: 0.05, pending: Vec::new() }
}

pub fn on_stage_change(state: &mut HexagonState, stage: u8) {
    state.spin_speed = 0.05 + stage as f32 * 0.05;
}

/// Ticks spent idle before the next teleport; `None` below stage 1.
pub fn teleport_threshold(stage: u8) -> Option<u32> {
    match stage {
        0 => None,
        1 | 2 => Some(180),
        3 => Some(90),
        _ => Some(45),
    }
}

impl HexagonState {
    /// Queue a meteor from `from` aimed at `to`.
    pub fn queue_meteor(&mut self, from: Vec2, to: Vec2, delay: u32) {
        let dir = Vec2::from_angle(bearing(from, to));
        self.pending.push(PendingMeteor { from, dir, timer: delay });
    }
}

pub fn update<R: Rng + ?Sized>(state: &mut HexagonState, body: &mut BossBody, ctx: &mut BossContext<'_, R>) {
    body.angle += state.spin_speed;
    let stage = ctx.stage;
    let (w, h) = (playfield::WIDTH, playfield::HEIGHT);

    match state.phase {
        HexPhase::Idle => {
            state.scale = lerp(state.scale, 1.0, SCALE_LERP);
            if let Some(threshold) = teleport_threshold(stage) {
                state.timer += 1;
                if state.timer > threshold {
                    state.phase = HexPhase::TeleportOut;
                    state.timer = 0;
                    ctx.arena.explosion(body.pos, colors::BOSS_HEXAGON, 10, ctx.rng);
                    debug!(stage, "hexagon teleporting");
                }
            }
            body.pos.y += (ctx.frame as f32 * 0.1).sin() * 2.0;
        }
        HexPhase::TeleportOut => {
            state.scale = lerp(state.scale, 0.0, SCALE_LERP);
            if state.scale <= 0.05 {
                state.phase = HexPhase::TeleportIn;
                let max_y = if stage >= 4 { 400.0 } else { 250.0 };
                body.pos = Vec2::new(ctx.rng.gen_range(100.0..w - 100.0), ctx.rng.gen_range(50.0..max_y));
            }
        }
        HexPhase::TeleportIn => {
            state.scale = lerp(state.scale, 1.0, SCALE_LERP);
            if state.scale >= 0.95 {
                ctx.arena.explosion(body.pos, colors::BOSS_HEXAGON, 15, ctx.rng);
                if stage >= 1 {
                    let target = ctx.player.pos;
                    let from = Vec2::new(target.x + ctx.rng.gen_range(-100.0..100.0), -50.0);
                    state.queue_meteor(from, target, 30);
                }
                state.phase = HexPhase::Idle;
                state.timer = 0;
            }
        }
    }

    if stage >= 4 && ctx.frame % 300 < 100 {
        body.pos = body.pos.lerp(Vec2::new(w / 2.0, h / 2.0 - 100.0), 0.1);
    }

    if !ctx.can_attack() {
        return;
    }

    let meteor_speed = ctx.base_speed * METEOR_SPEED_MULT;
    let mut fired = Vec::new();
    state.pending.retain_mut(|m| {
        m.timer = m.timer.saturating_sub(1);
        if m.timer == 0 {
            fired.push((m.from, m.dir));
            false
        } else {
            true
        }
    });
    for (from, dir) in fired {
        patterns::meteor(from, from + dir, meteor_speed, &mut ctx.arena.spawner());
        ctx.arena.explosion(from, colors::METEOR, 5, ctx.rng);
    }

    let (target, speed) = (ctx.player.pos, ctx.base_speed);
    if ctx.every(20) {
        patterns::hexagon_spin(body.pos, body.angle, boss_k::HEXAGON_SIZE, speed * 1.5, &mut ctx.arena.spawner());
    }
    if stage == 1 && ctx.every(50) {
        let x = ctx.rng.gen_range(0.0..w);
        state.queue_meteor(Vec2::new(x, -50.0), Vec2::new(x, h), 50);
    }
    if stage >= 2 && ctx.every(25) {
        for _ in 0..2 {
            let x = ctx.rng.gen_range(0.0..w);
            state.queue_meteor(Vec2::new(x, -50.0), Vec2::new(x, h), 40);
        }
    }
    if stage >= 3 && ctx.every(50) {
        state.queue_meteor(Vec2::new(-50.0, target.y), Vec2::new(w, target.y), 40);
        state.queue_meteor(Vec2::new(target.x, -50.0), Vec2::new(target.x, h), 40);
    }
    if stage >= 4 && ctx.every(10) {
        let a = ctx.rng.gen_range(0.0..TAU);
        let from = Vec2::new(w / 2.0, h / 2.0) + Vec2::from_angle(a) * 600.0;
        state.queue_meteor(from, target, 30);
    }
}

pub fn draw(state: &HexagonState, body: &BossBody, frame: u64) -> Vec<DrawCommand> {
    let color = flash_color(body, colors::BOSS_HEXAGON);
    let r = boss_k::HEXAGON_SIZE * state.scale;
    let mut out = Vec::new();

    for m in &state.pending {
        let start = m.from - m.dir * TELEGRAPH_LENGTH;
        let end = m.from + m.dir * TELEGRAPH_LENGTH;
        let width = (4.0 * (1.0 - m.timer as f32 / 60.0)).max(1.0);
        let c = if m.timer % 10 < 5 { colors::BOSS_HEXAGON } else { colors::METEOR };
        // jagged bolt, deterministic per frame
        let normal = Vec2::new(-m.dir.y, m.dir.x);
        let mut prev = start;
        for j in 1..=20 {
            let t = j as f32 / 20.0;
            let jitter = if j == 20 { 0.0 } else { ((frame as f32 + j as f32) * 12.9898).sin() * 5.0 };
            let next = start.lerp(end, t) + normal * jitter;
            out.push(DrawCommand::line(prev, next, width, c));
            prev = next;
        }
    }

    out.push(
        DrawCommand::polygon(body.pos, polygon_points(6, r, 0.0), color)
            .rotated(body.angle)
            .outline(),
    );
    if frame % 5 == 0 && body.flash_timer == 0 {
        let a = frame as f32 * 0.7;
        out.push(DrawCommand::line(
            body.pos + Vec2::from_angle(a) * r,
            body.pos - Vec2::from_angle(a + 1.0) * r,
            1.0,
            colors::WHITE.with_alpha(200),
        ));
    }
    out
}

/// A lightning strike, then the hexagon grows out of it.
pub fn draw_intro(centre: Vec2, progress: f32) -> Vec<DrawCommand> {
    if progress < 0.5 {
        vec![DrawCommand::line(centre - Vec2::new(0.0, 500.0), centre, 10.0 * progress, colors::BOSS_HEXAGON)]
    } else {
        let r = boss_k::HEXAGON_SIZE * (progress - 0.5) * 2.0;
        vec![DrawCommand::polygon(centre, polygon_points(6, r, 0.0), colors::BOSS_HEXAGON).outline()]
    }
}
