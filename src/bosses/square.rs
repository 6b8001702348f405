//! Square: a dash state machine (IDLE → CHARGE → DASH → RECOVER) that boxes
//! the player in with four blockers while it winds up.

use std::f32::consts::FRAC_PI_2;

use rand::Rng;
use tracing::debug;

use super::{flash_color, BossContext};
use crate::constants::{boss as boss_k, colors, playfield};
use crate::entities::{Blocker, BossBody, Rgba};
use crate::geometry::{lerp, Vec2};
use crate::patterns;
use crate::render::DrawCommand;

pub const CHARGE_CHANCE: f64 = 0.01;
pub const CHARGE_FRAMES: u32 = 60;
pub const DASH_FRAMES: u32 = 30;
pub const RECOVER_FRAMES: u32 = 60;
pub const DASH_SPEED: f32 = 15.0;
const TRAP_SIZE: f32 = 250.0;
const WALL_THICKNESS: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DashPhase {
    #[default]
    Idle,
    Charge,
    Dash,
    Recover,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SquareState {
    pub phase: DashPhase,
    pub timer: u32,
    /// Locked at the end of CHARGE.
    pub dash_vel: Vec2,
    /// Last frame's displacement, drives the shear in `draw`.
    pub visual_vel: Vec2,
}

pub fn init(_body: &mut BossBody) -> SquareState {
    SquareState::default()
}

/// Four walls centred on `around`, forming a 250 px box.
pub fn trap_blockers(around: Vec2) -> Vec<Blocker> {
    let half = TRAP_SIZE / 2.0;
    let wall = |center: Vec2, w: f32, h: f32| Blocker { center, half_w: w / 2.0, half_h: h / 2.0 };
    vec![
        wall(Vec2::new(around.x, around.y - half), TRAP_SIZE, WALL_THICKNESS),
        wall(Vec2::new(around.x, around.y + half), TRAP_SIZE, WALL_THICKNESS),
        wall(Vec2::new(around.x - half, around.y), WALL_THICKNESS, TRAP_SIZE),
        wall(Vec2::new(around.x + half, around.y), WALL_THICKNESS, TRAP_SIZE),
    ]
}

pub fn update<R: Rng + ?Sized>(state: &mut SquareState, body: &mut BossBody, ctx: &mut BossContext<'_, R>) {
    body.angle += 0.02;
    let prev = body.pos;
    let f = ctx.frame as f32;

    match state.phase {
        DashPhase::Idle => {
            let target = Vec2::new(
                playfield::WIDTH / 2.0 + (f * 0.01).sin() * 100.0,
                100.0 + (f * 0.03).cos() * 20.0,
            );
            body.pos = body.pos.lerp(target, 0.05);
            if ctx.rng.gen_bool(CHARGE_CHANCE) {
                state.phase = DashPhase::Charge;
                state.timer = CHARGE_FRAMES;
                ctx.arena.blockers.extend(trap_blockers(ctx.player.pos));
                debug!(stage = ctx.stage, "square boss charging");
            }
        }
        DashPhase::Charge => {
            state.timer -= 1;
            body.pos.x += ctx.rng.gen_range(-2.0..2.0);
            body.pos.y += ctx.rng.gen_range(-2.0..2.0);
            if state.timer == 0 {
                state.phase = DashPhase::Dash;
                state.timer = DASH_FRAMES;
                state.dash_vel = (ctx.player.pos - body.pos).normalize_or_zero() * DASH_SPEED;
            }
        }
        DashPhase::Dash => {
            state.timer -= 1;
            body.pos += state.dash_vel;
            ctx.arena.explosion(body.pos, colors::BOSS_SQUARE, 1, ctx.rng);
            if state.timer == 0 {
                state.phase = DashPhase::Recover;
                state.timer = RECOVER_FRAMES;
                ctx.arena.blockers.clear();
            }
        }
        DashPhase::Recover => {
            state.timer -= 1;
            body.pos.x = lerp(body.pos.x, playfield::WIDTH / 2.0, 0.05);
            body.pos.y = lerp(body.pos.y, 100.0, 0.05);
            if state.timer == 0 {
                state.phase = DashPhase::Idle;
            }
        }
    }
    let half = body.radius / 2.0;
    body.pos = body.pos.clamp(Vec2::splat(half), Vec2::new(playfield::WIDTH - half, playfield::HEIGHT - half));
    state.visual_vel = body.pos - prev;

    if !ctx.can_attack() || state.phase == DashPhase::Dash {
        return;
    }
    let (origin, target, speed, stage) = (body.pos, ctx.player.pos, ctx.base_speed, ctx.stage);

    if ctx.every(8) {
        patterns::square_spiral(origin, ctx.frame, speed, &mut ctx.arena.spawner());
    }
    if stage >= 1 && ctx.every(40) {
        patterns::rapid_stream(origin, target, speed + 3.0, ctx.rng, &mut ctx.arena.spawner());
    }
    if stage >= 2 && ctx.every(100) {
        patterns::wall_down(playfield::WIDTH, speed * 0.8, ctx.rng, &mut ctx.arena.spawner());
    }
    if stage >= 3 && ctx.every(30) {
        patterns::spread(origin, target, 7, FRAC_PI_2, speed, &mut ctx.arena.spawner());
    }
    if stage >= 4 && ctx.every(10) {
        patterns::chaos(origin, speed + 2.0, ctx.rng, &mut ctx.arena.spawner());
    }
}

pub fn draw(state: &SquareState, body: &BossBody, frame: u64) -> Vec<DrawCommand> {
    let color = flash_color(body, colors::BOSS_SQUARE);
    let size = body.radius;
    let shear = (state.visual_vel.x * 0.05).clamp(-0.5, 0.5);
    let half = size / 2.0;
    let hull = vec![
        Vec2::new(-half + shear * half, -half),
        Vec2::new(half + shear * half, -half),
        Vec2::new(half - shear * half, half),
        Vec2::new(-half - shear * half, half),
    ];
    let mut out = vec![
        DrawCommand::polygon(body.pos, hull, color),
        DrawCommand::rect(body.pos, size * 0.5, size * 0.5, Rgba::rgba(0, 0, 0, 150)).rotated(body.angle * 2.0),
    ];
    if state.phase == DashPhase::Charge {
        let pulse = 100 + ((frame as f32 * 0.5).sin() * 80.0) as i32;
        out.push(
            DrawCommand::rect(body.pos, size * 1.4, size * 1.4, colors::BOSS_SQUARE.with_alpha(pulse.clamp(0, 255) as u8))
                .outline(),
        );
    }
    out
}

/// Drops in from above.
pub fn draw_intro(centre: Vec2, progress: f32) -> Vec<DrawCommand> {
    let pos = Vec2::new(centre.x, centre.y - 500.0 * (1.0 - progress));
    vec![DrawCommand::rect(pos, boss_k::SQUARE_SIZE, boss_k::SQUARE_SIZE, colors::BOSS_SQUARE)]
}
