//! Oval: ricochets around the arena firing bouncing bullets.

use std::f32::consts::TAU;

use rand::Rng;

use super::{flash_color, BossContext};
use crate::constants::{boss as boss_k, colors, playfield};
use crate::entities::{BossBody, BulletSpawn};
use crate::geometry::{bearing, Vec2};
use crate::patterns;
use crate::render::DrawCommand;

pub const MOVE_SPEED: f32 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct OvalState {
    pub squash: Vec2,
    pub roll: f32,
}

pub fn init(_body: &mut BossBody) -> OvalState {
    OvalState { squash: Vec2::new(1.0, 1.0), roll: 0.0 }
}

/// Speeds up by a quarter per stage, keeping its current heading signs.
pub fn on_stage_change(_state: &mut OvalState, body: &mut BossBody, stage: u8) {
    let mult = 1.0 + stage as f32 * 0.25;
    body.vel.x = (MOVE_SPEED * mult).copysign(body.vel.x);
    body.vel.y = (MOVE_SPEED * 0.7 * mult).copysign(body.vel.y);
}

pub fn update<R: Rng + ?Sized>(state: &mut OvalState, body: &mut BossBody, ctx: &mut BossContext<'_, R>) {
    body.pos += body.vel;
    state.roll += body.vel.x * 0.05;
    state.squash = state.squash.lerp(Vec2::new(1.0, 1.0), 0.1);

    let (rx, ry) = (boss_k::OVAL_RX, boss_k::OVAL_RY);
    let mut bounced = false;
    if body.pos.x < rx || body.pos.x > playfield::WIDTH - rx {
        body.vel.x = -body.vel.x;
        body.pos.x = body.pos.x.clamp(rx, playfield::WIDTH - rx);
        state.squash = Vec2::new(0.6, 1.4);
        bounced = true;
    }
    if body.pos.y < ry || body.pos.y > playfield::HEIGHT - ry {
        body.vel.y = -body.vel.y;
        body.pos.y = body.pos.y.clamp(ry, playfield::HEIGHT - ry);
        state.squash = Vec2::new(1.4, 0.6);
        bounced = true;
    }
    if bounced {
        ctx.arena.explosion(body.pos, colors::BOSS_OVAL, 10, ctx.rng);
    }

    let (origin, target, speed, stage) = (body.pos, ctx.player.pos, ctx.base_speed, ctx.stage);
    if bounced && stage >= 4 {
        patterns::bouncing_ring(origin, 16, speed * 1.5, 1, &mut ctx.arena.spawner());
    }

    if !ctx.can_attack() {
        return;
    }
    if ctx.every(50) {
        patterns::aimed(origin, target, speed, &mut |s: BulletSpawn| {
            ctx.arena.spawn_enemy_bullet(s.bounces(1));
        });
    }
    if stage >= 1 && ctx.every(90) {
        let offset = ctx.frame as f32 * 0.05;
        patterns::ring(origin, 10, offset, speed, &mut |s: BulletSpawn| {
            ctx.arena.spawn_enemy_bullet(s.bounces(1).color(colors::BOSS_OVAL));
        });
    }
    if stage >= 2 && ctx.every(120) {
        for _ in 0..3 {
            let angle = ctx.rng.gen_range(0.0..TAU);
            ctx.arena.spawn_enemy_bullet(
                BulletSpawn::angled(origin, angle, speed * 0.7, colors::BOSS_OVAL).bounces(3),
            );
        }
    }
    if stage >= 3 && ctx.every(60) {
        patterns::bounce_spread(origin, target, 5, speed + 2.0, 2, &mut ctx.arena.spawner());
    }
    if stage >= 4 && ctx.every(8) {
        let angle = bearing(origin, target) + ctx.rng.gen_range(-0.5..0.5);
        ctx.arena.spawn_enemy_bullet(BulletSpawn::angled(origin, angle, speed + 4.0, colors::BOSS_OVAL).bounces(3));
    }
}

pub fn draw(state: &OvalState, body: &BossBody) -> Vec<DrawCommand> {
    let color = flash_color(body, colors::BOSS_OVAL);
    let mut out = vec![DrawCommand::ellipse(
        body.pos,
        boss_k::OVAL_RX * 0.85 * state.squash.x,
        boss_k::OVAL_RY * 0.75 * state.squash.y,
        color,
    )
    .rotated(state.roll)];
    if body.flash_timer == 0 {
        let axle = Vec2::from_angle(state.roll) * 40.0;
        out.push(DrawCommand::line(body.pos - axle, body.pos + axle, 2.0, colors::WHITE.with_alpha(140)));
    }
    out
}

/// Slides in from the right with speed lines.
pub fn draw_intro(centre: Vec2, progress: f32) -> Vec<DrawCommand> {
    let pos = Vec2::new(centre.x + 600.0 * (1.0 - progress), centre.y);
    let mut out = vec![DrawCommand::ellipse(pos, 50.0, 30.0, colors::BOSS_OVAL)];
    for (dy, len) in [(-20.0, 40.0), (20.0, 40.0), (0.0, 60.0)] {
        let start = pos + Vec2::new(60.0, dy);
        out.push(DrawCommand::line(start, start + Vec2::new(len, 0.0), 1.0, colors::WHITE));
    }
    out
}
