//! Circle: hovers on a Lissajous path and layers more patterns each stage.

use std::f32::consts::PI;

use rand::Rng;

use super::{flash_color, BossContext};
use crate::constants::{colors, playfield};
use crate::entities::BossBody;
use crate::geometry::Vec2;
use crate::patterns;
use crate::render::DrawCommand;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CircleState {
    /// Visual pulse, bumped on every volley.
    pub pulse: f32,
}

pub fn init(_body: &mut BossBody) -> CircleState {
    CircleState::default()
}

pub fn update<R: Rng + ?Sized>(state: &mut CircleState, body: &mut BossBody, ctx: &mut BossContext<'_, R>) {
    let f = ctx.frame as f32;
    body.pos = Vec2::new(
        playfield::WIDTH / 2.0 + (f * 0.02).sin() * 150.0,
        100.0 + (f * 0.05).sin() * 20.0,
    );
    body.angle += 0.01;
    state.pulse *= 0.9;

    if !ctx.can_attack() {
        return;
    }
    let (origin, target, speed, stage) = (body.pos, ctx.player.pos, ctx.base_speed, ctx.stage);

    if ctx.every(60) {
        patterns::aimed(origin, target, speed + 2.0, &mut ctx.arena.spawner());
        state.pulse = 1.0;
    }
    if ctx.every(10) {
        patterns::spiral(origin, ctx.frame, speed, &mut ctx.arena.spawner());
    }
    if stage >= 1 && ctx.every(120) {
        let count = 12 + 2 * stage as usize;
        patterns::ring(origin, count, 0.0, speed * 0.8, &mut ctx.arena.spawner());
    }
    if stage >= 2 && ctx.every(90) {
        patterns::spread(origin, target, 5, PI / 3.0, speed, &mut ctx.arena.spawner());
    }
    if stage >= 3 && ctx.every(5) {
        patterns::cross(origin, ctx.frame, speed, &mut ctx.arena.spawner());
    }
    if stage >= 4 && ctx.every(60) {
        patterns::converge(
            target,
            playfield::WIDTH,
            playfield::HEIGHT,
            speed * 0.5,
            ctx.rng,
            &mut ctx.arena.spawner(),
        );
    }
}

pub fn draw(state: &CircleState, body: &BossBody, frame: u64) -> Vec<DrawCommand> {
    let color = flash_color(body, colors::BOSS_CIRCLE);
    let r = body.radius * (1.0 + state.pulse * 0.1);
    let core = 0.4 + (frame as f32 * 0.1).sin().abs() * 0.2;
    vec![
        DrawCommand::circle(body.pos, r, color),
        DrawCommand::circle(body.pos, r * core, colors::WHITE.with_alpha(180)),
        DrawCommand::circle(body.pos, r * 1.3, color.with_alpha(80)).outline().rotated(body.angle),
    ]
}

/// Grows out of a point.
pub fn draw_intro(centre: Vec2, progress: f32) -> Vec<DrawCommand> {
    vec![DrawCommand::circle(centre, crate::constants::boss::RADIUS * progress, colors::BOSS_CIRCLE)]
}
