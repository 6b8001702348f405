//! Star: a dense radial shooter behind a shield that grows every stage.

use std::f32::consts::{FRAC_PI_2, TAU};

use rand::Rng;

use super::{flash_color, BossContext};
use crate::constants::{boss as boss_k, colors, playfield};
use crate::entities::BossBody;
use crate::geometry::{star_points, Vec2};
use crate::patterns;
use crate::render::DrawCommand;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StarState {
    pub spin: f32,
}

pub fn init(body: &mut BossBody) -> StarState {
    body.shield = 0.0;
    body.max_shield = 0.0;
    StarState::default()
}

/// Tops the shield up by `(stage + 1) * 100` on top of whatever is left.
pub fn on_stage_change(body: &mut BossBody, stage: u8) {
    body.shield += (stage as f32 + 1.0) * 100.0;
    body.max_shield = body.shield;
}

pub fn update<R: Rng + ?Sized>(state: &mut StarState, body: &mut BossBody, ctx: &mut BossContext<'_, R>) {
    let f = ctx.frame as f32;
    state.spin += 0.04;
    body.angle = state.spin;
    body.pos = Vec2::new(
        playfield::WIDTH / 2.0 + (f * 0.015).cos() * 80.0,
        150.0 + (f * 0.02).sin() * 30.0,
    );

    if !ctx.can_attack() {
        return;
    }
    let (origin, speed, stage, frame) = (body.pos, ctx.base_speed, ctx.stage, ctx.frame);

    if ctx.every(4) {
        patterns::star_radial(origin, frame, 10, speed * 1.2, &mut ctx.arena.spawner());
    }
    if stage >= 1 && ctx.every(6) {
        patterns::star_spiral(origin, f * 1.5, 16, speed, &mut ctx.arena.spawner());
    }
    if stage >= 2 && ctx.every(8) {
        patterns::star_wave(origin, frame, speed * 1.5, &mut ctx.arena.spawner());
    }
    if stage >= 3 {
        if ctx.every(4) {
            patterns::star_mandala(origin, frame, speed * 0.8, &mut ctx.arena.spawner());
        }
        if ctx.every(120) {
            patterns::star_shape(origin, frame, speed, &mut ctx.arena.spawner());
        }
    }
    if stage >= 4 {
        if ctx.every(16) {
            patterns::star_mandala(origin, frame, speed * 0.8, &mut ctx.arena.spawner());
        }
        if ctx.every(12) {
            patterns::star_wave(origin, frame, speed * 1.2, &mut ctx.arena.spawner());
        }
        if ctx.every(60) {
            patterns::ring(origin, 60, 0.0, speed * 0.6, &mut ctx.arena.spawner());
        }
    }
}

fn star(radius: f32) -> Vec<Vec2> {
    star_points(5, radius, radius / 2.0, 0.0)
}

pub fn draw(state: &StarState, body: &BossBody, frame: u64) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    let size = boss_k::STAR_SIZE;

    if body.shield > 0.0 && body.max_shield > 0.0 {
        // broken ring, arc length tracks the remaining shield
        let pct = (body.shield / body.max_shield).clamp(0.0, 1.0);
        let start = -FRAC_PI_2 + frame as f32 * 0.05;
        let steps = (pct * 36.0).ceil().max(1.0) as usize;
        let r = size * 1.75;
        for i in 0..steps {
            let a0 = start + TAU * pct * i as f32 / steps as f32;
            let a1 = start + TAU * pct * (i + 1) as f32 / steps as f32;
            out.push(DrawCommand::line(
                body.pos + Vec2::from_angle(a0) * r,
                body.pos + Vec2::from_angle(a1) * r,
                4.0,
                colors::SHIELD,
            ));
        }
    }

    out.push(DrawCommand::polygon(body.pos, star(size), flash_color(body, colors::BOSS_STAR)).rotated(state.spin));
    if body.flash_timer == 0 {
        out.push(
            DrawCommand::polygon(body.pos, star(size * 0.4), colors::WHITE.with_alpha(200)).rotated(-state.spin),
        );
    }
    out
}

/// Scales up while spinning up.
pub fn draw_intro(centre: Vec2, progress: f32) -> Vec<DrawCommand> {
    let size = boss_k::STAR_SIZE * progress;
    let rot = progress.powi(3) * TAU * 5.0;
    let shine = colors::WHITE.with_alpha((150.0 * progress) as u8);
    vec![
        DrawCommand::polygon(centre, star(size), colors::BOSS_STAR).rotated(rot),
        DrawCommand::line(centre - Vec2::new(0.0, size * 1.5), centre + Vec2::new(0.0, size * 1.5), 2.0, shine),
        DrawCommand::line(centre - Vec2::new(size * 1.5, 0.0), centre + Vec2::new(size * 1.5, 0.0), 2.0, shine),
    ]
}
