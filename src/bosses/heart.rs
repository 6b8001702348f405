//! Heart: beats faster as it weakens, calls lust orbs at stage 3 and grows
//! a 2000-point shield at stage 4.

use std::f32::consts::TAU;

use rand::Rng;

use super::{flash_color, BossContext};
use crate::constants::{boss as boss_k, colors, playfield};
use crate::entities::{Arena, BossBody, MinionKind};
use crate::geometry::{heart_point, remap, Vec2};
use crate::patterns;
use crate::render::DrawCommand;

pub const MAX_SHIELD: f32 = 2000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct HeartState {
    pub beat_scale: f32,
}

pub fn init(body: &mut BossBody) -> HeartState {
    body.shield = 0.0;
    body.max_shield = MAX_SHIELD;
    HeartState { beat_scale: 1.0 }
}

pub fn on_stage_change<R: Rng + ?Sized>(
    _state: &mut HeartState,
    body: &mut BossBody,
    stage: u8,
    arena: &mut Arena,
    rng: &mut R,
) {
    match stage {
        3 => {
            arena.spawn_minion(Some(MinionKind::LustOrb), Some(Vec2::new(100.0, 100.0)), None, rng);
            arena.spawn_minion(
                Some(MinionKind::LustOrb),
                Some(Vec2::new(playfield::WIDTH - 100.0, 100.0)),
                None,
                rng,
            );
        }
        4 => {
            body.shield = MAX_SHIELD;
            body.max_shield = MAX_SHIELD;
            body.radius = boss_k::RADIUS * 1.5;
        }
        _ => {}
    }
}

pub fn update<R: Rng + ?Sized>(state: &mut HeartState, body: &mut BossBody, ctx: &mut BossContext<'_, R>) {
    let f = ctx.frame as f32;
    body.pos = Vec2::new(
        playfield::WIDTH / 2.0 + (f * 0.02).sin() * 100.0,
        120.0 + (f * 0.04).sin() * 30.0,
    );
    let hp_pct = (body.hp / body.max_hp).clamp(0.0, 1.0);
    let beat_speed = remap(hp_pct, 1.0, 0.0, 0.1, 0.3);
    state.beat_scale = 1.0 + (f * beat_speed).sin().powi(63) * 0.2;

    if !ctx.can_attack() {
        return;
    }
    let (origin, target, speed, stage) = (body.pos, ctx.player.pos, ctx.base_speed, ctx.stage);

    if ctx.every(60) {
        patterns::heart_spread(origin, ctx.frame, speed, &mut ctx.arena.spawner());
    }
    if stage >= 1 && ctx.every(60) {
        patterns::panty_shot(origin, target, speed + 1.0, &mut ctx.arena.spawner());
    }
    if stage >= 2 && ctx.every(5) {
        patterns::magazine_stream(origin, ctx.frame, speed + 2.0, &mut ctx.arena.spawner());
    }
    if stage >= 3 && ctx.every(40) {
        patterns::aimed(origin, target, speed, &mut ctx.arena.spawner());
    }
    if stage >= 4 {
        if ctx.every(20) {
            patterns::chaos(origin, speed + 3.0, ctx.rng, &mut ctx.arena.spawner());
        }
        if ctx.every(90) {
            patterns::heart_spread(origin, ctx.frame, speed, &mut ctx.arena.spawner());
        }
        if ctx.every(15) {
            patterns::magazine_cross(origin, ctx.frame, speed + 2.0, &mut ctx.arena.spawner());
        }
    }
}

fn outline(scale: f32) -> Vec<Vec2> {
    (0..63).map(|i| heart_point(i as f32 * 0.1) * scale).collect()
}

pub fn draw(state: &HeartState, body: &BossBody, _frame: u64) -> Vec<DrawCommand> {
    let color = flash_color(body, colors::BOSS_HEART);
    let r = if body.shield > 0.0 { 3.0 } else { 2.0 };
    let mut out = vec![DrawCommand::polygon(body.pos, outline(r * state.beat_scale), color)];
    if body.flash_timer == 0 {
        out.push(DrawCommand::circle(body.pos + Vec2::new(0.0, -10.0), 10.0, colors::WHITE.with_alpha(120)));
    }
    if body.shield > 0.0 && body.max_shield > 0.0 {
        // shield arc as a run of short segments
        let frac = (body.shield / body.max_shield).clamp(0.0, 1.0);
        let steps = (frac * 40.0).ceil() as usize;
        for i in 0..steps {
            let a0 = -TAU / 4.0 + TAU * frac * i as f32 / steps as f32;
            let a1 = -TAU / 4.0 + TAU * frac * (i + 1) as f32 / steps as f32;
            out.push(DrawCommand::line(
                body.pos + Vec2::from_angle(a0) * 70.0,
                body.pos + Vec2::from_angle(a1) * 70.0,
                3.0,
                colors::SHIELD,
            ));
        }
    }
    out
}

/// Scales up from nothing while beating.
pub fn draw_intro(centre: Vec2, progress: f32) -> Vec<DrawCommand> {
    let beat = 1.0 + (progress * std::f32::consts::PI * 10.0).sin() * 0.2;
    vec![DrawCommand::polygon(centre, outline(2.5 * progress * beat), colors::BOSS_HEART)]
}
