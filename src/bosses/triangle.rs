//! Triangle: a summoner that blinks around the arena and, from stage 2,
//! sweeps three vertex lasers.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use rand::Rng;
use tracing::debug;

use super::{flash_color, BossContext};
use crate::constants::{colors, playfield};
use crate::entities::{BossBody, BulletSpawn, MinionKind};
use crate::geometry::{line_circle_intersect, polygon_points, Vec2};
use crate::patterns;
use crate::render::DrawCommand;

pub const TELEPORT_INTERVAL: u64 = 300;
const FADE_STEP: f32 = 8.0;
const WAIT_FRAMES: u32 = 20;
const LASER_LENGTH: f32 = 1000.0;
const LASER_DAMAGE: f32 = 3.0;
const PRISON_RADIUS: f32 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TeleportPhase {
    #[default]
    Idle,
    Out,
    Wait,
    In,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LaserPhase {
    #[default]
    Cooldown,
    Charge,
    Fire,
}

impl LaserPhase {
    fn next(self) -> (LaserPhase, u32) {
        match self {
            LaserPhase::Cooldown => (LaserPhase::Charge, 60),
            LaserPhase::Charge => (LaserPhase::Fire, 90),
            LaserPhase::Fire => (LaserPhase::Cooldown, 120),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TriangleState {
    pub summon_timer: u64,
    pub teleport: TeleportPhase,
    pub teleport_timer: u32,
    pub laser: LaserPhase,
    pub laser_timer: u32,
}

pub fn init(body: &mut BossBody) -> TriangleState {
    body.opacity = 255.0;
    TriangleState {
        summon_timer: 0,
        teleport: TeleportPhase::Idle,
        teleport_timer: 0,
        laser: LaserPhase::Cooldown,
        laser_timer: 120,
    }
}

/// Start and end of each of the three beams.
pub fn laser_segments(body: &BossBody) -> Vec<(Vec2, Vec2)> {
    (0..3)
        .map(|i| {
            let angle = body.angle + TAU / 3.0 * i as f32 - FRAC_PI_2;
            let dir = Vec2::from_angle(angle);
            let start = body.pos + dir * body.radius;
            (start, start + dir * LASER_LENGTH)
        })
        .collect()
}

pub fn update<R: Rng + ?Sized>(state: &mut TriangleState, body: &mut BossBody, ctx: &mut BossContext<'_, R>) {
    body.angle -= 0.02;
    state.summon_timer += 1;
    let f = ctx.frame as f32;

    match state.teleport {
        TeleportPhase::Idle => {
            body.pos.x = playfield::WIDTH / 2.0 + (f * 0.03).sin() * 200.0;
            body.pos.y = 80.0 + (f * 0.04).sin().abs() * 50.0;
            if ctx.every(TELEPORT_INTERVAL) {
                state.teleport = TeleportPhase::Out;
            }
        }
        TeleportPhase::Out => {
            body.opacity -= FADE_STEP;
            if body.opacity <= 0.0 {
                body.opacity = 0.0;
                state.teleport = TeleportPhase::Wait;
                state.teleport_timer = WAIT_FRAMES;
                body.pos = Vec2::new(
                    ctx.rng.gen_range(100.0..playfield::WIDTH - 100.0),
                    ctx.rng.gen_range(50.0..200.0),
                );
            }
        }
        TeleportPhase::Wait => {
            state.teleport_timer = state.teleport_timer.saturating_sub(1);
            if state.teleport_timer == 0 {
                state.teleport = TeleportPhase::In;
            }
        }
        TeleportPhase::In => {
            body.opacity += FADE_STEP;
            if body.opacity >= 255.0 {
                body.opacity = 255.0;
                state.teleport = TeleportPhase::Idle;
            }
        }
    }

    let stage = ctx.stage;
    if stage >= 2 && body.opacity > 200.0 {
        state.laser_timer = state.laser_timer.saturating_sub(1);
        if state.laser_timer == 0 {
            (state.laser, state.laser_timer) = state.laser.next();
            debug!(phase = ?state.laser, "triangle laser phase");
        }
        if state.laser == LaserPhase::Fire {
            let hit = laser_segments(body)
                .iter()
                .any(|(a, b)| line_circle_intersect(*a, *b, ctx.player.pos, ctx.player.hitbox + 6.0));
            if hit && ctx.hurt_player(LASER_DAMAGE, 0) {
                ctx.arena.explosion(ctx.player.pos, colors::PLAYER, 1, ctx.rng);
            }
        }

        if stage >= 3 && ctx.every(400) {
            let target = ctx.player.pos;
            for k in 0..3 {
                let a = k as f32 * TAU / 3.0 + f * 0.01;
                let pos = target + Vec2::from_angle(a) * PRISON_RADIUS;
                ctx.arena.spawn_enemy_bullet(BulletSpawn::new(
                    pos,
                    (target - pos) * 0.005,
                    ctx.base_speed * 0.8,
                    colors::LASER,
                ));
            }
        }
    }

    if !ctx.can_attack() || body.opacity <= 200.0 {
        return;
    }
    let (origin, target, speed, t) = (body.pos, ctx.player.pos, ctx.base_speed, state.summon_timer);

    if ctx.every(30) {
        patterns::aimed(origin, target, speed + 4.0, &mut ctx.arena.spawner());
    }
    if t % 60 == 0 {
        for dx in [50.0, -50.0] {
            ctx.arena.spawn_minion(Some(MinionKind::Drone), Some(origin + Vec2::new(dx, 0.0)), None, ctx.rng);
        }
    }
    if stage >= 1 {
        if t % 90 == 45 {
            ctx.arena.spawn_minion(Some(MinionKind::Swooper), Some(origin + Vec2::new(0.0, 50.0)), None, ctx.rng);
        }
        if ctx.every(40) {
            patterns::spread(origin, target, 3, FRAC_PI_4, speed, &mut ctx.arena.spawner());
        }
    }
    if stage >= 2 && t % 120 == 60 {
        for _ in 0..3 {
            ctx.arena.spawn_minion(Some(MinionKind::Orbiter), Some(origin), Some(body.id), ctx.rng);
        }
    }
    if stage >= 3 && t % 150 == 0 {
        let mini_bosses = ctx.arena.minions.iter().filter(|m| m.kind == MinionKind::MiniBoss).count();
        if mini_bosses < 3 {
            ctx.arena.spawn_minion(Some(MinionKind::MiniBoss), Some(origin), None, ctx.rng);
        }
    }
    if stage >= 4 {
        if ctx.every(5) {
            patterns::flower(origin, ctx.frame, 5, speed, &mut ctx.arena.spawner());
        }
        if t % 40 == 0 {
            ctx.arena.spawn_minion(None, None, None, ctx.rng);
        }
    }
}

pub fn draw(state: &TriangleState, body: &BossBody, frame: u64) -> Vec<DrawCommand> {
    let color = flash_color(body, colors::BOSS_TRIANGLE);
    let mut out = vec![
        DrawCommand::polygon(body.pos, polygon_points(3, body.radius, -FRAC_PI_2), color).rotated(body.angle),
        DrawCommand::polygon(body.pos, polygon_points(3, body.radius / 2.0, -FRAC_PI_2), color.with_alpha(120))
            .rotated(frame as f32 * 0.05)
            .outline(),
    ];
    match state.laser {
        LaserPhase::Cooldown => {}
        LaserPhase::Charge => {
            for (a, b) in laser_segments(body) {
                out.push(DrawCommand::line(a, b, 1.0, colors::LASER_TELEGRAPH));
            }
        }
        LaserPhase::Fire => {
            for (a, b) in laser_segments(body) {
                out.push(DrawCommand::line(a, b, 6.0, colors::LASER));
            }
        }
    }
    out
}
