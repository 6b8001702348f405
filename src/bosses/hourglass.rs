//! Hourglass: owner of the global time scale.
//!
//! From stage 2 it alternates NORMAL (300 ticks) and STOPPED (90 ticks).
//! Entering STOPPED freezes the player, fills the sky with a frozen rain row
//! and a ripple ring, then turns every live enemy bullet into a stationary
//! knife facing the player. Leaving STOPPED launches the knives at the
//! player's new position and returns the scale to 1.
//!
//! Around that cycle sit a swinging pendulum (stage 1+), stasis orbs
//! (stage 2+), sand geysers (stage 3+) and two fate beams (stage 4).

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_4, PI};

use rand::Rng;
use tracing::debug;

use super::{flash_color, BossContext};
use crate::constants::{bullet as bullet_k, colors, hazard, playfield};
use crate::entities::{BossBody, BulletSpawn, FrameEvent, Rgba, Shape};
use crate::geometry::{bearing, lerp, Vec2};
use crate::patterns;
use crate::render::DrawCommand;
use crate::time_scale::TimeScale;

pub const STOP_COOLDOWN: u32 = 300;
pub const STOP_DURATION: u32 = 90;
pub const HISTORY_LEN: usize = 30;

pub const PENDULUM_PIVOT: Vec2 = Vec2::new(playfield::WIDTH / 2.0, -50.0);
pub const PENDULUM_LENGTH: f32 = 450.0;
pub const PENDULUM_BOB_RADIUS: f32 = 35.0;
const PENDULUM_SPEED: f32 = 0.03;
const PENDULUM_DAMAGE: f32 = 35.0;
const PENDULUM_INVULN: u32 = 90;

const FATE_BEAM_INTERVAL: u64 = 300;
const FATE_BEAM_MAX_WIDTH: f32 = 80.0;
const FATE_BEAM_DAMAGE: f32 = 2.0;

const GLITCH_FRAMES: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimePhase {
    #[default]
    Normal,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamAxis {
    Vertical,
    Horizontal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FateBeam {
    pub axis: BeamAxis,
    /// x for a vertical beam, y for a horizontal one.
    pub at: f32,
    pub width: f32,
    pub active: bool,
}

impl FateBeam {
    fn new(axis: BeamAxis) -> FateBeam {
        FateBeam { axis, at: 0.0, width: 0.0, active: false }
    }

    pub fn covers(&self, point: Vec2) -> bool {
        let d = match self.axis {
            BeamAxis::Vertical => (point.x - self.at).abs(),
            BeamAxis::Horizontal => (point.y - self.at).abs(),
        };
        self.active && d < self.width / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HourglassState {
    pub phase: TimePhase,
    /// Ticks left in the current phase. Only counts from stage 2.
    pub timer: u32,
    pub target_angle: f32,
    pub pendulum_phase: f32,
    pub pendulum_angle: f32,
    pub history: VecDeque<Vec2>,
    pub fate_beams: Vec<FateBeam>,
}

pub fn init(_body: &mut BossBody) -> HourglassState {
    HourglassState {
        phase: TimePhase::Normal,
        timer: STOP_COOLDOWN,
        target_angle: 0.0,
        pendulum_phase: 0.0,
        pendulum_angle: 0.0,
        history: VecDeque::with_capacity(HISTORY_LEN),
        fate_beams: Vec::new(),
    }
}

pub fn on_stage_change(state: &mut HourglassState, stage: u8) {
    if stage >= 4 && state.fate_beams.is_empty() {
        state.fate_beams = vec![FateBeam::new(BeamAxis::Vertical), FateBeam::new(BeamAxis::Horizontal)];
    }
}

impl HourglassState {
    pub fn bob_position(&self) -> Vec2 {
        PENDULUM_PIVOT
            + Vec2::new(-self.pendulum_angle.sin(), self.pendulum_angle.cos()) * PENDULUM_LENGTH
    }

    /// Where the boss stood `HISTORY_LEN` ticks ago, once enough history exists.
    pub fn echo_position(&self) -> Option<Vec2> {
        if self.history.len() >= HISTORY_LEN {
            self.history.front().copied()
        } else {
            None
        }
    }
}

/// Returns the new global time scale when the STOPPED phase begins or ends.
pub fn update<R: Rng + ?Sized>(
    state: &mut HourglassState,
    body: &mut BossBody,
    ctx: &mut BossContext<'_, R>,
) -> Option<f32> {
    let f = ctx.frame as f32;
    let scale = ctx.time_scale.get();
    let (w, h) = (playfield::WIDTH, playfield::HEIGHT);
    let stage = ctx.stage;

    body.pos = Vec2::new(w / 2.0 + (f * 0.01).sin() * 100.0, 120.0 + (f * 0.02).cos() * 20.0);
    body.angle = lerp(body.angle, state.target_angle, 0.05);
    if state.history.len() == HISTORY_LEN {
        state.history.pop_front();
    }
    state.history.push_back(body.pos);

    if stage >= 1 {
        state.pendulum_phase += PENDULUM_SPEED * scale;
        state.pendulum_angle = state.pendulum_phase.sin() * FRAC_PI_4;
        let bob = state.bob_position();
        if scale > 0.0 && ctx.every(5) {
            let dir = Vec2::new(ctx.rng.gen_range(-0.2..0.2), 0.5).normalize_or_zero();
            ctx.arena.spawn_enemy_bullet(BulletSpawn::new(bob, dir, ctx.base_speed, colors::SAND));
        }
        if bob.distance(ctx.player.pos) < PENDULUM_BOB_RADIUS + ctx.player.hitbox
            && ctx.hurt_player(PENDULUM_DAMAGE, PENDULUM_INVULN)
        {
            ctx.arena.explosion(ctx.player.pos, colors::PLAYER, 15, ctx.rng);
        }
    }

    if stage >= 2 && scale > 0.0 && ctx.every(180) {
        ctx.arena.spawn_stasis_orb(ctx.rng);
    }

    if stage >= 4 {
        if ctx.frame % FATE_BEAM_INTERVAL == 0 && scale > 0.0 {
            for beam in &mut state.fate_beams {
                beam.active = true;
                beam.width = 0.0;
                beam.at = match beam.axis {
                    BeamAxis::Vertical => ctx.rng.gen_range(50.0..w - 50.0),
                    BeamAxis::Horizontal => ctx.rng.gen_range(50.0..h - 50.0),
                };
            }
        }
        for i in 0..state.fate_beams.len() {
            if !state.fate_beams[i].active {
                continue;
            }
            state.fate_beams[i].width += 2.0 * scale;
            if state.fate_beams[i].covers(ctx.player.pos) && ctx.hurt_player(FATE_BEAM_DAMAGE, 0) {
                ctx.arena.explosion(ctx.player.pos, colors::PLAYER, 1, ctx.rng);
            }
            if state.fate_beams[i].width > FATE_BEAM_MAX_WIDTH {
                state.fate_beams[i].active = false;
            }
        }
    }

    let mut next_scale = None;
    if stage >= 2 {
        state.timer = state.timer.saturating_sub(1);
        if state.timer == 0 {
            next_scale = Some(match state.phase {
                TimePhase::Normal => stop_time(state, body, ctx),
                TimePhase::Stopped => resume_time(state, ctx),
            });
        }
    }
    let effective = next_scale.map(TimeScale::new).unwrap_or(ctx.time_scale);

    if stage >= 3 && ctx.every(150) && !effective.is_frozen() {
        patterns::sand_geyser(w, h, ctx.base_speed, ctx.rng, &mut ctx.arena.spawner());
    }

    if ctx.can_attack() && state.phase == TimePhase::Normal {
        attack(state, body, ctx);
    }
    next_scale
}

fn stop_time<R: Rng + ?Sized>(state: &mut HourglassState, body: &BossBody, ctx: &mut BossContext<'_, R>) -> f32 {
    state.phase = TimePhase::Stopped;
    state.timer = STOP_DURATION;
    state.target_angle += PI;
    ctx.player.frozen = true;
    ctx.player.freeze_timer = 0;
    ctx.arena.shockwave(body.pos, colors::BOSS_HOURGLASS);
    ctx.arena.effects.glitch_frames = GLITCH_FRAMES;

    let speed = ctx.base_speed;
    let mut x = 20.0;
    while x < playfield::WIDTH {
        ctx.arena.spawn_enemy_bullet(BulletSpawn::new(Vec2::new(x, -20.0), Vec2::new(0.0, 1.0), speed, colors::SAND));
        x += 40.0;
    }
    patterns::ring(body.pos, 24, 0.0, speed * 1.5, &mut ctx.arena.spawner());

    // every live bullet, including the two volleys above, becomes a knife
    let target = ctx.player.pos;
    for b in &mut ctx.arena.enemy_bullets {
        b.shape = Shape::Knife;
        b.color = colors::KNIFE;
        b.radius = bullet_k::KNIFE_HIT_SIZE;
        b.angle = bearing(b.pos, target);
        b.vel = Vec2::ZERO;
        b.accelerating = false;
    }
    ctx.arena.emit(FrameEvent::TimeStopped);
    ctx.arena.emit(FrameEvent::PlayerFrozen);
    debug!(knives = ctx.arena.enemy_bullets.len(), "time stopped");
    TimeScale::STOPPED.get()
}

fn resume_time<R: Rng + ?Sized>(state: &mut HourglassState, ctx: &mut BossContext<'_, R>) -> f32 {
    state.phase = TimePhase::Normal;
    state.timer = STOP_COOLDOWN;
    state.target_angle += PI;
    ctx.player.frozen = false;
    ctx.arena.effects.glitch_frames = GLITCH_FRAMES;

    let target = ctx.player.pos;
    let knife_speed = ctx.base_speed * 2.0;
    for b in &mut ctx.arena.enemy_bullets {
        if b.shape == Shape::Knife {
            b.angle = bearing(b.pos, target);
            b.vel = Vec2::from_angle(b.angle) * knife_speed;
        } else if b.pos.y < 0.0 {
            b.vel.y = knife_speed;
        }
    }
    ctx.arena.emit(FrameEvent::TimeResumed);
    debug!("time resumed");
    TimeScale::NORMAL.get()
}

fn attack<R: Rng + ?Sized>(state: &HourglassState, body: &BossBody, ctx: &mut BossContext<'_, R>) {
    let (speed, stage, target) = (ctx.base_speed, ctx.stage, ctx.player.pos);
    let mut sources = vec![(body.pos, None)];
    if stage >= 4 {
        sources.push((Vec2::new(playfield::WIDTH - body.pos.x, body.pos.y), Some(colors::SHADOW)));
    }

    for (origin, tint) in sources {
        let arena = &mut *ctx.arena;
        let mut spawn = |s: BulletSpawn| {
            arena.spawn_enemy_bullet(match tint {
                Some(c) => s.color(c),
                None => s,
            });
        };
        if ctx.frame % 60 == 0 {
            patterns::hourglass_splash(origin, ctx.frame, speed, &mut spawn);
        }
        if stage >= 1 && ctx.frame % 120 == 0 {
            patterns::sandstorm(playfield::WIDTH, speed, ctx.rng, &mut spawn);
        }
        if stage >= 2 && ctx.frame % 5 == 0 && ctx.rng.gen_bool(0.2) {
            patterns::aimed(origin, target, speed, &mut spawn);
        }
        if stage >= 3 && ctx.frame % 40 == 0 {
            patterns::ring(origin, 10, 0.0, speed, &mut spawn);
        }
    }

    if stage >= 4 {
        // the echo replays the main splash from where the boss stood
        if let Some(echo) = state.echo_position() {
            if ctx.frame % 60 == HISTORY_LEN as u64 {
                let frame = ctx.frame - HISTORY_LEN as u64;
                patterns::hourglass_splash(echo, frame, speed, &mut |s: BulletSpawn| {
                    ctx.arena.spawn_enemy_bullet(s.color(colors::SHADOW.with_alpha(150)));
                });
            }
        }
        if ctx.every(90) {
            patterns::timeline_collapse(playfield::WIDTH, playfield::HEIGHT, speed, ctx.rng, &mut ctx.arena.spawner());
        }
    }
}

fn glass(centre: Vec2, angle: f32, color: Rgba) -> Vec<DrawCommand> {
    vec![
        DrawCommand::polygon(centre, vec![Vec2::new(-30.0, -50.0), Vec2::new(30.0, -50.0), Vec2::ZERO], color)
            .rotated(angle)
            .outline(),
        DrawCommand::polygon(centre, vec![Vec2::new(-30.0, 50.0), Vec2::new(30.0, 50.0), Vec2::ZERO], color)
            .rotated(angle)
            .outline(),
    ]
}

pub fn draw(state: &HourglassState, body: &BossBody, frame: u64, stage: u8) -> Vec<DrawCommand> {
    let mut out = Vec::new();

    for beam in state.fate_beams.iter().filter(|b| b.active) {
        let (pos, w, h) = match beam.axis {
            BeamAxis::Vertical => (Vec2::new(beam.at, playfield::HEIGHT / 2.0), beam.width, playfield::HEIGHT),
            BeamAxis::Horizontal => (Vec2::new(playfield::WIDTH / 2.0, beam.at), playfield::WIDTH, beam.width),
        };
        out.push(DrawCommand::rect(pos, w, h, colors::DANGER_ZONE.with_alpha(100)));
    }

    if stage >= 1 {
        let bob = state.bob_position();
        out.push(DrawCommand::line(PENDULUM_PIVOT, bob, 4.0, colors::BOSS_HOURGLASS));
        out.push(DrawCommand::circle(bob, PENDULUM_BOB_RADIUS, Rgba::rgb(200, 200, 200)));
    }

    if stage >= 4 {
        if let Some(echo) = state.echo_position() {
            out.extend(glass(echo, body.angle, colors::SHADOW.with_alpha(90)));
        }
    }

    if state.phase == TimePhase::Stopped {
        let jitter = |k: f32| Vec2::new((frame as f32 * k).sin() * 2.0, (frame as f32 * k).cos() * 2.0);
        out.extend(glass(body.pos + jitter(1.3), body.angle, Rgba::rgb(0, 255, 255)));
        out.extend(glass(body.pos + jitter(2.1), body.angle, Rgba::rgb(255, 0, 255)));
        out.push(DrawCommand::polygon(
            body.pos,
            vec![Vec2::new(-20.0, -40.0), Vec2::new(20.0, -40.0), Vec2::new(0.0, -5.0)],
            Rgba::rgb(100, 100, 100),
        ));
    } else {
        out.extend(glass(body.pos, body.angle, flash_color(body, colors::BOSS_HOURGLASS)));
        let level = 10.0 + (frame % 40) as f32;
        out.push(DrawCommand::polygon(
            body.pos,
            vec![Vec2::new(-20.0, 45.0), Vec2::new(20.0, 45.0), Vec2::new(0.0, 45.0 - level * 0.5)],
            colors::SAND,
        ));
        out.push(DrawCommand::line(body.pos + Vec2::new(0.0, -5.0), body.pos + Vec2::new(0.0, 45.0), 2.0, colors::SAND));
    }
    out
}

/// Sand traps are dropped by the simulation, not the boss update.
pub fn sand_trap_due(stage: u8, frame: u64) -> bool {
    stage >= 1 && frame % hazard::SAND_TRAP_INTERVAL == 0
}

/// Every enemy bullet reverses at stage 3+ while time runs normally.
pub fn rewind_due(stage: u8, frame: u64, scale: TimeScale) -> bool {
    stage >= 3 && scale == TimeScale::NORMAL && frame % hazard::REWIND_INTERVAL == 0
}
