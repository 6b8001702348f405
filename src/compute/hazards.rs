//! Area hazards and loose debris: stasis orbs, sand traps, the timeline
//! rewind, falling pickups and fading particles.

use rand::Rng;
use tracing::debug;

use crate::constants::{colors, hazard as k, pickup as pickup_k};
use crate::entities::Arena;
use crate::geometry::Vec2;
use crate::time_scale::TimeScale;

/// Orbs drift toward the player and leave once far off either edge.
pub fn update_stasis_orbs(arena: &mut Arena, player: Vec2, scale: TimeScale, height: f32) {
    if scale.is_frozen() {
        return;
    }
    let s = scale.get();
    arena.stasis_orbs.retain_mut(|orb| {
        let desired = (player - orb.pos).normalize_or_zero() * k::STASIS_ORB_SPEED;
        orb.vel = orb.vel.lerp(desired, k::STASIS_ORB_STEER);
        orb.pos += orb.vel * s;
        orb.pos.y <= height + 50.0 && orb.pos.y >= -50.0
    });
}

pub fn update_sand_traps(arena: &mut Arena, scale: TimeScale) {
    if scale.is_frozen() {
        return;
    }
    arena.sand_traps.retain_mut(|t| {
        t.life = t.life.saturating_sub(1);
        t.life > 0
    });
}

pub fn spawn_random_sand_trap<R: Rng + ?Sized>(arena: &mut Arena, width: f32, height: f32, rng: &mut R) {
    let pos = Vec2::new(rng.gen_range(50.0..width - 50.0), rng.gen_range(50.0..height - 50.0));
    arena.spawn_sand_trap(pos);
}

/// Every enemy bullet reverses course.
pub fn rewind<R: Rng + ?Sized>(arena: &mut Arena, origin: Vec2, rng: &mut R) {
    for b in arena.enemy_bullets.iter_mut() {
        b.vel = b.vel * -1.0;
    }
    arena.effects.glitch_frames = arena.effects.glitch_frames.max(10);
    arena.explosion(origin, colors::BOSS_HOURGLASS, 20, rng);
    debug!(bullets = arena.enemy_bullets.len(), "timeline rewind");
}

pub fn update_pickups(arena: &mut Arena, scale: TimeScale, height: f32) {
    let fall = pickup_k::FALL_SPEED * scale.get();
    arena.pickups.retain_mut(|p| {
        p.pos.y += fall;
        p.pos.y <= height + p.radius
    });
}

pub fn update_particles(arena: &mut Arena) {
    arena.particles.retain_mut(|p| {
        if p.shockwave {
            p.size += 8.0;
        } else {
            p.pos += p.vel;
        }
        p.life -= 0.05;
        p.life > 0.0
    });
}

pub fn update_effects(arena: &mut Arena) {
    arena.effects.glitch_frames = arena.effects.glitch_frames.saturating_sub(1);
    arena.effects.shake = (arena.effects.shake * 0.9 - 0.1).max(0.0);
}
