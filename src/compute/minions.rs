//! Minion movement and fire. Only runs while time is flowing.

use std::f32::consts::FRAC_PI_4;

use rand::Rng;

use crate::constants::{colors, minion as k, playfield};
use crate::entities::{Arena, BossBody, BulletSpawn, Minion, MinionKind};
use crate::geometry::{bearing, Vec2};
use crate::patterns;
use crate::time_scale::TimeScale;

/// What a minion asked for this tick, applied after the sweep so the
/// collection is not borrowed twice.
enum Order {
    Shoot(BulletSpawn),
    Summon(Vec2),
}

fn orbit_parent_alive(minion: &Minion, boss: &BossBody) -> bool {
    boss.active && minion.orbit_parent == Some(boss.id)
}

/// Move one minion; returns `false` when it should leave the world.
fn step(minion: &mut Minion, boss: &BossBody, player: Vec2, frame: u64, s: f32) -> bool {
    let f = frame as f32;
    let i = minion.phase;
    match minion.kind {
        MinionKind::Drone => {
            minion.pos.y += 2.0 * s;
            minion.pos.x += (f * 0.05 + i).sin() * s;
        }
        MinionKind::Swooper => {
            minion.pos.y += 3.0 * s;
            minion.pos.x += (f * 0.1 + i).sin() * 3.0 * s;
        }
        MinionKind::Orbiter => {
            if !orbit_parent_alive(minion, boss) {
                return false;
            }
            minion.orbit_angle += k::ORBIT_SPEED * s;
            minion.pos = boss.pos + Vec2::from_angle(minion.orbit_angle) * k::ORBIT_RADIUS;
        }
        MinionKind::MiniBoss => {
            let target = Vec2::new(
                playfield::WIDTH / 2.0 + (f * 0.02 + i).sin() * 200.0,
                200.0 + (f * 0.04 + i).sin() * 30.0,
            );
            minion.pos = minion.pos.lerp(target, 0.02 * s);
        }
        MinionKind::LustOrb => {
            minion.vel = (player - minion.pos).normalize_or_zero() * k::LUST_ORB_SPEED;
            minion.pos += minion.vel * s;
        }
    }
    minion.pos.y <= playfield::HEIGHT + k::DESPAWN_MARGIN
}

fn fire<R: Rng + ?Sized>(
    minion: &mut Minion,
    player: Vec2,
    speed_scale: f32,
    orders: &mut Vec<Order>,
    rng: &mut R,
) {
    if minion.kind == MinionKind::LustOrb {
        return;
    }
    minion.shoot_timer = minion.shoot_timer.saturating_sub(1);
    if minion.shoot_timer > 0 {
        return;
    }
    let pos = minion.pos;
    match minion.kind {
        MinionKind::Drone => {
            orders.push(Order::Shoot(BulletSpawn::new(pos, Vec2::new(0.0, 1.0), 4.0 * speed_scale, colors::MINION)));
            minion.shoot_timer = 120;
        }
        MinionKind::Swooper => {
            let dir = Vec2::from_angle(bearing(pos, player));
            orders.push(Order::Shoot(BulletSpawn::new(pos, dir, 4.0 * speed_scale, colors::MINION)));
            minion.shoot_timer = 120;
        }
        MinionKind::Orbiter => {
            orders.push(Order::Shoot(BulletSpawn::angled(pos, minion.orbit_angle, 3.0 * speed_scale, colors::MINION)));
            minion.shoot_timer = 180;
        }
        MinionKind::MiniBoss => {
            patterns::spread(pos, player, 3, FRAC_PI_4, 4.0 * speed_scale, &mut |s: BulletSpawn| {
                orders.push(Order::Shoot(s.color(colors::MINI_BOSS)))
            });
            if rng.gen_bool(0.3) {
                orders.push(Order::Summon(pos + Vec2::new(0.0, 20.0)));
            }
            minion.shoot_timer = 100;
        }
        MinionKind::LustOrb => {}
    }
}

/// One tick of every minion. No-op while time is stopped.
pub fn update_minions<R: Rng + ?Sized>(
    arena: &mut Arena,
    boss: &BossBody,
    player: Vec2,
    frame: u64,
    scale: TimeScale,
    speed_scale: f32,
    rng: &mut R,
) {
    if scale.is_frozen() {
        return;
    }
    let s = scale.get();
    let mut orders = Vec::new();
    arena.minions.retain_mut(|m| {
        if !step(m, boss, player, frame, s) {
            return false;
        }
        fire(m, player, speed_scale, &mut orders, rng);
        true
    });

    for order in orders {
        match order {
            Order::Shoot(spawn) => {
                arena.spawn_enemy_bullet(spawn);
            }
            Order::Summon(pos) => arena.spawn_minion(Some(MinionKind::Drone), Some(pos), None, rng),
        }
    }
}
