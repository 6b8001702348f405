//! Per-tick projectile rules: movement scaled by the time multiplier, edge
//! bounces, acceleration, fractal splitting and player-side homing.

use std::f32::consts::FRAC_PI_2;

use rand::Rng;

use crate::constants::{bullet as k, caps, player as player_k};
use crate::entities::{Bullet, BulletOwner, BulletSpawn, Minion, Shape, Split};
use crate::geometry::Vec2;
use crate::time_scale::TimeScale;

impl Bullet {
    /// Build an enemy bullet from a spawn request. Requests with non-finite
    /// components are rejected instead of seeding NaN into the world.
    pub fn from_spawn(spawn: &BulletSpawn) -> Option<Bullet> {
        let vel = spawn.velocity();
        if !spawn.pos.is_finite() || !vel.is_finite() {
            return None;
        }
        let damage = match spawn.shape {
            Shape::Meteor => k::METEOR_DAMAGE,
            _ => k::DAMAGE,
        };
        Some(Bullet {
            pos: spawn.pos,
            vel,
            radius: k::ENEMY_RADIUS,
            owner: BulletOwner::Enemy,
            shape: spawn.shape,
            color: spawn.color,
            angle: vel.to_angle(),
            bounces: spawn.bounces,
            split: spawn.split.filter(|s| s.generations > 0),
            accelerating: spawn.accelerating,
            homing: false,
            damage,
        })
    }

    pub fn player_shot(pos: Vec2, vel: Vec2, damage: f32, homing: bool) -> Bullet {
        Bullet {
            pos,
            vel,
            radius: player_k::BULLET_RADIUS,
            owner: BulletOwner::Player,
            shape: Shape::Circle,
            color: crate::constants::colors::PLAYER_BULLET,
            angle: vel.to_angle(),
            bounces: 0,
            split: None,
            accelerating: false,
            homing,
            damage,
        }
    }

    /// Radius used against the player's hitbox.
    pub fn hit_size(&self) -> f32 {
        match self.shape {
            Shape::Triangle => k::TRIANGLE_HIT_SIZE,
            Shape::Meteor => k::METEOR_HIT_SIZE,
            Shape::Knife => k::KNIFE_HIT_SIZE,
            _ => self.radius,
        }
    }
}

pub fn in_bounds(pos: Vec2, margin: f32, width: f32, height: f32) -> bool {
    pos.x >= -margin && pos.x <= width + margin && pos.y >= -margin && pos.y <= height + margin
}

/// Advance one bullet by one tick: acceleration, motion, bounce, spin.
pub fn step(bullet: &mut Bullet, scale: TimeScale, width: f32, height: f32) {
    let s = scale.get();
    if s <= 0.0 {
        return;
    }

    if bullet.accelerating {
        let speed = (bullet.vel.length() * k::ACCEL_FACTOR.powf(s)).min(k::MAX_ACCEL_SPEED);
        bullet.vel = bullet.vel.normalize_or_zero() * speed;
    }

    bullet.pos += bullet.vel * s;

    if bullet.bounces > 0 {
        let mut bounced = false;
        if (bullet.pos.x < 0.0 && bullet.vel.x < 0.0) || (bullet.pos.x > width && bullet.vel.x > 0.0) {
            bullet.pos.x = bullet.pos.x.clamp(0.0, width);
            bullet.vel.x = -bullet.vel.x;
            bounced = true;
        }
        if (bullet.pos.y < 0.0 && bullet.vel.y < 0.0) || (bullet.pos.y > height && bullet.vel.y > 0.0) {
            bullet.pos.y = bullet.pos.y.clamp(0.0, height);
            bullet.vel.y = -bullet.vel.y;
            bounced = true;
        }
        if bounced {
            bullet.bounces -= 1;
        }
    }

    match bullet.shape {
        Shape::Rect => bullet.angle += k::RECT_SPIN * s,
        // knives keep the heading they were morphed with until relaunched
        Shape::Knife => {}
        _ => {
            if bullet.vel.length() > f32::EPSILON {
                bullet.angle = bullet.vel.to_angle();
            }
        }
    }
}

/// Count the split timer down; returns `true` once the bullet is due.
pub fn split_due(bullet: &mut Bullet, scale: TimeScale) -> bool {
    match bullet.split.as_mut() {
        Some(split) if split.generations > 0 => {
            split.timer -= scale.get();
            split.timer <= 0.0
        }
        _ => false,
    }
}

/// Four children at 0°, 90°, 180° and 270° from the parent's heading, each
/// one generation down and 1.2× faster.
pub fn split_children<R: Rng + ?Sized>(parent: &Bullet, rng: &mut R) -> Vec<Bullet> {
    let Some(split) = parent.split else {
        return Vec::new();
    };
    if split.generations == 0 {
        return Vec::new();
    }
    let heading = parent.vel.to_angle();
    let speed = parent.vel.length() * k::SPLIT_SPEED_MULT;
    let generations = split.generations - 1;

    (0..4)
        .map(|i| {
            let vel = Vec2::from_angle(heading + FRAC_PI_2 * i as f32) * speed;
            let child_split = (generations > 0).then(|| Split {
                generations,
                timer: rng.gen_range(k::SPLIT_DELAY_MIN..=k::SPLIT_DELAY_MAX) as f32,
            });
            Bullet {
                pos: parent.pos,
                vel,
                angle: vel.to_angle(),
                split: child_split,
                ..parent.clone()
            }
        })
        .collect()
}

/// Move every enemy bullet, replace due splitters with their children and
/// drop anything far outside the playfield.
pub fn update_enemy_bullets<R: Rng + ?Sized>(
    bullets: &mut Vec<Bullet>,
    scale: TimeScale,
    width: f32,
    height: f32,
    rng: &mut R,
) {
    let mut children = Vec::new();
    bullets.retain_mut(|b| {
        step(b, scale, width, height);
        if split_due(b, scale) {
            children.extend(split_children(b, rng));
            return false;
        }
        in_bounds(b.pos, k::ENEMY_MARGIN, width, height)
    });
    let room = caps::MAX_ENEMY_BULLETS.saturating_sub(bullets.len());
    bullets.extend(children.into_iter().take(room));
}

/// Nearest minion within range, else the boss within range.
pub fn homing_target(pos: Vec2, minions: &[Minion], boss: Option<Vec2>) -> Option<Vec2> {
    let nearest = minions
        .iter()
        .map(|m| (m.pos, pos.distance(m.pos)))
        .filter(|(_, d)| *d < k::HOMING_MINION_RANGE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p);
    nearest.or_else(|| boss.filter(|b| pos.distance(*b) < k::HOMING_BOSS_RANGE))
}

/// Bend the velocity toward `target` by at most the steer limit.
pub fn steer_toward(bullet: &mut Bullet, target: Vec2) {
    let max_speed = player_k::BULLET_SPEED * k::HOMING_MAX_SPEED_MULT;
    let desired = (target - bullet.pos).normalize_or_zero() * max_speed;
    let mut steer = desired - bullet.vel;
    if steer.length() > k::HOMING_STEER {
        steer = steer.normalize_or_zero() * k::HOMING_STEER;
    }
    bullet.vel += steer;
    if bullet.vel.length() > max_speed {
        bullet.vel = bullet.vel.normalize_or_zero() * max_speed;
    }
}

pub fn update_player_bullets(
    bullets: &mut Vec<Bullet>,
    minions: &[Minion],
    boss: Option<Vec2>,
    scale: TimeScale,
    width: f32,
    height: f32,
) {
    bullets.retain_mut(|b| {
        if b.homing {
            if let Some(target) = homing_target(b.pos, minions, boss) {
                steer_toward(b, target);
            }
        }
        step(b, scale, width, height);
        in_bounds(b.pos, k::PLAYER_MARGIN, width, height)
    });
}
