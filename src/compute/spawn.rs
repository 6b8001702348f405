//! Capped spawning into the arena. Requests past a cap are dropped silently.

use std::f32::consts::TAU;

use rand::Rng;

use crate::constants::{caps, hazard, pickup as pickup_k, playfield};
use crate::entities::{
    Arena, BossKind, Bullet, BulletSpawn, FrameEvent, Minion, MinionKind, Particle, Pickup,
    PickupKind, Rgba, SandTrap, StasisOrb,
};
use crate::geometry::Vec2;

impl Arena {
    pub fn emit(&mut self, event: FrameEvent) {
        self.events.push(event);
    }

    /// Returns `false` when the request was dropped (cap or malformed).
    pub fn spawn_enemy_bullet(&mut self, spawn: BulletSpawn) -> bool {
        if self.enemy_bullets.len() >= caps::MAX_ENEMY_BULLETS {
            return false;
        }
        match Bullet::from_spawn(&spawn) {
            Some(bullet) => {
                self.enemy_bullets.push(bullet);
                true
            }
            None => false,
        }
    }

    /// Adapter handed to the pattern library.
    pub fn spawner(&mut self) -> impl FnMut(BulletSpawn) + '_ {
        move |spawn| {
            self.spawn_enemy_bullet(spawn);
        }
    }

    pub fn spawn_player_bullet(&mut self, bullet: Bullet) {
        if self.player_bullets.len() < caps::MAX_PLAYER_BULLETS {
            self.player_bullets.push(bullet);
        }
    }

    /// `kind == None` picks a drone or swooper; `pos == None` drops it in
    /// from above at a random x.
    pub fn spawn_minion<R: Rng + ?Sized>(
        &mut self,
        kind: Option<MinionKind>,
        pos: Option<Vec2>,
        orbit_parent: Option<u32>,
        rng: &mut R,
    ) {
        if self.minions.len() >= caps::MAX_MINIONS {
            return;
        }
        let kind = kind.unwrap_or_else(|| {
            if rng.gen_bool(0.5) {
                MinionKind::Drone
            } else {
                MinionKind::Swooper
            }
        });
        let pos = pos.unwrap_or_else(|| Vec2::new(rng.gen_range(50.0..playfield::WIDTH - 50.0), -30.0));
        let (hp, radius, score) = kind.stats();
        self.minions.push(Minion {
            kind,
            pos,
            vel: Vec2::ZERO,
            hp,
            radius,
            score,
            shoot_timer: rng.gen_range(60..=120),
            orbit_angle: rng.gen_range(0.0..TAU),
            orbit_parent,
            phase: self.minions.len() as f32,
        });
    }

    /// Rolls the pickup type. Heart bosses plant traps 30% of the time.
    pub fn spawn_pickup<R: Rng + ?Sized>(&mut self, pos: Vec2, boss: BossKind, rng: &mut R) {
        if self.pickups.len() >= caps::MAX_PICKUPS {
            return;
        }
        let kind = if boss == BossKind::Heart && rng.gen_bool(pickup_k::TRAP_CHANCE_HEART) {
            PickupKind::Trap
        } else {
            match rng.gen::<f32>() {
                r if r < 0.22 => PickupKind::Spread,
                r if r < 0.44 => PickupKind::Rapid,
                r if r < 0.66 => PickupKind::Homing,
                r if r < 0.88 => PickupKind::Heal,
                _ => PickupKind::ShieldCharge,
            }
        };
        self.pickups.push(Pickup { kind, pos, radius: pickup_k::RADIUS });
        self.emit(FrameEvent::PickupSpawned { kind });
    }

    pub fn explosion<R: Rng + ?Sized>(&mut self, pos: Vec2, color: Rgba, count: usize, rng: &mut R) {
        let room = caps::MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(1.0..4.0);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                size: rng.gen_range(2.0..5.0),
                color,
                shockwave: false,
            });
        }
    }

    /// Expanding ring used for big moments (stage change, time stop).
    pub fn shockwave(&mut self, pos: Vec2, color: Rgba) {
        if self.particles.len() < caps::MAX_PARTICLES {
            self.particles.push(Particle {
                pos,
                vel: Vec2::ZERO,
                life: 1.0,
                size: 10.0,
                color,
                shockwave: true,
            });
        }
    }

    pub fn spawn_stasis_orb<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.stasis_orbs.push(StasisOrb {
            pos: Vec2::new(
                rng.gen_range(50.0..playfield::WIDTH - 50.0),
                rng.gen_range(50.0..200.0),
            ),
            vel: Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(1.0..2.0)),
            radius: hazard::STASIS_ORB_RADIUS,
        });
    }

    pub fn spawn_sand_trap(&mut self, pos: Vec2) {
        self.sand_traps.push(SandTrap {
            pos,
            radius: hazard::SAND_TRAP_RADIUS,
            life: hazard::SAND_TRAP_LIFE,
        });
    }
}
