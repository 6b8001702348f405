//! Player-side rules: timers, shield, movement, weapons, damage and pickups.

use std::f32::consts::FRAC_PI_2;

use rand::Rng;
use tracing::debug;

use crate::constants::{hazard, pickup as pickup_k, player as k};
use crate::entities::{
    Arena, Blocker, Bullet, FrameEvent, PickupKind, Player, SandTrap, Weapon, WeaponType,
};
use crate::geometry::Vec2;

/// Apply hazard damage unless the player is invulnerable or shielded.
/// Returns whether damage landed. `invuln == 0` leaves the current window
/// untouched, which is how continuous beams deal damage every tick.
pub fn damage_player(player: &mut Player, arena: &mut Arena, amount: f32, invuln: u32) -> bool {
    if player.invulnerable > 0 || player.shield_timer > 0 {
        return false;
    }
    player.hp -= amount;
    if invuln > 0 {
        player.invulnerable = invuln;
    }
    arena.effects.shake = arena.effects.shake.max(amount.min(10.0));
    arena.emit(FrameEvent::PlayerDamaged { amount });
    true
}

pub fn heal_player(player: &mut Player, arena: &mut Arena, amount: f32) {
    let before = player.hp;
    player.hp = (player.hp + amount).min(k::MAX_HP);
    arena.emit(FrameEvent::PlayerHealed { amount: player.hp - before });
}

/// Shield, freeze, weapon and invulnerability countdowns.
pub fn step_timers(player: &mut Player) {
    player.shield_timer = player.shield_timer.saturating_sub(1);

    // a zero freeze timer with `frozen` set is a time stop; only the boss lifts it
    if player.freeze_timer > 0 {
        player.freeze_timer -= 1;
        if player.freeze_timer == 0 {
            player.frozen = false;
        }
    }

    if player.weapon.timer > 0 {
        player.weapon.timer -= 1;
        if player.weapon.timer == 0 {
            player.weapon = Weapon::default();
        }
    }

    player.invulnerable = player.invulnerable.saturating_sub(1);
}

/// Spend a charge for a fresh shield window. No-op while one is running,
/// without charges, or while frozen.
pub fn try_activate_shield(player: &mut Player, arena: &mut Arena) -> bool {
    if player.shield_charges == 0 || player.shield_timer > 0 || player.frozen {
        return false;
    }
    player.shield_charges -= 1;
    player.shield_timer = k::SHIELD_DURATION;
    arena.emit(FrameEvent::ShieldActivated);
    debug!(charges = player.shield_charges, "shield activated");
    true
}

pub fn in_sand(pos: Vec2, traps: &[SandTrap]) -> bool {
    traps.iter().any(|t| pos.distance(t.pos) < t.radius + k::RADIUS)
}

/// Circle-vs-rectangle overlap against every blocker.
pub fn blocked(pos: Vec2, radius: f32, blockers: &[Blocker]) -> bool {
    blockers.iter().any(|b| {
        let nearest = Vec2::new(
            pos.x.clamp(b.center.x - b.half_w, b.center.x + b.half_w),
            pos.y.clamp(b.center.y - b.half_h, b.center.y + b.half_h),
        );
        pos.distance(nearest) < radius
    })
}

/// Move along each axis separately so the player slides along blockers,
/// then clamp to the playfield.
pub fn move_player(
    player: &mut Player,
    movement: Vec2,
    blockers: &[Blocker],
    traps: &[SandTrap],
    width: f32,
    height: f32,
) {
    if player.frozen {
        return;
    }
    let dir = if movement.length() > 1.0 { movement.normalize_or_zero() } else { movement };
    if !dir.is_finite() {
        return;
    }
    let mult = if in_sand(player.pos, traps) { hazard::SAND_SLOW } else { 1.0 };
    let delta = dir * (k::SPEED * mult);

    let next_x = Vec2::new(player.pos.x + delta.x, player.pos.y);
    if !blocked(next_x, player.radius, blockers) {
        player.pos = next_x;
    }
    let next_y = Vec2::new(player.pos.x, player.pos.y + delta.y);
    if !blocked(next_y, player.radius, blockers) {
        player.pos = next_y;
    }

    player.pos.x = player.pos.x.clamp(player.radius, width - player.radius);
    player.pos.y = player.pos.y.clamp(player.radius, height - player.radius);
}

pub fn fire_interval(weapon: &Weapon) -> u64 {
    match weapon.kind {
        WeaponType::Rapid => 5u64.saturating_sub(weapon.level as u64).max(2),
        _ => k::FIRE_INTERVAL,
    }
}

/// Bullets the current weapon fires this volley.
pub fn volley<R: Rng + ?Sized>(player: &Player, rng: &mut R) -> Vec<Bullet> {
    let pos = player.pos;
    let speed = k::BULLET_SPEED;
    let shot = |dx: f32, dy: f32, vx: f32, vy: f32, damage: f32| {
        Bullet::player_shot(pos + Vec2::new(dx, dy), Vec2::new(vx, vy), damage, false)
    };
    let level = player.weapon.level.clamp(1, k::MAX_WEAPON_LEVEL);

    match player.weapon.kind {
        WeaponType::Default => match level {
            1 => vec![shot(-5.0, -10.0, 0.0, -speed, 10.0), shot(5.0, -10.0, 0.0, -speed, 10.0)],
            2 => vec![
                shot(0.0, -10.0, 0.0, -speed, 10.0),
                shot(-8.0, -5.0, -1.0, -speed, 10.0),
                shot(8.0, -5.0, 1.0, -speed, 10.0),
            ],
            _ => vec![
                shot(-5.0, -10.0, 0.0, -speed, 10.0),
                shot(5.0, -10.0, 0.0, -speed, 10.0),
                shot(-12.0, -5.0, -2.0, -speed, 10.0),
                shot(12.0, -5.0, 2.0, -speed, 10.0),
            ],
        },
        WeaponType::Rapid => {
            let mut out = vec![shot(0.0, -10.0, 0.0, -speed * 1.5, 8.0)];
            if level >= 3 {
                out.push(shot(-10.0, 0.0, 0.0, -speed, 6.0));
                out.push(shot(10.0, 0.0, 0.0, -speed, 6.0));
            }
            out
        }
        WeaponType::Spread => {
            let count = 3 + 2 * level as usize;
            let step = 0.2 + 0.1 * level as f32;
            (0..count)
                .map(|i| {
                    let angle = -FRAC_PI_2 + (i as f32 - (count - 1) as f32 / 2.0) * step;
                    let vel = Vec2::from_angle(angle) * speed;
                    shot(0.0, -10.0, vel.x, vel.y, 8.0)
                })
                .collect()
        }
        WeaponType::Homing => {
            let count = 1 + 2 * level as usize;
            (0..count)
                .map(|_| {
                    let angle = -FRAC_PI_2 + rng.gen_range(-0.5..0.5);
                    let vel = Vec2::from_angle(angle) * (speed * 0.5);
                    Bullet::player_shot(pos + Vec2::new(0.0, -10.0), vel, 12.0, true)
                })
                .collect()
        }
    }
}

/// Fire on the weapon's interval. Frozen players cannot shoot.
pub fn fire_weapon<R: Rng + ?Sized>(player: &Player, frame: u64, arena: &mut Arena, rng: &mut R) {
    if player.frozen || frame % fire_interval(&player.weapon) != 0 {
        return;
    }
    for bullet in volley(player, rng) {
        arena.spawn_player_bullet(bullet);
    }
}

/// Apply a collected pickup. Returns the score it awards.
pub fn collect_pickup(player: &mut Player, kind: PickupKind, arena: &mut Arena) -> u32 {
    arena.emit(FrameEvent::PickupCollected { kind });
    let weapon = match kind {
        PickupKind::Trap => {
            // traps bite through invulnerability but not through a shield
            if player.shield_timer == 0 {
                player.hp -= pickup_k::TRAP_DAMAGE;
                player.invulnerable = pickup_k::TRAP_INVULN;
                arena.emit(FrameEvent::PlayerDamaged { amount: pickup_k::TRAP_DAMAGE });
            }
            return 0;
        }
        PickupKind::Heal => {
            heal_player(player, arena, pickup_k::HEAL);
            return pickup_k::SCORE;
        }
        PickupKind::ShieldCharge => {
            player.shield_charges = (player.shield_charges + 1).min(k::MAX_SHIELD_CHARGES);
            return pickup_k::SCORE;
        }
        PickupKind::Spread => WeaponType::Spread,
        PickupKind::Rapid => WeaponType::Rapid,
        PickupKind::Homing => WeaponType::Homing,
    };

    if player.weapon.kind == weapon {
        player.weapon.level = (player.weapon.level + 1).min(k::MAX_WEAPON_LEVEL);
        player.weapon.timer += k::WEAPON_DURATION;
    } else {
        player.weapon = Weapon { kind: weapon, level: 1, timer: k::WEAPON_DURATION };
    }
    debug!(weapon = weapon.name(), level = player.weapon.level, "weapon pickup");
    pickup_k::SCORE
}
