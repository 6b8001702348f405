//! Collision and damage resolution, run once per tick after everything moved.

use rand::Rng;
use tracing::debug;

use crate::constants::{
    boss as boss_k, bullet as bullet_k, colors, minion as minion_k, pickup as pickup_k, player as player_k,
};
use crate::entities::{Bullet, FrameEvent, MinionKind, Shape, SimulationContext};

use super::player::{blocked, collect_pickup, damage_player, heal_player};

pub fn resolve<R: Rng + ?Sized>(state: &mut SimulationContext, rng: &mut R) {
    player_bullets(state, rng);
    enemy_bullets(state);
    body_contact(state);
    stasis_orbs(state, rng);
    pickups(state);
}

// ── Player bullets ───────────────────────────────────────────────────────────

fn player_bullets<R: Rng + ?Sized>(state: &mut SimulationContext, rng: &mut R) {
    let mut bullets = std::mem::take(&mut state.arena.player_bullets);
    bullets.retain(|b| !hit_minion(state, b, rng) && !hit_boss(state, b, rng));
    state.arena.player_bullets = bullets;
}

fn hit_minion<R: Rng + ?Sized>(state: &mut SimulationContext, bullet: &Bullet, rng: &mut R) -> bool {
    let arena = &mut state.arena;
    let Some(idx) = arena
        .minions
        .iter()
        .position(|m| bullet.pos.distance(m.pos) < m.radius + minion_k::HIT_MARGIN)
    else {
        return false;
    };

    arena.minions[idx].hp -= bullet.damage;
    if arena.minions[idx].hp <= 0.0 {
        let dead = arena.minions.remove(idx);
        state.score += dead.score;
        let color = if dead.kind == MinionKind::MiniBoss { colors::MINI_BOSS } else { colors::MINION };
        arena.explosion(dead.pos, color, 10, rng);
        if rng.gen_bool(pickup_k::MINION_DROP_CHANCE) {
            arena.spawn_pickup(dead.pos, state.boss.kind, rng);
        }
        arena.emit(FrameEvent::MinionKilled { kind: dead.kind, score: dead.score });
    }
    true
}

fn hit_boss<R: Rng + ?Sized>(state: &mut SimulationContext, bullet: &Bullet, rng: &mut R) -> bool {
    let boss = &mut state.boss;
    if !boss.body.active {
        return false;
    }

    let mut damage = bullet.damage;
    let shielded = boss.body.shield > 0.0
        && bullet.pos.distance(boss.body.pos) < boss.body.radius + boss_k::SHIELD_HIT_MARGIN;

    if shielded {
        let absorbed = damage.min(boss.body.shield);
        boss.body.shield -= absorbed;
        damage -= absorbed;
        state.arena.emit(FrameEvent::ShieldAbsorbed { amount: absorbed });
        if boss.body.shield <= 0.0 {
            boss.body.shield = 0.0;
            state.arena.explosion(boss.body.pos, colors::SHIELD, 20, rng);
            debug!(boss = boss.kind.name(), "boss shield broken");
        }
        if damage <= 0.0 || !boss.is_vulnerable() || !boss.hit_test(bullet.pos) {
            return true;
        }
    } else if !boss.is_vulnerable() || !boss.hit_test(bullet.pos) {
        return false;
    }

    let body = &mut boss.body;
    body.hp -= damage;
    body.flash_timer = boss_k::FLASH_FRAMES;
    state.score += boss_k::SCORE_PER_HIT;
    state.arena.emit(FrameEvent::BossDamaged { amount: damage });

    let step = body.max_hp * boss_k::PICKUP_STEP;
    while body.hp <= body.next_pickup_hp && body.next_pickup_hp > 0.0 {
        state.arena.spawn_pickup(body.pos, boss.kind, rng);
        body.next_pickup_hp -= step;
    }
    true
}

// ── Enemy bullets ────────────────────────────────────────────────────────────

fn enemy_bullets(state: &mut SimulationContext) {
    let player = &mut state.player;
    let arena = &mut state.arena;
    let mut bullets = std::mem::take(&mut arena.enemy_bullets);

    bullets.retain(|b| {
        if b.pos.distance(player.pos) >= b.hit_size() + player.hitbox {
            return true;
        }
        if b.shape == Shape::Heal {
            heal_player(player, arena, bullet_k::HEAL_AMOUNT);
            return false;
        }
        if player.shield_timer > 0 {
            return false;
        }
        if player.invulnerable > 0 {
            return true;
        }
        damage_player(player, arena, b.damage, bullet_k::HIT_INVULN);
        // meteors plough on through
        b.shape == Shape::Meteor
    });
    arena.enemy_bullets = bullets;
}

// ── Bodies ───────────────────────────────────────────────────────────────────

fn body_contact(state: &mut SimulationContext) {
    let boss = &state.boss;
    let player = &mut state.player;
    let arena = &mut state.arena;

    if boss.body.active
        && boss.body.opacity > 200.0
        && player.pos.distance(boss.body.pos) < boss.contact_radius() + player.hitbox
        && damage_player(player, arena, boss_k::CONTACT_DAMAGE, boss_k::CONTACT_INVULN)
    {
        let mut knocked = player.pos;
        knocked.y = (knocked.y + boss_k::CONTACT_KNOCKBACK).min(state.height - player.radius);
        // never shove the player into a trap wall
        if !blocked(knocked, player.radius, &arena.blockers) {
            player.pos = knocked;
        }
    }

    let touching_orb = arena
        .minions
        .iter()
        .any(|m| m.kind == MinionKind::LustOrb && player.pos.distance(m.pos) < m.radius + player.hitbox);
    if touching_orb {
        damage_player(player, arena, minion_k::LUST_ORB_DAMAGE, minion_k::LUST_ORB_INVULN);
    }
}

fn stasis_orbs<R: Rng + ?Sized>(state: &mut SimulationContext, rng: &mut R) {
    let player = &mut state.player;
    let arena = &mut state.arena;
    if player.invulnerable > 0 || player.shield_timer > 0 {
        return;
    }
    let Some(idx) = arena
        .stasis_orbs
        .iter()
        .position(|o| player.pos.distance(o.pos) < o.radius + player.hitbox)
    else {
        return;
    };
    let orb = arena.stasis_orbs.remove(idx);
    player.frozen = true;
    player.freeze_timer = player_k::FREEZE_DURATION;
    arena.explosion(orb.pos, colors::STASIS_ORB, 10, rng);
    arena.emit(FrameEvent::PlayerFrozen);
    debug!(freeze = player.freeze_timer, "player frozen by stasis orb");
}

fn pickups(state: &mut SimulationContext) {
    let player = &mut state.player;
    let arena = &mut state.arena;
    let reach = player.radius + pickup_k::RADIUS;

    let (taken, left): (Vec<_>, Vec<_>) =
        std::mem::take(&mut arena.pickups).into_iter().partition(|p| p.pos.distance(player.pos) < reach);
    arena.pickups = left;
    for p in taken {
        state.score += collect_pickup(player, p.kind, arena);
    }
}
