use std::f32::consts::{FRAC_PI_2, TAU};

use boss_rush::constants::{bullet as bullet_k, colors};
use boss_rush::entities::*;
use boss_rush::geometry::Vec2;
use boss_rush::patterns;
use boss_rush::projectile::*;
use boss_rush::time_scale::TimeScale;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

const W: f32 = 800.0;
const H: f32 = 600.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn bullet(pos: Vec2, vel: Vec2) -> Bullet {
    let spawn = BulletSpawn::new(pos, vel.normalize_or_zero(), vel.length(), colors::BULLET_RED);
    Bullet::from_spawn(&spawn).unwrap()
}

fn collect(f: impl FnOnce(&mut dyn FnMut(BulletSpawn))) -> Vec<BulletSpawn> {
    let mut out = Vec::new();
    f(&mut |s| out.push(s));
    out
}

// ── from_spawn ────────────────────────────────────────────────────────────────

#[test]
fn from_spawn_rejects_non_finite() {
    let spawn = BulletSpawn::new(Vec2::new(f32::NAN, 0.0), Vec2::new(0.0, 1.0), 3.0, colors::BULLET_RED);
    assert!(Bullet::from_spawn(&spawn).is_none());
    let spawn = BulletSpawn::new(Vec2::ZERO, Vec2::new(0.0, 1.0), f32::INFINITY, colors::BULLET_RED);
    assert!(Bullet::from_spawn(&spawn).is_none());
}

#[test]
fn meteors_hit_harder() {
    let spawn = BulletSpawn::new(Vec2::ZERO, Vec2::new(0.0, 1.0), 3.0, colors::BULLET_RED).shape(Shape::Meteor);
    let b = Bullet::from_spawn(&spawn).unwrap();
    assert_relative_eq!(b.damage, bullet_k::METEOR_DAMAGE);
    assert_relative_eq!(b.hit_size(), bullet_k::METEOR_HIT_SIZE);
}

#[test]
fn zero_generation_split_is_dropped() {
    let spawn = BulletSpawn::new(Vec2::ZERO, Vec2::new(0.0, 1.0), 3.0, colors::BULLET_RED).splitting(0, 30);
    assert!(Bullet::from_spawn(&spawn).unwrap().split.is_none());
}

// ── step ──────────────────────────────────────────────────────────────────────

#[test]
fn step_scales_motion() {
    let mut b = bullet(Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0));
    step(&mut b, TimeScale::new(0.5), W, H);
    assert_relative_eq!(b.pos.x, 102.0);
}

#[test]
fn step_does_nothing_when_stopped() {
    let mut b = bullet(Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0));
    b.accelerating = true;
    let before = b.clone();
    step(&mut b, TimeScale::STOPPED, W, H);
    assert_eq!(b, before);
}

#[test]
fn bounce_reflects_and_spends_a_bounce() {
    let mut b = bullet(Vec2::new(798.0, 300.0), Vec2::new(5.0, 0.0));
    b.bounces = 1;
    step(&mut b, TimeScale::NORMAL, W, H);
    assert_relative_eq!(b.pos.x, W);
    assert!(b.vel.x < 0.0);
    assert_eq!(b.bounces, 0);

    let mut b = bullet(Vec2::new(798.0, 300.0), Vec2::new(5.0, 0.0));
    step(&mut b, TimeScale::NORMAL, W, H);
    assert!(b.pos.x > W);
}

#[test]
fn acceleration_is_capped() {
    let mut b = bullet(Vec2::new(400.0, 300.0), Vec2::new(0.0, 20.0));
    b.accelerating = true;
    for _ in 0..20 {
        step(&mut b, TimeScale::NORMAL, W, H);
        b.pos = Vec2::new(400.0, 300.0);
    }
    assert_relative_eq!(b.vel.length(), bullet_k::MAX_ACCEL_SPEED, epsilon = 1e-3);
}

#[test]
fn acceleration_compounds_below_the_cap() {
    let mut b = bullet(Vec2::new(400.0, 300.0), Vec2::new(0.0, 2.0));
    b.accelerating = true;
    for _ in 0..10 {
        step(&mut b, TimeScale::NORMAL, W, H);
        b.pos = Vec2::new(400.0, 300.0);
    }
    assert_relative_eq!(b.vel.length(), 2.0 * bullet_k::ACCEL_FACTOR.powi(10), epsilon = 1e-4);
    assert_relative_eq!(b.vel.x, 0.0, epsilon = 1e-6);
}

#[test]
fn acceleration_scales_with_time() {
    let mut b = bullet(Vec2::new(400.0, 300.0), Vec2::new(2.0, 0.0));
    b.accelerating = true;
    step(&mut b, TimeScale::new(0.5), W, H);
    assert_relative_eq!(b.vel.length(), 2.0 * bullet_k::ACCEL_FACTOR.powf(0.5), epsilon = 1e-5);
}

#[test]
fn knife_keeps_its_heading() {
    let mut b = bullet(Vec2::new(400.0, 300.0), Vec2::new(0.0, 3.0));
    b.shape = Shape::Knife;
    b.angle = 1.0;
    step(&mut b, TimeScale::NORMAL, W, H);
    assert_relative_eq!(b.angle, 1.0);
}

// ── splitting ─────────────────────────────────────────────────────────────────

#[test]
fn split_waits_for_its_timer() {
    let mut b = bullet(Vec2::new(400.0, 300.0), Vec2::new(3.0, 0.0));
    b.split = Some(Split { generations: 2, timer: 2.0 });
    assert!(!split_due(&mut b, TimeScale::NORMAL));
    assert!(!split_due(&mut b, TimeScale::STOPPED));
    assert!(split_due(&mut b, TimeScale::NORMAL));
}

#[test]
fn split_makes_four_faster_children() {
    let mut parent = bullet(Vec2::new(400.0, 300.0), Vec2::new(3.0, 0.0));
    parent.split = Some(Split { generations: 2, timer: 0.0 });
    let children = split_children(&parent, &mut seeded_rng());
    assert_eq!(children.len(), 4);
    for (i, c) in children.iter().enumerate() {
        assert_relative_eq!(c.vel.length(), 3.6, epsilon = 1e-4);
        let expected = Vec2::from_angle(FRAC_PI_2 * i as f32);
        assert_relative_eq!(c.vel.normalize_or_zero().x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(c.vel.normalize_or_zero().y, expected.y, epsilon = 1e-4);
        let split = c.split.expect("one generation left");
        assert_eq!(split.generations, 1);
        assert!((30.0..=60.0).contains(&split.timer));
        assert_eq!(c.pos, parent.pos);
    }
}

#[test]
fn last_generation_children_do_not_split() {
    let mut parent = bullet(Vec2::new(400.0, 300.0), Vec2::new(3.0, 0.0));
    parent.split = Some(Split { generations: 1, timer: 0.0 });
    let children = split_children(&parent, &mut seeded_rng());
    assert_eq!(children.len(), 4);
    assert!(children.iter().all(|c| c.split.is_none()));
}

#[test]
fn update_replaces_due_splitter() {
    let mut b = bullet(Vec2::new(400.0, 300.0), Vec2::new(3.0, 0.0));
    b.split = Some(Split { generations: 1, timer: 1.0 });
    let mut bullets = vec![b];
    update_enemy_bullets(&mut bullets, TimeScale::NORMAL, W, H, &mut seeded_rng());
    assert_eq!(bullets.len(), 4);
}

#[test]
fn update_culls_far_bullets() {
    let mut bullets = vec![
        bullet(Vec2::new(400.0, 300.0), Vec2::new(0.0, 3.0)),
        bullet(Vec2::new(400.0, H + 99.0), Vec2::new(0.0, 3.0)),
    ];
    update_enemy_bullets(&mut bullets, TimeScale::NORMAL, W, H, &mut seeded_rng());
    assert_eq!(bullets.len(), 1);
}

// ── homing ────────────────────────────────────────────────────────────────────

#[test]
fn homing_prefers_nearby_minion_over_boss() {
    let mut rng = seeded_rng();
    let mut arena = Arena::default();
    arena.spawn_minion(Some(MinionKind::Drone), Some(Vec2::new(450.0, 300.0)), None, &mut rng);
    let boss = Some(Vec2::new(400.0, 100.0));
    let target = homing_target(Vec2::new(400.0, 400.0), &arena.minions, boss);
    assert_eq!(target, Some(Vec2::new(450.0, 300.0)));
    assert_eq!(homing_target(Vec2::new(400.0, 400.0), &[], boss), boss);
    assert_eq!(homing_target(Vec2::new(400.0, 599.0), &[], boss), None);
}

#[test]
fn steering_is_bounded() {
    let mut b = Bullet::player_shot(Vec2::new(400.0, 400.0), Vec2::new(0.0, -7.0), 10.0, true);
    steer_toward(&mut b, Vec2::new(800.0, 400.0));
    assert!((b.vel - Vec2::new(0.0, -7.0)).length() <= bullet_k::HOMING_STEER + 1e-4);
}

#[test]
fn player_bullets_leave_quickly() {
    let mut shots = vec![Bullet::player_shot(Vec2::new(400.0, 5.0), Vec2::new(0.0, -7.0), 10.0, false)];
    update_player_bullets(&mut shots, &[], None, TimeScale::NORMAL, W, H);
    assert_eq!(shots.len(), 1);
    update_player_bullets(&mut shots, &[], None, TimeScale::NORMAL, W, H);
    update_player_bullets(&mut shots, &[], None, TimeScale::NORMAL, W, H);
    assert!(shots.is_empty());
}

// ── patterns ──────────────────────────────────────────────────────────────────

#[test]
fn ring_is_evenly_spaced() {
    let shots = collect(|spawn| patterns::ring(Vec2::new(400.0, 300.0), 8, 0.0, 3.0, &mut |s| spawn(s)));
    assert_eq!(shots.len(), 8);
    for (i, s) in shots.iter().enumerate() {
        let heading = s.velocity().to_angle().rem_euclid(TAU);
        assert_relative_eq!(heading, TAU / 8.0 * i as f32, epsilon = 1e-4);
        assert_relative_eq!(s.speed, 3.0);
    }
}

#[test]
fn spread_is_centred_on_target() {
    let origin = Vec2::new(400.0, 100.0);
    let target = Vec2::new(400.0, 500.0);
    let shots = collect(|spawn| patterns::spread(origin, target, 5, 1.0, 3.0, &mut |s| spawn(s)));
    assert_eq!(shots.len(), 5);
    assert_relative_eq!(shots[2].velocity().to_angle(), FRAC_PI_2, epsilon = 1e-4);
    let first = shots[0].velocity().to_angle();
    let last = shots[4].velocity().to_angle();
    assert_relative_eq!(last - first, 1.0, epsilon = 1e-4);
}

#[test]
fn math_div_seeds_split() {
    let shots = collect(|spawn| {
        patterns::math_div(Vec2::new(400.0, 100.0), 6, 2, 3.0, &mut seeded_rng(), &mut |s| spawn(s))
    });
    assert_eq!(shots.len(), 6);
    for s in &shots {
        let split = s.split.expect("splitter");
        assert_eq!(split.generations, 2);
        assert!((30.0..=60.0).contains(&split.timer));
    }
}

#[test]
fn healing_wall_is_seven_tall_each_side() {
    let shots = collect(|spawn| patterns::math_side(W, 300.0, 3.0, true, &mut |s| spawn(s)));
    assert_eq!(shots.len(), 14);
    assert!(shots.iter().all(|s| s.shape == Shape::Heal));
}

#[test]
fn meteor_shape() {
    let shots = collect(|spawn| patterns::meteor(Vec2::ZERO, Vec2::new(100.0, 100.0), 5.0, &mut |s| spawn(s)));
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].shape, Shape::Meteor);
}

#[test]
fn spawner_respects_the_cap() {
    let mut arena = Arena::default();
    for _ in 0..boss_rush::constants::caps::MAX_ENEMY_BULLETS + 10 {
        patterns::aimed(Vec2::ZERO, Vec2::new(1.0, 1.0), 1.0, &mut arena.spawner());
    }
    assert_eq!(arena.enemy_bullets.len(), boss_rush::constants::caps::MAX_ENEMY_BULLETS);
}
