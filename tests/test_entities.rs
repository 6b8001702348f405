use boss_rush::compute::init_state;
use boss_rush::entities::*;
use boss_rush::geometry::*;
use boss_rush::time_scale::TimeScale;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(Shape::Knife, Shape::Knife);
    assert_ne!(Shape::Knife, Shape::Meteor);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Enemy);
    assert_eq!(GameStatus::default(), GameStatus::Menu);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(BossSelection::Fixed(BossKind::Circle), 1.0, &mut StdRng::seed_from_u64(42));
    let mut cloned = original.clone();

    cloned.player.pos.x = 99.0;
    cloned.score = 999;
    cloned.boss.body.hp = 1.0;
    cloned.arena.minions.push(Minion {
        kind: MinionKind::Drone,
        pos: Vec2::ZERO,
        vel: Vec2::ZERO,
        hp: 20.0,
        radius: 15.0,
        score: 100,
        shoot_timer: 60,
        orbit_angle: 0.0,
        orbit_parent: None,
        phase: 0.0,
    });

    assert_relative_eq!(original.player.pos.x, 400.0);
    assert_eq!(original.score, 0);
    assert_relative_eq!(original.boss.body.hp, 5000.0);
    assert!(original.arena.minions.is_empty());
}

// ── Shape tags ────────────────────────────────────────────────────────────────

#[test]
fn shape_tags_are_case_insensitive() {
    assert_eq!(Shape::from_tag("knife"), Shape::Knife);
    assert_eq!(Shape::from_tag(" HEAL "), Shape::Heal);
    assert_eq!(Shape::from_tag("Binary"), Shape::Binary);
}

#[test]
fn unknown_shape_tag_is_a_circle() {
    assert_eq!(Shape::from_tag("blob"), Shape::Circle);
    assert_eq!(Shape::from_tag(""), Shape::Circle);
}

// ── Time scale ────────────────────────────────────────────────────────────────

#[test]
fn time_scale_is_clamped() {
    assert_relative_eq!(TimeScale::new(2.0).get(), 1.0);
    assert_relative_eq!(TimeScale::new(-1.0).get(), 0.0);
    assert_relative_eq!(TimeScale::new(0.5).get(), 0.5);
    assert_eq!(TimeScale::new(f32::NAN), TimeScale::NORMAL);
}

#[test]
fn only_zero_is_frozen() {
    assert!(TimeScale::STOPPED.is_frozen());
    assert!(!TimeScale::new(0.01).is_frozen());
    assert_eq!(TimeScale::default(), TimeScale::NORMAL);
}

// ── Player & boss defaults ────────────────────────────────────────────────────

#[test]
fn player_defaults() {
    let p = Player::new();
    assert_relative_eq!(p.hp, 100.0);
    assert_eq!(p.shield_charges, 3);
    assert_eq!(p.weapon.kind, WeaponType::Default);
    assert_eq!(p.weapon.level, 1);
    assert!(!p.frozen);
}

#[test]
fn weapon_names() {
    assert_eq!(WeaponType::Default.name(), "DEFAULT");
    assert_eq!(WeaponType::Homing.name(), "HOMING");
}

#[test]
fn boss_body_starts_full() {
    let body = BossBody::new(7, BossKind::Hexagon, Vec2::new(400.0, 100.0), Vec2::ZERO);
    assert_eq!(body.id, 7);
    assert_relative_eq!(body.hp, body.max_hp);
    assert_relative_eq!(body.radius, BossKind::Hexagon.radius());
    assert!(body.active);
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[test]
fn normalizing_zero_is_zero() {
    assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
}

#[test]
fn bearing_points_at_target() {
    let a = Vec2::new(0.0, 0.0);
    assert_relative_eq!(bearing(a, Vec2::new(0.0, 10.0)), std::f32::consts::FRAC_PI_2);
    let dir = Vec2::from_angle(bearing(a, Vec2::new(3.0, 4.0)));
    assert_relative_eq!(dir.x, 0.6, epsilon = 1e-5);
    assert_relative_eq!(dir.y, 0.8, epsilon = 1e-5);
}

#[test]
fn remap_degenerate_range_uses_midpoint() {
    assert_relative_eq!(remap(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
    assert_relative_eq!(remap(3.0, 1.0, 1.0, -1.0, 1.0), 0.0);
}

#[test]
fn segment_circle_test() {
    let (a, b) = (Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
    assert!(line_circle_intersect(a, b, Vec2::new(50.0, 5.0), 6.0));
    assert!(!line_circle_intersect(a, b, Vec2::new(50.0, 10.0), 6.0));
    assert!(!line_circle_intersect(a, b, Vec2::new(110.0, 0.0), 6.0));
}

#[test]
fn polygon_and_star_vertex_counts() {
    assert_eq!(polygon_points(6, 10.0, 0.0).len(), 6);
    assert_eq!(star_points(5, 10.0, 4.0, 0.0).len(), 10);
    for p in polygon_points(6, 10.0, 0.3) {
        assert_relative_eq!(p.length(), 10.0, epsilon = 1e-4);
    }
}
