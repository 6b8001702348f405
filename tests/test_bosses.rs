use boss_rush::bosses::hourglass::{HourglassState, TimePhase};
use boss_rush::bosses::math::{self, MathPhase, Operator};
use boss_rush::bosses::square::{self, DashPhase};
use boss_rush::bosses::{hexagon, BossBehavior, BossContext};
use boss_rush::compute::*;
use boss_rush::constants::{boss as boss_k, colors, playfield};
use boss_rush::entities::*;
use boss_rush::geometry::Vec2;
use boss_rush::time_scale::TimeScale;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state(kind: BossKind) -> SimulationContext {
    init_state(BossSelection::Fixed(kind), 1.0, &mut seeded_rng())
}

// ── Square dash cycle ─────────────────────────────────────────────────────────

struct Bench {
    boss: Boss,
    player: Player,
    arena: Arena,
    rng: StdRng,
    frame: u64,
}

impl Bench {
    fn new(kind: BossKind) -> Self {
        let mut rng = seeded_rng();
        let boss = Boss::new(kind, 1, &mut rng);
        let mut player = Player::new();
        player.pos = Vec2::new(400.0, 500.0);
        Bench { boss, player, arena: Arena::default(), rng, frame: 0 }
    }

    /// One boss update with attacks locked, so only motion and phases run.
    fn update(&mut self) -> Option<f32> {
        self.frame += 1;
        let mut ctx = BossContext {
            frame: self.frame,
            stage: 0,
            base_speed: boss_k::BASE_BULLET_SPEED,
            attacks_locked: true,
            time_scale: TimeScale::NORMAL,
            player: &mut self.player,
            arena: &mut self.arena,
            rng: &mut self.rng,
        };
        self.boss.update(&mut ctx)
    }

    fn dash_phase(&self) -> DashPhase {
        match &self.boss.behavior {
            BossBehavior::Square(s) => s.phase,
            other => panic!("not a square: {other:?}"),
        }
    }

    /// Updates until the phase changes; returns how many it took.
    fn ticks_in_phase(&mut self) -> u32 {
        let start = self.dash_phase();
        let mut n = 0;
        while self.dash_phase() == start {
            self.update();
            n += 1;
            assert!(n < 10_000, "stuck in {start:?}");
        }
        n
    }
}

#[test]
fn square_trap_blockers_form_a_box() {
    let walls = square::trap_blockers(Vec2::new(400.0, 400.0));
    assert_eq!(walls.len(), 4);
    assert_relative_eq!(walls[0].center.y, 275.0);
    assert_relative_eq!(walls[1].center.y, 525.0);
    assert_relative_eq!(walls[2].center.x, 275.0);
    assert_relative_eq!(walls[3].center.x, 525.0);
}

#[test]
fn square_dash_cycle_timings() {
    let mut bench = Bench::new(BossKind::Square);
    assert_eq!(bench.dash_phase(), DashPhase::Idle);
    bench.ticks_in_phase();
    assert_eq!(bench.dash_phase(), DashPhase::Charge);
    assert_eq!(bench.arena.blockers.len(), 4);

    assert_eq!(bench.ticks_in_phase(), square::CHARGE_FRAMES);
    assert_eq!(bench.dash_phase(), DashPhase::Dash);
    assert_eq!(bench.arena.blockers.len(), 4);

    assert_eq!(bench.ticks_in_phase(), square::DASH_FRAMES);
    assert_eq!(bench.dash_phase(), DashPhase::Recover);
    assert!(bench.arena.blockers.is_empty());

    assert_eq!(bench.ticks_in_phase(), square::RECOVER_FRAMES);
    assert_eq!(bench.dash_phase(), DashPhase::Idle);
}

#[test]
fn square_dash_heads_for_player() {
    let mut bench = Bench::new(BossKind::Square);
    bench.ticks_in_phase();
    bench.ticks_in_phase();
    let BossBehavior::Square(s) = &bench.boss.behavior else { panic!("not a square") };
    assert_relative_eq!(s.dash_vel.length(), square::DASH_SPEED, epsilon = 1e-3);
    assert!(s.dash_vel.y > 0.0);
}

#[test]
fn square_dash_stays_on_the_playfield() {
    let mut bench = Bench::new(BossKind::Square);
    bench.player.pos = Vec2::new(60.0, 110.0);
    let half = bench.boss.body.radius / 2.0;
    let mut seen = vec![bench.dash_phase()];
    let mut min_x = f32::MAX;
    while seen.len() < 5 {
        bench.update();
        let pos = bench.boss.body.pos;
        min_x = min_x.min(pos.x);
        assert!(pos.y >= half && pos.y <= playfield::HEIGHT - half, "y = {}", pos.y);
        if seen.last() != Some(&bench.dash_phase()) {
            seen.push(bench.dash_phase());
        }
        assert!(bench.frame < 10_000, "no full dash cycle");
    }
    assert_eq!(seen, [DashPhase::Idle, DashPhase::Charge, DashPhase::Dash, DashPhase::Recover, DashPhase::Idle]);
    assert!(min_x >= half, "boss left the playfield: x = {min_x}");
}

#[test]
fn square_uses_inner_hitbox() {
    let boss = Boss::new(BossKind::Square, 1, &mut seeded_rng());
    let centre = boss.body.pos;
    assert!(boss.hit_test(centre + Vec2::new(20.0, 20.0)));
    assert!(!boss.hit_test(centre + Vec2::new(35.0, 0.0)));
    assert_relative_eq!(boss.contact_radius(), boss.body.radius / 1.5);
}

// ── Hourglass time stop ───────────────────────────────────────────────────────

fn hourglass_state(s: &mut SimulationContext) -> &mut HourglassState {
    match &mut s.boss.behavior {
        BossBehavior::Hourglass(h) => h,
        other => panic!("not an hourglass: {other:?}"),
    }
}

/// Stage 2 hourglass whose next tick lands on a quiet frame.
fn hourglass_at_stage_two() -> SimulationContext {
    let mut s = make_state(BossKind::Hourglass);
    s.stage = 2;
    s.frame = 6;
    s.arena.enemy_bullets.clear();
    s
}

fn parked_bullet(pos: Vec2) -> Bullet {
    let spawn = BulletSpawn::new(pos, Vec2::new(0.0, 1.0), 2.0, colors::BULLET_RED);
    Bullet::from_spawn(&spawn).unwrap()
}

#[test]
fn hourglass_cooldown_waits_for_stage_two() {
    let mut s = make_state(BossKind::Hourglass);
    let before = hourglass_state(&mut s).timer;
    let mut next = tick(&s, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(hourglass_state(&mut next).timer, before);
}

#[test]
fn time_stop_turns_every_bullet_into_a_parked_knife() {
    let mut s = hourglass_at_stage_two();
    s.arena.enemy_bullets.push(parked_bullet(Vec2::new(100.0, 300.0)));
    s.arena.enemy_bullets.push(parked_bullet(Vec2::new(700.0, 300.0)));
    hourglass_state(&mut s).timer = 1;

    let mut next = tick(&s, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(next.time_scale, TimeScale::STOPPED);
    assert!(next.player.frozen);
    assert_eq!(hourglass_state(&mut next).phase, TimePhase::Stopped);
    // two parked, a 20-column rain row, a 24-bullet ring
    assert_eq!(next.arena.enemy_bullets.len(), 46);
    for b in &next.arena.enemy_bullets {
        assert_eq!(b.shape, Shape::Knife);
        assert_eq!(b.vel, Vec2::ZERO);
    }
    assert!(next.arena.events.contains(&FrameEvent::TimeStopped));
    assert!(next.arena.events.contains(&FrameEvent::PlayerFrozen));
}

#[test]
fn knives_hold_still_while_stopped() {
    let mut s = hourglass_at_stage_two();
    s.arena.enemy_bullets.push(parked_bullet(Vec2::new(100.0, 300.0)));
    hourglass_state(&mut s).timer = 1;
    let stopped = tick(&s, &FrameInput::default(), &mut seeded_rng());
    let later = tick(&stopped, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(later.arena.enemy_bullets[0].pos, stopped.arena.enemy_bullets[0].pos);
}

#[test]
fn resume_launches_knives_at_double_speed_toward_player() {
    let mut s = hourglass_at_stage_two();
    let starts = [Vec2::new(100.0, 100.0), Vec2::new(700.0, 100.0), Vec2::new(400.0, 50.0)];
    for &pos in &starts {
        let mut b = parked_bullet(pos);
        b.shape = Shape::Knife;
        b.vel = Vec2::ZERO;
        s.arena.enemy_bullets.push(b);
    }
    s.time_scale = TimeScale::STOPPED;
    s.player.frozen = true;
    {
        let h = hourglass_state(&mut s);
        h.phase = TimePhase::Stopped;
        h.timer = 1;
    }

    let mut next = tick(&s, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(next.time_scale, TimeScale::NORMAL);
    assert!(!next.player.frozen);
    assert_eq!(hourglass_state(&mut next).phase, TimePhase::Normal);
    assert!(next.arena.events.contains(&FrameEvent::TimeResumed));

    // stage 2 base speed is 2.5 + 2 * 0.5
    let knife_speed = 3.5 * 2.0;
    let player = s.player.pos;
    assert_eq!(next.arena.enemy_bullets.len(), starts.len());
    for (b, start) in next.arena.enemy_bullets.iter().zip(starts) {
        let expected = (player - start).normalize_or_zero() * knife_speed;
        assert_relative_eq!(b.vel.x, expected.x, epsilon = 1e-3);
        assert_relative_eq!(b.vel.y, expected.y, epsilon = 1e-3);
    }
}

#[test]
fn fate_beams_appear_once_at_stage_four() {
    let mut rng = seeded_rng();
    let mut boss = Boss::new(BossKind::Hourglass, 1, &mut rng);
    let mut arena = Arena::default();
    boss.on_stage_change(4, &mut arena, &mut rng);
    boss.on_stage_change(4, &mut arena, &mut rng);
    let BossBehavior::Hourglass(h) = &boss.behavior else { panic!("not an hourglass") };
    assert_eq!(h.fate_beams.len(), 2);
}

// ── Hexagon ───────────────────────────────────────────────────────────────────

#[test]
fn hexagon_teleport_threshold_by_stage() {
    assert_eq!(hexagon::teleport_threshold(0), None);
    assert_eq!(hexagon::teleport_threshold(1), Some(180));
    assert_eq!(hexagon::teleport_threshold(2), Some(180));
    assert_eq!(hexagon::teleport_threshold(3), Some(90));
    assert_eq!(hexagon::teleport_threshold(4), Some(45));
}

#[test]
fn hexagon_spins_faster_each_stage() {
    let mut rng = seeded_rng();
    let mut boss = Boss::new(BossKind::Hexagon, 1, &mut rng);
    boss.on_stage_change(3, &mut Arena::default(), &mut rng);
    let BossBehavior::Hexagon(h) = &boss.behavior else { panic!("not a hexagon") };
    assert_relative_eq!(h.spin_speed, 0.2, epsilon = 1e-6);
}

// ── Math ──────────────────────────────────────────────────────────────────────

fn math_state() -> math::MathState {
    let mut rng = seeded_rng();
    match Boss::new(BossKind::Math, 1, &mut rng).behavior {
        BossBehavior::Math(m) => m,
        other => panic!("not math: {other:?}"),
    }
}

#[test]
fn math_only_vulnerable_while_spinning() {
    let mut m = math_state();
    assert_eq!(m.phase, MathPhase::Spin);
    assert!(math::is_vulnerable(&m));
    math::apply_operator(&mut m, Operator::Add, 0, &mut seeded_rng());
    assert_eq!(m.phase, MathPhase::Attack);
    assert!(!math::is_vulnerable(&m));
}

#[test]
fn math_boss_shrugs_off_hits_outside_spin() {
    let mut rng = seeded_rng();
    let mut boss = Boss::new(BossKind::Math, 1, &mut rng);
    assert!(boss.is_vulnerable());
    if let BossBehavior::Math(m) = &mut boss.behavior {
        math::apply_operator(m, Operator::Sub, 0, &mut rng);
    }
    assert!(!boss.is_vulnerable());
}

#[test]
fn math_operands_agree_with_result() {
    let mut rng = seeded_rng();
    let mut m = math_state();
    for _ in 0..20 {
        math::apply_operator(&mut m, Operator::Add, 2, &mut rng);
        assert_eq!(m.operands.0 + m.operands.1, m.result);
        math::apply_operator(&mut m, Operator::Div, 2, &mut rng);
        assert_eq!(m.operands.0 / m.operands.1, m.result);
        assert_eq!(m.operands.0 % m.operands.1, 0);
        math::apply_operator(&mut m, Operator::Mul, 2, &mut rng);
        assert_eq!(m.operands.0 * m.operands.1, m.result);
    }
}

#[test]
fn math_power_is_capped() {
    let mut rng = seeded_rng();
    let mut m = math_state();
    for _ in 0..20 {
        math::apply_operator(&mut m, Operator::Pow, 3, &mut rng);
        assert!(m.result <= 150);
    }
}

#[test]
fn math_factorial_result() {
    let mut rng = seeded_rng();
    let mut m = math_state();
    math::apply_operator(&mut m, Operator::Factorial, 3, &mut rng);
    let n = m.operands.0;
    assert!((3..6).contains(&n));
    assert_eq!(m.result, (1..=n).product::<i32>());
}

#[test]
fn math_comparison_opens_a_danger_zone() {
    let mut rng = seeded_rng();
    let mut m = math_state();
    math::apply_operator(&mut m, Operator::Less, 3, &mut rng);
    let zone = m.zone.expect("zone");
    assert!(zone.below);
    assert_eq!(m.result, 0);
    math::apply_operator(&mut m, Operator::Add, 3, &mut rng);
    assert!(m.zone.is_none());
}

#[test]
fn math_operator_pool_grows_with_stage() {
    let mut rng = seeded_rng();
    assert_eq!(math::operator_pool(0, &mut rng), vec![Operator::Add, Operator::Sub]);
    let pool = math::operator_pool(2, &mut rng);
    assert!(pool.contains(&Operator::Div));
    assert!(pool.contains(&Operator::Tan));
    assert!(!pool.contains(&Operator::Pow));
}

#[test]
fn math_spin_cooldown_shrinks_to_floor() {
    assert_eq!(math::spin_cooldown(0), 60);
    assert_eq!(math::spin_cooldown(4), 40);
    assert_eq!(math::spin_cooldown(20), 20);
}

#[test]
fn math_clones_join_at_stage_four() {
    let mut rng = seeded_rng();
    let mut boss = Boss::new(BossKind::Math, 1, &mut rng);
    boss.on_stage_change(4, &mut Arena::default(), &mut rng);
    let BossBehavior::Math(m) = &boss.behavior else { panic!("not math") };
    assert_eq!(m.clones.len(), 3);
}

// ── Star / Heart shields ──────────────────────────────────────────────────────

#[test]
fn star_shield_stacks_on_leftover() {
    let mut rng = seeded_rng();
    let mut boss = Boss::new(BossKind::Star, 1, &mut rng);
    let mut arena = Arena::default();
    assert_relative_eq!(boss.body.shield, 0.0);
    boss.on_stage_change(1, &mut arena, &mut rng);
    assert_relative_eq!(boss.body.shield, 200.0);
    boss.body.shield = 50.0;
    boss.on_stage_change(2, &mut arena, &mut rng);
    assert_relative_eq!(boss.body.shield, 350.0);
    assert_relative_eq!(boss.body.max_shield, 350.0);
}

#[test]
fn heart_summons_lust_orbs_at_stage_three() {
    let mut rng = seeded_rng();
    let mut boss = Boss::new(BossKind::Heart, 1, &mut rng);
    let mut arena = Arena::default();
    boss.on_stage_change(3, &mut arena, &mut rng);
    assert_eq!(arena.minions.len(), 2);
    assert!(arena.minions.iter().all(|m| m.kind == MinionKind::LustOrb));
}

#[test]
fn heart_shields_and_grows_at_stage_four() {
    let mut rng = seeded_rng();
    let mut boss = Boss::new(BossKind::Heart, 1, &mut rng);
    boss.on_stage_change(4, &mut Arena::default(), &mut rng);
    assert_relative_eq!(boss.body.shield, 2000.0);
    assert_relative_eq!(boss.body.radius, boss_k::RADIUS * 1.5);
}

// ── Oval ──────────────────────────────────────────────────────────────────────

#[test]
fn oval_hit_test_is_elliptical() {
    let boss = Boss::new(BossKind::Oval, 1, &mut seeded_rng());
    let centre = boss.body.pos;
    assert!(boss.hit_test(centre + Vec2::new(55.0, 0.0)));
    assert!(!boss.hit_test(centre + Vec2::new(0.0, 45.0)));
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[test]
fn every_boss_draws_something() {
    let mut rng = seeded_rng();
    for kind in BossKind::ALL {
        let boss = Boss::new(kind, 1, &mut rng);
        assert!(!boss.draw(0, 0).is_empty(), "{kind:?} drew nothing");
    }
}

#[test]
fn intro_only_for_animated_entrances() {
    assert!(boss_rush::bosses::intro_commands(BossKind::Circle, 0.5).is_some());
    assert!(boss_rush::bosses::intro_commands(BossKind::Triangle, 0.5).is_none());
    assert!(boss_rush::bosses::intro_commands(BossKind::Hourglass, 0.5).is_none());
}
