//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `SimulationContext` (and, where needed, an RNG handle) and returns a
//! brand-new `SimulationContext`. Side effects are limited to the injected
//! RNG. Submodules hold the per-concern rules the tick strings together.

pub mod collision;
pub mod hazards;
pub mod minions;
pub mod player;
pub mod spawn;
pub mod stage;

use rand::Rng;
use tracing::{info, trace};

use crate::bosses::{hourglass, BossContext};
use crate::constants::{boss as boss_k, colors, minion as minion_k, playfield};
use crate::entities::{
    Arena, Boss, BossKind, BossSelection, FrameEvent, FrameInput, GameStatus, Player, SimulationContext,
};
use crate::projectile;
use crate::time_scale::TimeScale;

pub use stage::{attacks_locked, stage_for_health};

/// `(2.5 + 0.5 * stage) * bullet_speed_scale`
pub fn base_speed(stage: u8, bullet_speed_scale: f32) -> f32 {
    (boss_k::BASE_BULLET_SPEED + boss_k::STAGE_SPEED_STEP * stage as f32) * bullet_speed_scale
}

pub fn pick_boss<R: Rng + ?Sized>(selection: BossSelection, rng: &mut R) -> BossKind {
    match selection {
        BossSelection::Fixed(kind) => kind,
        BossSelection::Random => BossKind::ALL[rng.gen_range(0..BossKind::ALL.len())],
    }
}

fn sanitize_speed_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the world for a fresh run against the selected boss.
pub fn init_state<R: Rng + ?Sized>(
    selection: BossSelection,
    bullet_speed_scale: f32,
    rng: &mut R,
) -> SimulationContext {
    new_run(selection, bullet_speed_scale, 1, rng)
}

/// Discard the whole world and start over. The boss id moves on so nothing
/// from the old run can point at the new boss.
pub fn reset<R: Rng + ?Sized>(
    state: &SimulationContext,
    selection: BossSelection,
    rng: &mut R,
) -> SimulationContext {
    new_run(selection, state.bullet_speed_scale, state.boss.body.id.wrapping_add(1), rng)
}

fn new_run<R: Rng + ?Sized>(
    selection: BossSelection,
    bullet_speed_scale: f32,
    boss_id: u32,
    rng: &mut R,
) -> SimulationContext {
    let kind = pick_boss(selection, rng);
    info!(boss = kind.name(), bullet_speed_scale, "run started");
    SimulationContext {
        player: Player::new(),
        boss: Boss::new(kind, boss_id, rng),
        arena: Arena::default(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        stage: 0,
        stage_transition_timer: 0,
        time_scale: TimeScale::NORMAL,
        bullet_speed_scale: sanitize_speed_scale(bullet_speed_scale),
        width: playfield::WIDTH,
        height: playfield::HEIGHT,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Spend a shield charge outside the tick. Same rules as the tick's
/// edge trigger.
pub fn activate_shield(state: &SimulationContext) -> SimulationContext {
    let mut next = state.clone();
    if next.status == GameStatus::Playing {
        player::try_activate_shield(&mut next.player, &mut next.arena);
    }
    next
}

// ── Per-frame tick (nearly pure, RNG is injected) ───────────────────────────

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// Outside `Playing` the state is returned unchanged apart from a cleared
/// event list.
pub fn tick<R: Rng + ?Sized>(state: &SimulationContext, input: &FrameInput, rng: &mut R) -> SimulationContext {
    let mut next = state.clone();
    next.arena.events.clear();
    if next.status != GameStatus::Playing {
        return next;
    }
    next.frame += 1;
    next.bullet_speed_scale = sanitize_speed_scale(input.bullet_speed_scale);
    let (w, h) = (next.width, next.height);

    // ── 1. Timers ────────────────────────────────────────────────────────────
    player::step_timers(&mut next.player);
    next.stage_transition_timer = next.stage_transition_timer.saturating_sub(1);
    hazards::update_effects(&mut next.arena);

    // ── 2. Input & movement ──────────────────────────────────────────────────
    if input.activate_shield {
        player::try_activate_shield(&mut next.player, &mut next.arena);
    }
    player::move_player(
        &mut next.player,
        input.movement,
        &next.arena.blockers,
        &next.arena.sand_traps,
        w,
        h,
    );

    // ── 3. Weapon fire ───────────────────────────────────────────────────────
    player::fire_weapon(&next.player, next.frame, &mut next.arena, rng);

    // ── 4. Boss ──────────────────────────────────────────────────────────────
    if next.boss.body.active {
        let mut ctx = BossContext {
            frame: next.frame,
            stage: next.stage,
            base_speed: base_speed(next.stage, next.bullet_speed_scale),
            attacks_locked: attacks_locked(next.stage_transition_timer),
            time_scale: next.time_scale,
            player: &mut next.player,
            arena: &mut next.arena,
            rng: &mut *rng,
        };
        if let Some(scale) = next.boss.update(&mut ctx) {
            next.time_scale = TimeScale::new(scale);
        }
    }

    // ── 5. Ambient spawners ──────────────────────────────────────────────────
    ambient_spawns(&mut next, rng);

    // ── 6. Entities ──────────────────────────────────────────────────────────
    let scale = next.time_scale;
    let boss_pos = next.boss.body.active.then_some(next.boss.body.pos);
    projectile::update_enemy_bullets(&mut next.arena.enemy_bullets, scale, w, h, rng);
    projectile::update_player_bullets(
        &mut next.arena.player_bullets,
        &next.arena.minions,
        boss_pos,
        scale,
        w,
        h,
    );
    minions::update_minions(
        &mut next.arena,
        &next.boss.body,
        next.player.pos,
        next.frame,
        scale,
        next.bullet_speed_scale,
        rng,
    );
    hazards::update_stasis_orbs(&mut next.arena, next.player.pos, scale, h);
    hazards::update_sand_traps(&mut next.arena, scale);
    hazards::update_pickups(&mut next.arena, scale, h);
    hazards::update_particles(&mut next.arena);

    // ── 7. Collision ─────────────────────────────────────────────────────────
    collision::resolve(&mut next, rng);

    // ── 8. Stage ─────────────────────────────────────────────────────────────
    stage::check(&mut next, rng);

    // ── 9. End of run ────────────────────────────────────────────────────────
    finish_run(&mut next, rng);

    trace!(
        frame = next.frame,
        enemy_bullets = next.arena.enemy_bullets.len(),
        minions = next.arena.minions.len(),
        hp = next.player.hp,
        boss_hp = next.boss.body.hp,
        "tick"
    );
    next
}

fn ambient_spawns<R: Rng + ?Sized>(state: &mut SimulationContext, rng: &mut R) {
    let frozen = state.time_scale.is_frozen();
    let kind = state.boss.kind;

    if kind != BossKind::Triangle
        && state.stage_transition_timer == 0
        && !frozen
        && state.frame % minion_k::SPAWN_INTERVAL == 0
    {
        let skip = kind == BossKind::Heart && rng.gen_bool(minion_k::HEART_SKIP_CHANCE);
        if !skip {
            state.arena.spawn_minion(None, None, None, rng);
        }
    }

    if kind != BossKind::Hourglass || !state.boss.body.active {
        return;
    }
    if !frozen && hourglass::sand_trap_due(state.stage, state.frame) {
        hazards::spawn_random_sand_trap(&mut state.arena, state.width, state.height, rng);
    }
    if hourglass::rewind_due(state.stage, state.frame, state.time_scale) {
        hazards::rewind(&mut state.arena, state.boss.body.pos, rng);
    }
}

/// Victory and game over each fire exactly once: the tick stops advancing
/// as soon as the status leaves `Playing`.
fn finish_run<R: Rng + ?Sized>(state: &mut SimulationContext, rng: &mut R) {
    if state.boss.body.active && state.boss.body.hp <= 0.0 {
        state.boss.body.active = false;
        state.status = GameStatus::Victory;
        state.score += boss_k::SCORE_REWARD;
        state.time_scale = TimeScale::NORMAL;
        state.player.frozen = false;
        state.player.freeze_timer = 0;
        state.arena.explosion(state.boss.body.pos, colors::WHITE, 100, rng);
        state.arena.emit(FrameEvent::BossDefeated);
        info!(boss = state.boss.kind.name(), score = state.score, frame = state.frame, "boss defeated");
    } else if state.player.hp <= 0.0 {
        state.status = GameStatus::GameOver;
        state.arena.emit(FrameEvent::PlayerDefeated);
        info!(boss = state.boss.kind.name(), score = state.score, frame = state.frame, "player defeated");
    }
}
