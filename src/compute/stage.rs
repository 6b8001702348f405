//! Stage progression: the boss's health fraction picks the stage, and each
//! advance opens a transition window that wipes the board.

use rand::Rng;
use tracing::info;

use crate::constants::{boss as k, colors};
use crate::entities::{FrameEvent, SimulationContext};

/// Stage for a hull fraction: strict `<` against 0.8, 0.6, 0.4, 0.2.
pub fn stage_for_health(hp: f32, max_hp: f32) -> u8 {
    if max_hp <= 0.0 || !hp.is_finite() {
        return 0;
    }
    let pct = hp / max_hp;
    k::STAGE_THRESHOLDS.iter().filter(|&&t| pct < t).count() as u8
}

/// Attacks are held for the first stretch of the transition window.
pub fn attacks_locked(transition_timer: u32) -> bool {
    transition_timer > k::STAGE_TRANSITION_FRAMES - k::TRANSITION_LOCK_FRAMES
}

/// Advance the stage if the boss's health has dropped past a threshold.
/// The stage never goes backwards.
pub fn check<R: Rng + ?Sized>(state: &mut SimulationContext, rng: &mut R) {
    if !state.boss.body.active {
        return;
    }
    let target = stage_for_health(state.boss.body.hp, state.boss.body.max_hp).min(k::MAX_STAGE);
    if target <= state.stage {
        return;
    }

    state.stage = target;
    state.stage_transition_timer = k::STAGE_TRANSITION_FRAMES;

    let arena = &mut state.arena;
    arena.enemy_bullets.clear();
    arena.stasis_orbs.clear();
    arena.explosion(state.boss.body.pos, colors::WHITE, 40, rng);
    arena.shockwave(state.boss.body.pos, colors::WHITE);

    state.boss.on_stage_change(target, arena, rng);
    arena.emit(FrameEvent::StageChanged { stage: target });
    info!(boss = state.boss.kind.name(), stage = target + 1, frame = state.frame, "stage advanced");
}
