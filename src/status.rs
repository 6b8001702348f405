//! Push-style outputs for a presentation layer.
//!
//! A front end implements [`StatusSink`]; [`publish_status`] calls every
//! setter from the current state. Calling it every tick is safe.

use crate::constants::{player as player_k, playfield};
use crate::entities::{GameStatus, SimulationContext};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeaponStatus {
    pub name: &'static str,
    pub level: u8,
    pub remaining_seconds: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerStatus {
    pub shield_charges: u8,
    pub shield_seconds: u32,
}

pub trait StatusSink {
    fn set_score(&mut self, score: u32);
    /// 0–100
    fn set_player_health(&mut self, percent: f32);
    /// 0–100
    fn set_boss_health(&mut self, percent: f32);
    /// 1-based
    fn set_stage(&mut self, stage: u8);
    fn set_weapon(&mut self, weapon: WeaponStatus);
    fn set_player_status(&mut self, status: PlayerStatus);
    fn set_game_status(&mut self, status: GameStatus);
}

fn ticks_to_seconds(ticks: u32) -> u32 {
    ticks.div_ceil(playfield::TICKS_PER_SECOND)
}

fn percent(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

pub fn weapon_status(state: &SimulationContext) -> WeaponStatus {
    let weapon = &state.player.weapon;
    WeaponStatus {
        name: weapon.kind.name(),
        level: weapon.level,
        remaining_seconds: ticks_to_seconds(weapon.timer),
    }
}

pub fn player_status(state: &SimulationContext) -> PlayerStatus {
    PlayerStatus {
        shield_charges: state.player.shield_charges,
        shield_seconds: ticks_to_seconds(state.player.shield_timer),
    }
}

pub fn publish_status(state: &SimulationContext, sink: &mut impl StatusSink) {
    sink.set_score(state.score);
    sink.set_player_health(percent(state.player.hp, player_k::MAX_HP));
    sink.set_boss_health(percent(state.boss.body.hp, state.boss.body.max_hp));
    sink.set_stage(state.stage + 1);
    sink.set_weapon(weapon_status(state));
    sink.set_player_status(player_status(state));
    sink.set_game_status(state.status);
}
