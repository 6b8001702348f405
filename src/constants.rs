//! Fixed tunables. Only the boss selection and the bullet speed scale are
//! configurable at run time (see `config`); everything here is compiled in.

pub mod playfield {
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
    pub const TICKS_PER_SECOND: u32 = 60;
}

pub mod player {
    pub const SPEED: f32 = 5.0;
    /// Visual radius; also the clamp margin against the playfield edge.
    pub const RADIUS: f32 = 8.0;
    /// Collision radius against enemy bullets.
    pub const HITBOX: f32 = 4.0;
    pub const MAX_HP: f32 = 100.0;
    pub const START_Y_OFFSET: f32 = 100.0;

    pub const FIRE_INTERVAL: u64 = 8;
    pub const BULLET_SPEED: f32 = 7.0;
    pub const BULLET_RADIUS: f32 = 4.0;

    pub const SHIELD_DURATION: u32 = 300;
    pub const MAX_SHIELD_CHARGES: u8 = 3;
    pub const MAX_WEAPON_LEVEL: u8 = 3;
    pub const WEAPON_DURATION: u32 = 600;
    pub const FREEZE_DURATION: u32 = 90;
}

pub mod boss {
    pub const MAX_HP: f32 = 5000.0;
    pub const SCORE_REWARD: u32 = 50_000;
    pub const SCORE_PER_HIT: u32 = 10;
    /// Hull health step (fraction of max) that drops one pickup.
    pub const PICKUP_STEP: f32 = 0.05;

    pub const STAGE_THRESHOLDS: [f32; 4] = [0.8, 0.6, 0.4, 0.2];
    pub const MAX_STAGE: u8 = 4;
    pub const STAGE_TRANSITION_FRAMES: u32 = 180;
    /// Attacks stay locked for this many ticks after a stage change (≈2.3 s).
    pub const TRANSITION_LOCK_FRAMES: u32 = 138;

    pub const BASE_BULLET_SPEED: f32 = 2.5;
    pub const STAGE_SPEED_STEP: f32 = 0.5;

    pub const CONTACT_DAMAGE: f32 = 20.0;
    pub const CONTACT_INVULN: u32 = 90;
    pub const CONTACT_KNOCKBACK: f32 = 50.0;
    pub const SHIELD_HIT_MARGIN: f32 = 15.0;
    pub const FLASH_FRAMES: u32 = 5;

    pub const RADIUS: f32 = 40.0;
    pub const SQUARE_SIZE: f32 = 60.0;
    pub const TRIANGLE_SIZE: f32 = 50.0;
    pub const HEXAGON_SIZE: f32 = 45.0;
    pub const HOURGLASS_SIZE: f32 = 50.0;
    pub const MATH_SIZE: f32 = 50.0;
    pub const STAR_SIZE: f32 = 50.0;
    pub const OVAL_RX: f32 = 60.0;
    pub const OVAL_RY: f32 = 40.0;
}

pub mod bullet {
    pub const ENEMY_RADIUS: f32 = 6.0;
    pub const TRIANGLE_HIT_SIZE: f32 = 12.0;
    pub const METEOR_HIT_SIZE: f32 = 15.0;
    pub const KNIFE_HIT_SIZE: f32 = 8.0;

    pub const DAMAGE: f32 = 10.0;
    pub const METEOR_DAMAGE: f32 = 30.0;
    pub const HEAL_AMOUNT: f32 = 5.0;
    pub const HIT_INVULN: u32 = 60;

    pub const ENEMY_MARGIN: f32 = 100.0;
    pub const PLAYER_MARGIN: f32 = 10.0;

    pub const ACCEL_FACTOR: f32 = 1.03;
    pub const MAX_ACCEL_SPEED: f32 = 24.0;
    pub const SPLIT_SPEED_MULT: f32 = 1.2;
    pub const SPLIT_DELAY_MIN: u32 = 30;
    pub const SPLIT_DELAY_MAX: u32 = 60;
    pub const RECT_SPIN: f32 = 0.2;

    pub const HOMING_STEER: f32 = 0.2;
    pub const HOMING_MAX_SPEED_MULT: f32 = 1.5;
    pub const HOMING_MINION_RANGE: f32 = 300.0;
    pub const HOMING_BOSS_RANGE: f32 = 400.0;
}

pub mod minion {
    pub const SPAWN_INTERVAL: u64 = 180;
    pub const HEART_SKIP_CHANCE: f64 = 0.3;
    pub const DESPAWN_MARGIN: f32 = 50.0;
    pub const HIT_MARGIN: f32 = 5.0;
    pub const ORBIT_RADIUS: f32 = 80.0;
    pub const ORBIT_SPEED: f32 = 0.05;
    pub const LUST_ORB_SPEED: f32 = 0.75;
    pub const LUST_ORB_DAMAGE: f32 = 50.0;
    pub const LUST_ORB_INVULN: u32 = 120;
}

pub mod pickup {
    pub const RADIUS: f32 = 10.0;
    pub const FALL_SPEED: f32 = 1.5;
    pub const SCORE: u32 = 200;
    pub const HEAL: f32 = 20.0;
    pub const TRAP_DAMAGE: f32 = 30.0;
    pub const TRAP_INVULN: u32 = 30;
    pub const TRAP_CHANCE_HEART: f64 = 0.3;
    pub const MINION_DROP_CHANCE: f64 = 0.5;
}

pub mod hazard {
    pub const STASIS_ORB_RADIUS: f32 = 20.0;
    pub const STASIS_ORB_SPEED: f32 = 2.0;
    pub const STASIS_ORB_STEER: f32 = 0.05;
    pub const SAND_TRAP_RADIUS: f32 = 40.0;
    pub const SAND_TRAP_LIFE: u32 = 300;
    pub const SAND_SLOW: f32 = 0.3;
    pub const SAND_TRAP_INTERVAL: u64 = 180;
    pub const REWIND_INTERVAL: u64 = 240;
}

/// Hard ceilings on live entity counts; spawns past these are dropped.
pub mod caps {
    pub const MAX_ENEMY_BULLETS: usize = 1500;
    pub const MAX_PLAYER_BULLETS: usize = 300;
    pub const MAX_MINIONS: usize = 25;
    pub const MAX_PARTICLES: usize = 800;
    pub const MAX_PICKUPS: usize = 40;
}

pub mod colors {
    use crate::entities::Rgba;

    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const PLAYER: Rgba = Rgba::rgb(0, 255, 255);
    pub const PLAYER_BULLET: Rgba = Rgba::rgb(100, 255, 218);
    pub const SHIELD: Rgba = Rgba::rgba(0, 200, 255, 120);

    pub const BOSS_CIRCLE: Rgba = Rgba::rgb(255, 50, 80);
    pub const BOSS_SQUARE: Rgba = Rgba::rgb(255, 165, 0);
    pub const BOSS_TRIANGLE: Rgba = Rgba::rgb(0, 255, 150);
    pub const BOSS_HEART: Rgba = Rgba::rgb(255, 105, 180);
    pub const BOSS_OVAL: Rgba = Rgba::rgb(138, 43, 226);
    pub const BOSS_HEXAGON: Rgba = Rgba::rgb(0, 191, 255);
    pub const BOSS_HOURGLASS: Rgba = Rgba::rgb(218, 165, 32);
    pub const BOSS_MATH: Rgba = Rgba::rgb(50, 205, 50);
    pub const BOSS_STAR: Rgba = Rgba::rgb(255, 215, 0);

    pub const BULLET_RED: Rgba = Rgba::rgb(255, 80, 80);
    pub const BULLET_ORANGE: Rgba = Rgba::rgb(255, 170, 60);
    pub const BULLET_PINK: Rgba = Rgba::rgb(255, 130, 200);
    pub const BULLET_PURPLE: Rgba = Rgba::rgb(180, 100, 255);
    pub const BULLET_BLUE: Rgba = Rgba::rgb(80, 180, 255);
    pub const BULLET_GREEN: Rgba = Rgba::rgb(120, 255, 140);
    pub const BULLET_GOLD: Rgba = Rgba::rgb(255, 220, 90);
    pub const KNIFE: Rgba = Rgba::rgb(192, 192, 192);
    pub const SAND: Rgba = Rgba::rgb(238, 232, 170);
    pub const METEOR: Rgba = Rgba::rgb(255, 255, 255);
    pub const MATH_HEAL: Rgba = Rgba::rgb(0, 255, 0);
    pub const SHADOW: Rgba = Rgba::rgba(90, 60, 120, 200);

    pub const MINION: Rgba = Rgba::rgb(200, 80, 80);
    pub const MINI_BOSS: Rgba = Rgba::rgb(255, 60, 60);
    pub const LUST_ORB: Rgba = Rgba::rgba(255, 0, 128, 160);
    pub const STASIS_ORB: Rgba = Rgba::rgba(120, 200, 255, 180);
    pub const SAND_TRAP: Rgba = Rgba::rgba(194, 178, 128, 120);
    pub const BLOCKER: Rgba = Rgba::rgba(255, 165, 0, 160);
    pub const LASER_TELEGRAPH: Rgba = Rgba::rgba(255, 0, 0, 90);
    pub const LASER: Rgba = Rgba::rgb(255, 40, 40);
    pub const DANGER_ZONE: Rgba = Rgba::rgba(255, 0, 0, 70);
}
