//! All simulation entity types: pure data, no logic.
//!
//! Behaviour lives in `compute`, `projectile` and `bosses`; those modules add
//! `impl` blocks for the types declared here.

use crate::bosses::BossBehavior;
use crate::constants::{boss as boss_k, player as player_k, playfield};
use crate::geometry::Vec2;
use crate::time_scale::TimeScale;

// ── Colour & shape tags ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Rgba { a, ..self }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::rgb(255, 255, 255)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shape {
    #[default]
    Circle,
    Rect,
    Triangle,
    Knife,
    Meteor,
    Heal,
    Star,
    Binary,
}

impl Shape {
    /// Unknown tags fall back to `Circle`.
    pub fn from_tag(tag: &str) -> Shape {
        match tag.trim().to_ascii_uppercase().as_str() {
            "RECT" => Shape::Rect,
            "TRIANGLE" => Shape::Triangle,
            "KNIFE" => Shape::Knife,
            "METEOR" => Shape::Meteor,
            "HEAL" => Shape::Heal,
            "STAR" => Shape::Star,
            "BINARY" => Shape::Binary,
            _ => Shape::Circle,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Pending fractal split: when `timer` runs out the bullet is replaced by
/// four children carrying `generations - 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split {
    pub generations: u8,
    pub timer: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub owner: BulletOwner,
    pub shape: Shape,
    pub color: Rgba,
    /// Render heading; spun for `Rect`, aimed for `Knife`.
    pub angle: f32,
    pub bounces: u8,
    pub split: Option<Split>,
    pub accelerating: bool,
    pub homing: bool,
    pub damage: f32,
}

/// A spawn request produced by the pattern library. Velocity is
/// `dir * speed`; `dir` is not renormalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSpawn {
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub color: Rgba,
    pub shape: Shape,
    pub bounces: u8,
    pub split: Option<Split>,
    pub accelerating: bool,
}

impl BulletSpawn {
    pub fn new(pos: Vec2, dir: Vec2, speed: f32, color: Rgba) -> Self {
        BulletSpawn {
            pos,
            dir,
            speed,
            color,
            shape: Shape::Circle,
            bounces: 0,
            split: None,
            accelerating: false,
        }
    }

    /// Spawn along `angle` (radians).
    pub fn angled(pos: Vec2, angle: f32, speed: f32, color: Rgba) -> Self {
        BulletSpawn::new(pos, Vec2::from_angle(angle), speed, color)
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn bounces(mut self, bounces: u8) -> Self {
        self.bounces = bounces;
        self
    }

    pub fn splitting(mut self, generations: u8, delay: u32) -> Self {
        self.split = Some(Split { generations, timer: delay as f32 });
        self
    }

    pub fn accelerating(mut self) -> Self {
        self.accelerating = true;
        self
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeaponType {
    #[default]
    Default,
    Spread,
    Rapid,
    Homing,
}

impl WeaponType {
    pub fn name(&self) -> &'static str {
        match self {
            WeaponType::Default => "DEFAULT",
            WeaponType::Spread => "SPREAD",
            WeaponType::Rapid => "RAPID",
            WeaponType::Homing => "HOMING",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub kind: WeaponType,
    pub level: u8,
    /// Ticks left before the weapon reverts to `Default` level 1.
    pub timer: u32,
}

impl Default for Weapon {
    fn default() -> Self {
        Weapon { kind: WeaponType::Default, level: 1, timer: 0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub hitbox: f32,
    /// May drop below zero internally; displays are clamped.
    pub hp: f32,
    pub weapon: Weapon,
    pub invulnerable: u32,
    pub shield_charges: u8,
    pub shield_timer: u32,
    pub frozen: bool,
    pub freeze_timer: u32,
}

impl Player {
    pub fn new() -> Self {
        Player {
            pos: Vec2::new(playfield::WIDTH / 2.0, playfield::HEIGHT - player_k::START_Y_OFFSET),
            radius: player_k::RADIUS,
            hitbox: player_k::HITBOX,
            hp: player_k::MAX_HP,
            weapon: Weapon::default(),
            invulnerable: 0,
            shield_charges: player_k::MAX_SHIELD_CHARGES,
            shield_timer: 0,
            frozen: false,
            freeze_timer: 0,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BossKind {
    Circle,
    Square,
    Triangle,
    Heart,
    Oval,
    Hexagon,
    Hourglass,
    Math,
    Star,
}

impl BossKind {
    pub const ALL: [BossKind; 9] = [
        BossKind::Circle,
        BossKind::Square,
        BossKind::Triangle,
        BossKind::Heart,
        BossKind::Oval,
        BossKind::Hexagon,
        BossKind::Hourglass,
        BossKind::Math,
        BossKind::Star,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BossKind::Circle => "circle",
            BossKind::Square => "square",
            BossKind::Triangle => "triangle",
            BossKind::Heart => "heart",
            BossKind::Oval => "oval",
            BossKind::Hexagon => "hexagon",
            BossKind::Hourglass => "hourglass",
            BossKind::Math => "math",
            BossKind::Star => "star",
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            BossKind::Circle | BossKind::Heart | BossKind::Oval => boss_k::RADIUS,
            BossKind::Square => boss_k::SQUARE_SIZE,
            BossKind::Triangle => boss_k::TRIANGLE_SIZE,
            BossKind::Hexagon => boss_k::HEXAGON_SIZE,
            BossKind::Hourglass => boss_k::HOURGLASS_SIZE,
            BossKind::Math => boss_k::MATH_SIZE,
            BossKind::Star => boss_k::STAR_SIZE,
        }
    }
}

/// Which boss a run starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BossSelection {
    Fixed(BossKind),
    #[default]
    Random,
}

/// Physical state every variant shares.
#[derive(Clone, Debug, PartialEq)]
pub struct BossBody {
    /// Bumped on every reset; minions hold it as a weak parent reference.
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub radius: f32,
    pub angle: f32,
    /// 0–255; below 100 the boss cannot be hit, below 200 it cannot ram.
    pub opacity: f32,
    pub flash_timer: u32,
    pub shield: f32,
    pub max_shield: f32,
    /// Next hull value at or below which a pickup drops.
    pub next_pickup_hp: f32,
    pub active: bool,
}

impl BossBody {
    pub fn new(id: u32, kind: BossKind, pos: Vec2, vel: Vec2) -> Self {
        BossBody {
            id,
            pos,
            vel,
            hp: boss_k::MAX_HP,
            max_hp: boss_k::MAX_HP,
            radius: kind.radius(),
            angle: 0.0,
            opacity: 255.0,
            flash_timer: 0,
            shield: 0.0,
            max_shield: 0.0,
            next_pickup_hp: boss_k::MAX_HP * (1.0 - boss_k::PICKUP_STEP),
            active: true,
        }
    }
}

/// The single active boss: shared body plus the variant's private state.
#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub kind: BossKind,
    pub body: BossBody,
    pub behavior: BossBehavior,
}

// ── Minions ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinionKind {
    Drone,
    Swooper,
    Orbiter,
    MiniBoss,
    LustOrb,
}

impl MinionKind {
    /// `(hp, radius, score)`
    pub fn stats(&self) -> (f32, f32, u32) {
        match self {
            MinionKind::Drone => (30.0, 15.0, 100),
            MinionKind::Swooper => (20.0, 15.0, 100),
            MinionKind::Orbiter => (60.0, 10.0, 100),
            MinionKind::MiniBoss => (500.0, 30.0, 1000),
            MinionKind::LustOrb => (1200.0, 100.0, 2000),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Minion {
    pub kind: MinionKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: f32,
    pub radius: f32,
    pub score: u32,
    pub shoot_timer: u32,
    pub orbit_angle: f32,
    /// Weak reference to the boss this minion circles (by `Boss::id`).
    pub orbit_parent: Option<u32>,
    /// Per-minion sway offset.
    pub phase: f32,
}

// ── Pickups & area effects ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    Spread,
    Rapid,
    Homing,
    Heal,
    ShieldCharge,
    Trap,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// Axis-aligned rectangle that stops the player (not projectiles).
#[derive(Clone, Debug, PartialEq)]
pub struct Blocker {
    pub center: Vec2,
    pub half_w: f32,
    pub half_h: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StasisOrb {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SandTrap {
    pub pos: Vec2,
    pub radius: f32,
    pub life: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 → 0.0
    pub life: f32,
    pub size: f32,
    pub color: Rgba,
    pub shockwave: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScreenEffects {
    pub glitch_frames: u32,
    pub shake: f32,
}

// ── Events & status ───────────────────────────────────────────────────────────

/// Discrete things that happened during the last tick.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    ShieldActivated,
    PlayerDamaged { amount: f32 },
    PlayerHealed { amount: f32 },
    PlayerFrozen,
    BossDamaged { amount: f32 },
    ShieldAbsorbed { amount: f32 },
    MinionKilled { kind: MinionKind, score: u32 },
    PickupSpawned { kind: PickupKind },
    PickupCollected { kind: PickupKind },
    StageChanged { stage: u8 },
    TimeStopped,
    TimeResumed,
    BossDefeated,
    PlayerDefeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Victory,
    GameOver,
}

/// One tick's worth of player intent.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInput {
    /// Clamped to unit length before use.
    pub movement: Vec2,
    /// Edge trigger.
    pub activate_shield: bool,
    pub bullet_speed_scale: f32,
}

impl Default for FrameInput {
    fn default() -> Self {
        FrameInput { movement: Vec2::ZERO, activate_shield: false, bullet_speed_scale: 1.0 }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Every collection a boss is allowed to touch during its update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arena {
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub minions: Vec<Minion>,
    pub pickups: Vec<Pickup>,
    pub particles: Vec<Particle>,
    pub blockers: Vec<Blocker>,
    pub stasis_orbs: Vec<StasisOrb>,
    pub sand_traps: Vec<SandTrap>,
    pub effects: ScreenEffects,
    pub events: Vec<FrameEvent>,
}

/// The whole world. Created by `compute::init_state`, replaced wholesale on
/// reset, read by `render` and `status` between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationContext {
    pub player: Player,
    pub boss: Boss,
    pub arena: Arena,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub stage: u8,
    pub stage_transition_timer: u32,
    pub time_scale: TimeScale,
    pub bullet_speed_scale: f32,
    pub width: f32,
    pub height: f32,
}
