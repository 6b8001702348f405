//! Boss behaviour framework.
//!
//! The nine variants form a closed set. Each variant module owns a state
//! struct and free functions for its lifecycle; `BossBehavior` holds the
//! state and `Boss` dispatches on it:
//!
//! * `init` (via [`Boss::new`]): variant defaults
//! * [`Boss::on_stage_change`]: one-shot effects when the stage advances
//! * [`Boss::update`]: motion and attacks for one tick, optionally returning
//!   a new global time scale
//! * [`Boss::draw`]: read-only drawing intents
//! * [`intro_commands`]: optional entrance animation

pub mod circle;
pub mod heart;
pub mod hexagon;
pub mod hourglass;
pub mod math;
pub mod oval;
pub mod square;
pub mod star;
pub mod triangle;

use rand::Rng;

use crate::compute::player::damage_player;
use crate::constants::{boss as boss_k, colors, playfield};
use crate::entities::{Arena, Boss, BossBody, BossKind, Player, Rgba};
use crate::geometry::{point_in_ellipse, point_in_rect, Vec2};
use crate::render::DrawCommand;
use crate::time_scale::TimeScale;

#[derive(Clone, Debug, PartialEq)]
pub enum BossBehavior {
    Circle(circle::CircleState),
    Square(square::SquareState),
    Triangle(triangle::TriangleState),
    Heart(heart::HeartState),
    Oval(oval::OvalState),
    Hexagon(hexagon::HexagonState),
    Hourglass(hourglass::HourglassState),
    Math(math::MathState),
    Star(star::StarState),
}

/// Everything a variant may read or mutate during one update.
pub struct BossContext<'a, R: Rng + ?Sized> {
    pub frame: u64,
    pub stage: u8,
    /// `(2.5 + 0.5 * stage) * bullet_speed_scale`
    pub base_speed: f32,
    pub attacks_locked: bool,
    pub time_scale: TimeScale,
    pub player: &'a mut Player,
    pub arena: &'a mut Arena,
    pub rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> BossContext<'a, R> {
    pub fn can_attack(&self) -> bool {
        !self.attacks_locked
    }

    /// True on frames that are multiples of `n`.
    pub fn every(&self, n: u64) -> bool {
        n > 0 && self.frame % n == 0
    }

    /// Damage from a boss-owned hazard (laser, beam, pendulum, zone).
    pub fn hurt_player(&mut self, amount: f32, invuln: u32) -> bool {
        damage_player(self.player, self.arena, amount, invuln)
    }
}

pub(crate) fn flash_color(body: &BossBody, base: Rgba) -> Rgba {
    let c = if body.flash_timer > 0 { colors::WHITE } else { base };
    c.with_alpha(body.opacity.clamp(0.0, 255.0) as u8)
}

impl Boss {
    /// Variant `init`: a fresh boss near the top centre.
    pub fn new<R: Rng + ?Sized>(kind: BossKind, id: u32, rng: &mut R) -> Boss {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let vel = Vec2::new(4.0 * sign, rng.gen_range(2.8..4.0));
        let mut body = BossBody::new(id, kind, Vec2::new(playfield::WIDTH / 2.0, 100.0), vel);
        let behavior = match kind {
            BossKind::Circle => BossBehavior::Circle(circle::init(&mut body)),
            BossKind::Square => BossBehavior::Square(square::init(&mut body)),
            BossKind::Triangle => BossBehavior::Triangle(triangle::init(&mut body)),
            BossKind::Heart => BossBehavior::Heart(heart::init(&mut body)),
            BossKind::Oval => BossBehavior::Oval(oval::init(&mut body)),
            BossKind::Hexagon => BossBehavior::Hexagon(hexagon::init(&mut body)),
            BossKind::Hourglass => BossBehavior::Hourglass(hourglass::init(&mut body)),
            BossKind::Math => BossBehavior::Math(math::init(&mut body)),
            BossKind::Star => BossBehavior::Star(star::init(&mut body)),
        };
        Boss { kind, body, behavior }
    }

    pub fn on_stage_change<R: Rng + ?Sized>(&mut self, stage: u8, arena: &mut Arena, rng: &mut R) {
        let body = &mut self.body;
        match &mut self.behavior {
            BossBehavior::Circle(_) | BossBehavior::Square(_) | BossBehavior::Triangle(_) => {}
            BossBehavior::Heart(s) => heart::on_stage_change(s, body, stage, arena, rng),
            BossBehavior::Oval(s) => oval::on_stage_change(s, body, stage),
            BossBehavior::Hexagon(s) => hexagon::on_stage_change(s, stage),
            BossBehavior::Hourglass(s) => hourglass::on_stage_change(s, stage),
            BossBehavior::Math(s) => math::on_stage_change(s, body, stage),
            BossBehavior::Star(_) => star::on_stage_change(body, stage),
        }
    }

    /// Advance one tick. `Some(scale)` asks the simulation to change the
    /// global time scale.
    pub fn update<R: Rng + ?Sized>(&mut self, ctx: &mut BossContext<'_, R>) -> Option<f32> {
        let body = &mut self.body;
        if body.flash_timer > 0 {
            body.flash_timer -= 1;
        }
        match &mut self.behavior {
            BossBehavior::Circle(s) => circle::update(s, body, ctx),
            BossBehavior::Square(s) => square::update(s, body, ctx),
            BossBehavior::Triangle(s) => triangle::update(s, body, ctx),
            BossBehavior::Heart(s) => heart::update(s, body, ctx),
            BossBehavior::Oval(s) => oval::update(s, body, ctx),
            BossBehavior::Hexagon(s) => hexagon::update(s, body, ctx),
            BossBehavior::Hourglass(s) => return hourglass::update(s, body, ctx),
            BossBehavior::Math(s) => math::update(s, body, ctx),
            BossBehavior::Star(s) => star::update(s, body, ctx),
        }
        None
    }

    pub fn draw(&self, frame: u64, stage: u8) -> Vec<DrawCommand> {
        let body = &self.body;
        let mut out = match &self.behavior {
            BossBehavior::Circle(s) => circle::draw(s, body, frame),
            BossBehavior::Square(s) => square::draw(s, body, frame),
            BossBehavior::Triangle(s) => triangle::draw(s, body, frame),
            BossBehavior::Heart(s) => heart::draw(s, body, frame),
            BossBehavior::Oval(s) => oval::draw(s, body),
            BossBehavior::Hexagon(s) => hexagon::draw(s, body, frame),
            BossBehavior::Hourglass(s) => hourglass::draw(s, body, frame, stage),
            BossBehavior::Math(s) => math::draw(s, body, frame),
            BossBehavior::Star(s) => star::draw(s, body, frame),
        };
        if body.shield > 0.0 {
            out.push(DrawCommand::circle(body.pos, body.radius + boss_k::SHIELD_HIT_MARGIN, colors::SHIELD).outline());
        }
        out
    }

    /// Whether player bullets can currently reach the hull.
    pub fn is_vulnerable(&self) -> bool {
        if self.body.opacity <= 100.0 {
            return false;
        }
        match &self.behavior {
            BossBehavior::Math(s) => math::is_vulnerable(s),
            _ => true,
        }
    }

    /// Per-variant hull hit test for a player bullet at `point`.
    pub fn hit_test(&self, point: Vec2) -> bool {
        let body = &self.body;
        match self.kind {
            BossKind::Square => point_in_rect(point, body.pos, body.radius / 2.0, body.radius / 2.0),
            BossKind::Oval => point_in_ellipse(point, body.pos, boss_k::OVAL_RX, boss_k::OVAL_RY),
            _ => body.pos.distance(point) < body.radius,
        }
    }

    /// Radius of the ramming check against the player.
    pub fn contact_radius(&self) -> f32 {
        match self.kind {
            BossKind::Square => self.body.radius / 1.5,
            BossKind::Oval => boss_k::OVAL_RY,
            _ => self.body.radius,
        }
    }
}

/// Entrance animation for variants that have one.
pub fn intro_commands(kind: BossKind, progress: f32) -> Option<Vec<DrawCommand>> {
    let centre = Vec2::new(playfield::WIDTH / 2.0, 100.0);
    match kind {
        BossKind::Circle => Some(circle::draw_intro(centre, progress)),
        BossKind::Square => Some(square::draw_intro(centre, progress)),
        BossKind::Heart => Some(heart::draw_intro(centre, progress)),
        BossKind::Oval => Some(oval::draw_intro(centre, progress)),
        BossKind::Hexagon => Some(hexagon::draw_intro(centre, progress)),
        BossKind::Math => Some(math::draw_intro(centre, progress)),
        BossKind::Star => Some(star::draw_intro(centre, progress)),
        BossKind::Triangle | BossKind::Hourglass => None,
    }
}
