use boss_rush::compute::init_state;
use boss_rush::config::*;
use boss_rush::entities::*;
use boss_rush::error::ConfigError;
use boss_rush::status::*;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── GameConfig ────────────────────────────────────────────────────────────────

#[test]
fn empty_file_gives_defaults() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.selection().unwrap(), BossSelection::Random);
}

#[test]
fn full_file_parses() {
    let text = r#"
        boss = "Hourglass"
        bullet_speed_scale = 1.5
        seed = 7
    "#;
    let config = GameConfig::from_toml_str(text).unwrap();
    assert_eq!(config.selection().unwrap(), BossSelection::Fixed(BossKind::Hourglass));
    assert_relative_eq!(config.bullet_speed_scale, 1.5);
    assert_eq!(config.seed, Some(7));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = GameConfig::from_toml_str("lives = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn unknown_boss_is_rejected() {
    let err = GameConfig::from_toml_str("boss = \"dodecahedron\"").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownBoss(ref name) if name == "dodecahedron"));
}

#[test]
fn speed_scale_out_of_range_is_rejected() {
    let err = GameConfig::from_toml_str("bullet_speed_scale = 3.0").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSpeedScale(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = GameConfig::load(std::path::Path::new("/nonexistent/boss_rush.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/boss_rush.toml"));
}

// ── Parsing names ─────────────────────────────────────────────────────────────

#[test]
fn boss_names_round_trip() {
    for kind in BossKind::ALL {
        assert_eq!(kind.name().parse::<BossKind>().unwrap(), kind);
    }
}

#[test]
fn selection_accepts_random_in_any_case() {
    assert_eq!("RANDOM".parse::<BossSelection>().unwrap(), BossSelection::Random);
    assert_eq!(" star ".parse::<BossSelection>().unwrap(), BossSelection::Fixed(BossKind::Star));
    assert!("".parse::<BossSelection>().is_err());
}

// ── Speed scale ───────────────────────────────────────────────────────────────

#[test]
fn validate_speed_scale_bounds() {
    assert!(validate_speed_scale(0.5).is_ok());
    assert!(validate_speed_scale(2.0).is_ok());
    assert!(validate_speed_scale(0.4).is_err());
    assert!(validate_speed_scale(f32::NAN).is_err());
}

#[test]
fn stepping_stays_on_tenths_and_in_range() {
    let mut scale = 1.0;
    for _ in 0..7 {
        scale = step_speed_scale(scale, true);
    }
    assert_relative_eq!(scale, 1.7);
    for _ in 0..10 {
        scale = step_speed_scale(scale, true);
    }
    assert_relative_eq!(scale, MAX_SPEED_SCALE);
    for _ in 0..30 {
        scale = step_speed_scale(scale, false);
    }
    assert_relative_eq!(scale, MIN_SPEED_SCALE);
}

// ── Status publishing ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    score: Option<u32>,
    player_health: Option<f32>,
    boss_health: Option<f32>,
    stage: Option<u8>,
    weapon: Option<WeaponStatus>,
    player: Option<PlayerStatus>,
    status: Option<GameStatus>,
}

impl StatusSink for Recorder {
    fn set_score(&mut self, score: u32) {
        self.score = Some(score);
    }
    fn set_player_health(&mut self, percent: f32) {
        self.player_health = Some(percent);
    }
    fn set_boss_health(&mut self, percent: f32) {
        self.boss_health = Some(percent);
    }
    fn set_stage(&mut self, stage: u8) {
        self.stage = Some(stage);
    }
    fn set_weapon(&mut self, weapon: WeaponStatus) {
        self.weapon = Some(weapon);
    }
    fn set_player_status(&mut self, status: PlayerStatus) {
        self.player = Some(status);
    }
    fn set_game_status(&mut self, status: GameStatus) {
        self.status = Some(status);
    }
}

fn sample_state() -> SimulationContext {
    init_state(BossSelection::Fixed(BossKind::Star), 1.0, &mut StdRng::seed_from_u64(42))
}

#[test]
fn publish_calls_every_setter() {
    let mut state = sample_state();
    state.score = 1234;
    state.stage = 2;
    state.boss.body.hp = 2500.0;
    let mut sink = Recorder::default();
    publish_status(&state, &mut sink);

    assert_eq!(sink.score, Some(1234));
    assert_relative_eq!(sink.player_health.unwrap(), 100.0);
    assert_relative_eq!(sink.boss_health.unwrap(), 50.0);
    assert_eq!(sink.stage, Some(3));
    assert_eq!(sink.status, Some(GameStatus::Playing));
    assert!(sink.weapon.is_some());
    assert!(sink.player.is_some());
}

#[test]
fn health_percent_is_clamped() {
    let mut state = sample_state();
    state.player.hp = -40.0;
    state.boss.body.hp = -10.0;
    let mut sink = Recorder::default();
    publish_status(&state, &mut sink);
    assert_relative_eq!(sink.player_health.unwrap(), 0.0);
    assert_relative_eq!(sink.boss_health.unwrap(), 0.0);
}

#[test]
fn weapon_seconds_round_up() {
    let mut state = sample_state();
    state.player.weapon = Weapon { kind: WeaponType::Spread, level: 2, timer: 61 };
    let w = weapon_status(&state);
    assert_eq!(w, WeaponStatus { name: "SPREAD", level: 2, remaining_seconds: 2 });
}

#[test]
fn shield_seconds_round_up() {
    let mut state = sample_state();
    state.player.shield_charges = 1;
    state.player.shield_timer = 300;
    assert_eq!(player_status(&state), PlayerStatus { shield_charges: 1, shield_seconds: 5 });
    state.player.shield_timer = 0;
    assert_eq!(player_status(&state).shield_seconds, 0);
}
