//! Game tunables loaded from `config/game.toml`.
use std::{env, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/game.toml";
const PLAYER_NAME_ENV: &str = "STARTUP_SPRINT_PLAYER";

/// Longest player name the settings editor accepts.
pub const MAX_PLAYER_NAME_CHARS: usize = 16;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawGameConfig {
    #[serde(default)]
    session: RawSessionSection,
    #[serde(default)]
    stats: RawStatsSection,
    #[serde(default)]
    investment: RawInvestmentSection,
    #[serde(default)]
    minigames: RawMinigameSection,
    #[serde(default)]
    world: RawWorldSection,
    #[serde(default)]
    timing: RawTimingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSessionSection {
    weeks_total: u32,
    weekly_npc_limit: u32,
    player_name: String,
}

impl Default for RawSessionSection {
    fn default() -> Self {
        Self {
            weeks_total: 12,
            weekly_npc_limit: 2,
            player_name: "Founder".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawStatsSection {
    funds: i64,
    product: i32,
    morale: i32,
    hype: i32,
}

impl Default for RawStatsSection {
    fn default() -> Self {
        Self {
            funds: 50_000,
            product: 20,
            morale: 70,
            hype: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInvestmentSection {
    step: i64,
    min_budget: i64,
    budget_fraction: f64,
}

impl Default for RawInvestmentSection {
    fn default() -> Self {
        Self {
            step: 1_000,
            min_budget: 2_000,
            budget_fraction: 0.25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMinigameSection {
    bug_week: u32,
    bug_count: u32,
    bug_spawn_seconds: f32,
    bug_speed: f32,
    bug_breach_penalty: i64,
    trash_count: u32,
    cleanup_seconds: f32,
    cleanup_mood_threshold: i32,
    cleanup_npc: String,
}

impl Default for RawMinigameSection {
    fn default() -> Self {
        Self {
            bug_week: 6,
            bug_count: 5,
            bug_spawn_seconds: 1.0,
            bug_speed: 60.0,
            bug_breach_penalty: 10_000,
            trash_count: 6,
            cleanup_seconds: 15.0,
            cleanup_mood_threshold: 30,
            cleanup_npc: "Liam".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawWorldSection {
    room_width: f32,
    room_height: f32,
    player_speed: f32,
}

impl Default for RawWorldSection {
    fn default() -> Self {
        Self {
            room_width: 1280.0,
            room_height: 720.0,
            player_speed: 220.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTimingSection {
    typewriter_ms: u64,
    hud_delta_seconds: f32,
    week_banner_seconds: f32,
    time_scale: f32,
}

impl Default for RawTimingSection {
    fn default() -> Self {
        Self {
            typewriter_ms: 18,
            hud_delta_seconds: 3.0,
            week_banner_seconds: 1.3,
            time_scale: 1.0,
        }
    }
}

/// Session rules: length of the run and how many NPCs can be met per week.
#[derive(Debug, Clone)]
pub struct SessionRules {
    pub weeks_total: u32,
    pub weekly_npc_limit: usize,
    pub default_player_name: String,
}

/// Stats a new game starts with.
#[derive(Debug, Clone, Copy)]
pub struct StartingStats {
    pub funds: i64,
    pub product: i32,
    pub morale: i32,
    pub hype: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct InvestmentRules {
    pub step: i64,
    pub min_budget: i64,
    pub budget_fraction: f64,
}

#[derive(Debug, Clone)]
pub struct MinigameRules {
    pub bug_week: u32,
    pub bug_count: u32,
    pub bug_spawn_seconds: f32,
    pub bug_speed: f32,
    pub bug_breach_penalty: i64,
    pub trash_count: u32,
    pub cleanup_seconds: f32,
    pub cleanup_mood_threshold: i32,
    pub cleanup_npc: String,
}

#[derive(Debug, Clone, Copy)]
pub struct WorldRules {
    pub room_size: Vec2,
    pub player_speed: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct TimingRules {
    pub typewriter_ms: u64,
    pub hud_delta_seconds: f32,
    pub week_banner_seconds: f32,
    pub time_scale: f32,
}

/// Runtime configuration derived from `config/game.toml`.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub session: SessionRules,
    pub stats: StartingStats,
    pub investment: InvestmentRules,
    pub minigames: MinigameRules,
    pub world: WorldRules,
    pub timing: TimingRules,
}

impl GameConfig {
    pub fn load_or_default() -> Self {
        let mut config = Self::from_file(Path::new(CONFIG_PATH));
        if let Ok(name) = env::var(PLAYER_NAME_ENV) {
            let trimmed: String = name.trim().chars().take(MAX_PLAYER_NAME_CHARS).collect();
            if !trimmed.is_empty() {
                config.session.default_player_name = trimmed;
            }
        }
        config
    }

    fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_str(&data).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawGameConfig::default().into()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawGameConfig::default().into()
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawGameConfig>(data).map(Into::into)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        RawGameConfig::default().into()
    }
}

impl From<RawGameConfig> for GameConfig {
    fn from(value: RawGameConfig) -> Self {
        let session = value.session;
        let stats = value.stats;
        let investment = value.investment;
        let minigames = value.minigames;
        let world = value.world;
        let timing = value.timing;

        let player_name: String = session
            .player_name
            .trim()
            .chars()
            .take(MAX_PLAYER_NAME_CHARS)
            .collect();

        let step = investment.step.max(1);

        Self {
            session: SessionRules {
                weeks_total: session.weeks_total.max(1),
                weekly_npc_limit: session.weekly_npc_limit.max(1) as usize,
                default_player_name: if player_name.is_empty() {
                    "Founder".to_string()
                } else {
                    player_name
                },
            },
            stats: StartingStats {
                funds: stats.funds.max(0),
                product: stats.product.clamp(0, 100),
                morale: stats.morale.clamp(0, 100),
                hype: stats.hype.clamp(0, 100),
            },
            investment: InvestmentRules {
                step,
                min_budget: investment.min_budget.max(step),
                budget_fraction: investment.budget_fraction.clamp(0.0, 1.0),
            },
            minigames: MinigameRules {
                bug_week: minigames.bug_week,
                bug_count: minigames.bug_count.max(1),
                bug_spawn_seconds: minigames.bug_spawn_seconds.max(0.05),
                bug_speed: minigames.bug_speed.max(1.0),
                bug_breach_penalty: minigames.bug_breach_penalty.max(0),
                trash_count: minigames.trash_count.max(1),
                cleanup_seconds: minigames.cleanup_seconds.max(1.0),
                cleanup_mood_threshold: minigames.cleanup_mood_threshold.clamp(0, 100),
                cleanup_npc: minigames.cleanup_npc.trim().to_string(),
            },
            world: WorldRules {
                room_size: Vec2::new(world.room_width.max(640.0), world.room_height.max(480.0)),
                player_speed: world.player_speed.max(10.0),
            },
            timing: TimingRules {
                typewriter_ms: timing.typewriter_ms,
                hud_delta_seconds: timing.hud_delta_seconds.max(0.0),
                week_banner_seconds: timing.week_banner_seconds.max(0.1),
                time_scale: timing.time_scale,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_run() {
        let config = GameConfig::default();
        assert_eq!(config.session.weeks_total, 12);
        assert_eq!(config.session.weekly_npc_limit, 2);
        assert_eq!(config.stats.funds, 50_000);
        assert_eq!(config.stats.product, 20);
        assert_eq!(config.stats.morale, 70);
        assert_eq!(config.stats.hype, 10);
        assert_eq!(config.minigames.bug_week, 6);
        assert_eq!(config.timing.typewriter_ms, 18);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [session]
            weeks_total = 8

            [stats]
            morale = 250
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.session.weeks_total, 8);
        assert_eq!(config.session.weekly_npc_limit, 2);
        assert_eq!(config.stats.morale, 100);
        assert_eq!(config.stats.funds, 50_000);
    }

    #[test]
    fn sanitises_degenerate_values() {
        let config = GameConfig::from_toml_str(
            r#"
            [session]
            weeks_total = 0
            weekly_npc_limit = 0
            player_name = "   "

            [investment]
            step = 0
            min_budget = -5
            budget_fraction = 3.0
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.session.weeks_total, 1);
        assert_eq!(config.session.weekly_npc_limit, 1);
        assert_eq!(config.session.default_player_name, "Founder");
        assert_eq!(config.investment.step, 1);
        assert_eq!(config.investment.min_budget, 1);
        assert!((config.investment.budget_fraction - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(GameConfig::from_toml_str("[session\nweeks_total = ").is_err());
    }
}
