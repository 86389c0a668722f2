//! Declarative configuration for a simulation session.
//!
//! Every field defaults to the reference build, so an empty TOML document
//! yields the stock 800×600 field, 2 s spawn cadence and three-kind catalog.

use std::time::Duration;

use aimon_defence_core::{EnemyTemplate, Field, FieldPoint, InvalidEntityError, TurretKind};
use aimon_defence_system_spawning::Config as SpawnConfig;
use aimon_defence_world::{Catalog, WorldConfig};
use serde::Deserialize;
use thiserror::Error;

/// Complete configuration for a simulation session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Field dimensions.
    pub field: FieldConfig,
    /// Spawner cadence and enemy attributes.
    pub spawning: SpawningConfig,
    /// Turret cooldown and shot lifetime.
    pub combat: CombatConfig,
    /// Turret kind catalog. Empty selects the reference catalog.
    pub kinds: Vec<KindConfig>,
}

/// Field dimensions section.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Width of the field; enemies past it escape.
    pub width: f32,
    /// Height of the field.
    pub height: f32,
    /// Vertical coordinate of the enemy lane.
    pub lane_y: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let field = Field::default();
        Self {
            width: field.width(),
            height: field.height(),
            lane_y: field.lane_y(),
        }
    }
}

/// Spawner section.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawningConfig {
    /// Seconds between spawns.
    pub interval_secs: f64,
    /// Horizontal entry coordinate; enemies enter on the lane.
    pub entry_x: f32,
    /// Starting hit points of spawned enemies.
    pub hit_points: f32,
    /// Speed of spawned enemies in field units per second.
    pub speed: f32,
}

impl Default for SpawningConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2.0,
            entry_x: 0.0,
            hit_points: EnemyTemplate::REFERENCE_HIT_POINTS,
            speed: EnemyTemplate::REFERENCE_SPEED,
        }
    }
}

/// Combat section.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombatConfig {
    /// Seconds a turret waits after firing.
    pub fire_cooldown_secs: f64,
    /// Seconds a shot remains visible.
    pub shot_time_to_live_secs: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            fire_cooldown_secs: 0.8,
            shot_time_to_live_secs: 0.1,
        }
    }
}

/// One catalog entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindConfig {
    /// Name used to place the kind.
    pub name: String,
    /// Level multiplier.
    pub level: u32,
    /// Attack power before the level multiplier.
    pub attack_power: f32,
    /// Attack radius.
    pub range: f32,
}

/// Errors raised while parsing or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A kind or enemy template failed validation.
    #[error(transparent)]
    InvalidEntity(#[from] InvalidEntityError),
    /// A duration was negative, not finite or too large.
    #[error("`{name}` must be a finite, non-negative number of seconds, got {value}")]
    InvalidDuration {
        /// Configuration key holding the duration.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A coordinate was NaN or infinite.
    #[error("`{name}` must be a finite coordinate, got {value}")]
    NonFiniteCoordinate {
        /// Configuration key holding the coordinate.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The field dimensions were not positive.
    #[error("field dimensions must be positive, got {width}x{height}")]
    InvalidField {
        /// Rejected width.
        width: f32,
        /// Rejected height.
        height: f32,
    },
}

impl SimulationConfig {
    /// Parses a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Validates the configuration and splits it into per-component settings.
    pub fn into_parts(self) -> Result<(WorldConfig, SpawnConfig), ConfigError> {
        let FieldConfig {
            width,
            height,
            lane_y,
        } = self.field;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ConfigError::InvalidField { width, height });
        }
        let lane_y = finite("field.lane_y", lane_y)?;
        let entry_x = finite("spawning.entry_x", self.spawning.entry_x)?;
        let field = Field::new(width, height, lane_y);

        let catalog = if self.kinds.is_empty() {
            Catalog::reference()
        } else {
            let kinds = self
                .kinds
                .into_iter()
                .map(|kind| TurretKind::new(kind.name, kind.level, kind.attack_power, kind.range))
                .collect::<Result<Vec<_>, _>>()?;
            Catalog::from_kinds(kinds)?
        };

        let world = WorldConfig {
            field,
            catalog,
            fire_cooldown: seconds("combat.fire_cooldown_secs", self.combat.fire_cooldown_secs)?,
            shot_time_to_live: seconds(
                "combat.shot_time_to_live_secs",
                self.combat.shot_time_to_live_secs,
            )?,
        };

        let template = EnemyTemplate::new(self.spawning.hit_points, self.spawning.speed)?;
        let spawning = SpawnConfig::new(
            seconds("spawning.interval_secs", self.spawning.interval_secs)?,
            FieldPoint::new(entry_x, lane_y),
            template,
        );

        Ok((world, spawning))
    }
}

fn seconds(name: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { name, value })
}

fn finite(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFiniteCoordinate { name, value })
    }
}
