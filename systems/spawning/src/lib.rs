#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-cadence spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use aimon_defence_core::{elapsed_in, Command, EnemyTemplate, Event, FieldPoint, LANE_Y};

/// Interval between spawns in the reference build.
pub const SPAWN_INTERVAL: Duration = Duration::from_secs(2);

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    spawn_interval: Duration,
    entry: FieldPoint,
    template: EnemyTemplate,
}

impl Config {
    /// Creates a new configuration using the provided cadence, entry point and template.
    #[must_use]
    pub const fn new(spawn_interval: Duration, entry: FieldPoint, template: EnemyTemplate) -> Self {
        Self {
            spawn_interval,
            entry,
            template,
        }
    }

    /// Time that must accumulate before the next spawn.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    /// Position at which enemies enter the field.
    #[must_use]
    pub const fn entry(&self) -> FieldPoint {
        self.entry
    }

    /// Attributes assigned to spawned enemies.
    #[must_use]
    pub const fn template(&self) -> EnemyTemplate {
        self.template
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            SPAWN_INTERVAL,
            FieldPoint::new(0.0, LANE_Y),
            EnemyTemplate::default(),
        )
    }
}

/// Pure system that emits one spawn command whenever the interval has elapsed.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    since_last_spawn: Duration,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            since_last_spawn: Duration::ZERO,
        }
    }

    /// Time accumulated since the most recent spawn.
    #[must_use]
    pub fn since_last_spawn(&self) -> Duration {
        self.since_last_spawn
    }

    /// Consumes tick events to emit spawn commands.
    ///
    /// At most one enemy is spawned per call. When a long stall pushes the
    /// accumulator past several intervals the surplus is discarded rather than
    /// replayed, and the timer restarts from zero. A zero interval disables
    /// spawning.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        if self.config.spawn_interval.is_zero() {
            return;
        }

        let accumulated = elapsed_in(events).unwrap_or_default();

        self.since_last_spawn = self.since_last_spawn.saturating_add(accumulated);
        if self.since_last_spawn < self.config.spawn_interval {
            return;
        }

        self.since_last_spawn = Duration::ZERO;
        out.push(Command::SpawnEnemy {
            position: self.config.entry,
            template: self.config.template,
        });
    }
}
