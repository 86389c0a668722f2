#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-stepped facade that composes the world and systems into one update.
//!
//! A [`Simulation`] owns the authoritative world together with every pure
//! system. The host drives it with two operations: [`Simulation::advance`]
//! once per frame and [`Simulation::place_turret`] between frames. Each
//! advance runs the clock, spawning, movement, targeting and combat, and
//! pruning phases in that fixed order, applying the commands of one phase
//! before the next phase reads the world.

mod config;

use std::time::Duration;

use aimon_defence_core::{
    Command, EnemyView, Event, Field, FieldPoint, ShotView, TurretId, TurretTarget, TurretView,
    UnknownKindError,
};
use aimon_defence_system_movement::Movement;
use aimon_defence_system_pruning::Pruning;
use aimon_defence_system_spawning::{Config as SpawnConfig, Spawning};
use aimon_defence_system_turret_combat::TurretCombat;
use aimon_defence_system_turret_targeting::TurretTargeting;
use aimon_defence_world::{self as world, query, World};
use tracing::debug;

pub use config::{
    CombatConfig, ConfigError, FieldConfig, KindConfig, SimulationConfig, SpawningConfig,
};

/// Owns the world and systems for a single play session.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    movement: Movement,
    targeting: TurretTargeting,
    combat: TurretCombat,
    pruning: Pruning,
    targets: Vec<TurretTarget>,
    commands: Vec<Command>,
    tick_events: Vec<Event>,
    frame_events: Vec<Event>,
}

impl Simulation {
    /// Creates a simulation using the reference build configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(World::new(), SpawnConfig::default())
    }

    /// Creates a simulation from a validated configuration.
    pub fn from_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        let (world_config, spawn_config) = config.into_parts()?;
        Ok(Self::from_parts(
            World::with_config(world_config),
            spawn_config,
        ))
    }

    /// Creates a simulation around an existing world.
    ///
    /// The spawner starts with an empty accumulator regardless of how much
    /// time the world has already seen.
    #[must_use]
    pub fn from_parts(world: World, spawn_config: SpawnConfig) -> Self {
        Self {
            world,
            spawning: Spawning::new(spawn_config),
            movement: Movement::new(),
            targeting: TurretTargeting::new(),
            combat: TurretCombat::new(),
            pruning: Pruning::new(),
            targets: Vec::new(),
            commands: Vec::new(),
            tick_events: Vec::new(),
            frame_events: Vec::new(),
        }
    }

    /// Runs one complete update covering `dt` of elapsed time.
    ///
    /// Escape culling happens during movement, before combat, so an enemy
    /// leaving the field this frame is never targeted. Hit-point pruning
    /// happens after combat, so an enemy killed this frame is never observed
    /// alive afterwards.
    pub fn advance(&mut self, dt: Duration) {
        self.frame_events.clear();
        self.tick_events.clear();

        world::apply(&mut self.world, Command::Tick { dt }, &mut self.tick_events);
        self.frame_events.extend(self.tick_events.iter().cloned());

        self.spawning.handle(&self.tick_events, &mut self.commands);
        self.flush_commands();

        let enemies = query::enemy_view(&self.world);
        let field = query::field(&self.world);
        self.movement
            .handle(&self.tick_events, &enemies, &field, &mut self.commands);
        self.flush_commands();

        let turrets = query::turrets(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting.handle(&turrets, &enemies, &mut self.targets);
        self.combat
            .handle(&turrets, &self.targets, &mut self.commands);
        self.flush_commands();

        let enemies = query::enemy_view(&self.world);
        self.pruning
            .handle(&self.tick_events, &enemies, &mut self.commands);
        self.flush_commands();

        debug!(
            tick = query::tick_index(&self.world),
            events = self.frame_events.len(),
            turrets = query::turret_count(&self.world),
            "frame advanced"
        );
    }

    /// Places a turret of the named kind at `(x, y)`.
    ///
    /// Placement is unconditional: positions outside the field and overlapping
    /// turrets are accepted. The new turret is ready to fire on the next
    /// update. An unknown kind name leaves the world untouched.
    pub fn place_turret(&mut self, x: f32, y: f32, kind: &str) -> Result<TurretId, UnknownKindError> {
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::PlaceTurret {
                kind: kind.to_owned(),
                position: FieldPoint::new(x, y),
            },
            &mut events,
        );

        let mut outcome = Err(UnknownKindError::new(kind));
        for event in events {
            match event {
                Event::TurretPlaced { turret, .. } => outcome = Ok(turret),
                Event::TurretPlacementRejected { reason, .. } => outcome = Err(reason),
                _ => {}
            }
        }
        outcome
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Events produced by the most recent [`Simulation::advance`] call.
    #[must_use]
    pub fn frame_events(&self) -> &[Event] {
        &self.frame_events
    }

    /// Dimensions of the playing field.
    #[must_use]
    pub fn field(&self) -> Field {
        query::field(&self.world)
    }

    /// Snapshot of the placed turrets.
    #[must_use]
    pub fn turrets(&self) -> TurretView {
        query::turrets(&self.world)
    }

    /// Snapshot of the enemies on the field.
    #[must_use]
    pub fn enemies(&self) -> EnemyView {
        query::enemy_view(&self.world)
    }

    /// Snapshot of the live shots.
    #[must_use]
    pub fn shots(&self) -> ShotView {
        query::shot_view(&self.world)
    }

    /// Total simulated time.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        query::elapsed(&self.world)
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.frame_events);
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
