#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for AI-Mon Defence.

mod catalog;
mod turrets;

use std::{collections::BTreeMap, time::Duration};

use aimon_defence_core::{
    Command, EnemyId, EnemySnapshot, EnemyTemplate, Event, Field, FieldPoint, ShotId,
    ShotSnapshot, TurretId, WELCOME_BANNER,
};
use tracing::{debug, trace};

pub use catalog::Catalog;
use turrets::TurretRegistry;

/// Cooldown applied to a turret immediately after it fires.
pub const FIRE_COOLDOWN: Duration = Duration::from_millis(800);
/// Lifetime of the shot recorded for each attack.
pub const SHOT_TIME_TO_LIVE: Duration = Duration::from_millis(100);

/// Tunables fixed for the lifetime of a world.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Dimensions of the playing field.
    pub field: Field,
    /// Turret kinds available for placement.
    pub catalog: Catalog,
    /// Cooldown applied to a turret after it fires.
    pub fire_cooldown: Duration,
    /// Lifetime of a freshly fired shot.
    pub shot_time_to_live: Duration,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            field: Field::default(),
            catalog: Catalog::reference(),
            fire_cooldown: FIRE_COOLDOWN,
            shot_time_to_live: SHOT_TIME_TO_LIVE,
        }
    }
}

/// Represents the authoritative AI-Mon Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    field: Field,
    catalog: Catalog,
    fire_cooldown: Duration,
    shot_time_to_live: Duration,
    turrets: TurretRegistry,
    enemies: BTreeMap<EnemyId, Enemy>,
    shots: Vec<Shot>,
    next_enemy_id: EnemyId,
    next_shot_id: ShotId,
    clock: Clock,
}

impl World {
    /// Creates a new world using the reference configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new, empty world using the provided configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            field: config.field,
            catalog: config.catalog,
            fire_cooldown: config.fire_cooldown,
            shot_time_to_live: config.shot_time_to_live,
            turrets: TurretRegistry::new(),
            enemies: BTreeMap::new(),
            shots: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            next_shot_id: ShotId::new(0),
            clock: Clock::default(),
        }
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        id
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.clock.advance(dt);
            world.turrets.cool_down(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SpawnEnemy { position, template } => {
            let id = world.allocate_enemy_id();
            let _ = world
                .enemies
                .insert(id, Enemy::from_template(id, position, template));
            debug!(enemy = id.get(), x = position.x(), y = position.y(), "enemy spawned");
            out_events.push(Event::EnemySpawned {
                enemy: id,
                position,
            });
        }
        Command::MoveEnemy { enemy, position } => {
            let Some(entry) = world.enemies.get_mut(&enemy) else {
                return;
            };
            let from = entry.position;
            entry.position = position;
            out_events.push(Event::EnemyMoved {
                enemy,
                from,
                to: position,
            });
        }
        Command::RemoveEnemy { enemy, cause } => {
            if world.enemies.remove(&enemy).is_none() {
                return;
            }
            debug!(enemy = enemy.get(), ?cause, "enemy removed");
            out_events.push(Event::EnemyRemoved { enemy, cause });
        }
        Command::PlaceTurret { kind, position } => match world.catalog.resolve(&kind) {
            Ok(kind) => {
                let turret = world.turrets.insert(kind.clone(), position);
                debug!(
                    turret = turret.get(),
                    kind = kind.name(),
                    x = position.x(),
                    y = position.y(),
                    "turret placed"
                );
                out_events.push(Event::TurretPlaced {
                    turret,
                    kind,
                    position,
                });
            }
            Err(reason) => {
                out_events.push(Event::TurretPlacementRejected { position, reason });
            }
        },
        Command::FireTurret { turret, enemy } => fire(world, turret, enemy, out_events),
        Command::AgeShots { dt } => {
            for shot in &mut world.shots {
                shot.time_to_live = shot.time_to_live.saturating_sub(dt);
            }
            world.shots.retain(|shot| {
                let alive = !shot.time_to_live.is_zero();
                if !alive {
                    trace!(shot = shot.id.get(), "shot expired");
                    out_events.push(Event::ShotExpired { shot: shot.id });
                }
                alive
            });
        }
    }
}

fn fire(world: &mut World, turret: TurretId, enemy: EnemyId, out_events: &mut Vec<Event>) {
    let Some(target) = world.enemies.get_mut(&enemy) else {
        return;
    };
    let fire_cooldown = world.fire_cooldown;
    let time_to_live = world.shot_time_to_live;

    let Some(state) = world.turrets.get_mut(turret) else {
        return;
    };
    if !state.is_ready() {
        trace!(turret = turret.get(), "fire ignored, turret cooling down");
        return;
    }

    let shot = world.next_shot_id;
    world.next_shot_id = ShotId::new(shot.get().saturating_add(1));

    let damage = state.kind.damage();
    target.hit_points -= damage;
    state.cooldown = fire_cooldown;
    world.shots.push(Shot {
        id: shot,
        origin: state.position,
        target: target.position,
        time_to_live,
    });

    debug!(
        turret = turret.get(),
        enemy = enemy.get(),
        damage,
        remaining = target.hit_points,
        "turret fired"
    );
    out_events.push(Event::TurretFired {
        turret,
        enemy,
        damage,
        shot,
    });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Catalog, World};
    use aimon_defence_core::{EnemyView, Field, ShotView, TurretView};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the dimensions of the playing field.
    #[must_use]
    pub fn field(world: &World) -> Field {
        world.field
    }

    /// Provides read-only access to the turret kind catalog.
    #[must_use]
    pub fn catalog(world: &World) -> &Catalog {
        &world.catalog
    }

    /// Lifetime assigned to freshly fired shots.
    #[must_use]
    pub fn shot_time_to_live(world: &World) -> Duration {
        world.shot_time_to_live
    }

    /// Total simulated time accumulated by the clock.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.clock.elapsed
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.clock.tick_index
    }

    /// Number of turrets placed on the field.
    #[must_use]
    pub fn turret_count(world: &World) -> usize {
        world.turrets.len()
    }

    /// Captures a read-only view of the turrets placed on the field.
    #[must_use]
    pub fn turrets(world: &World) -> TurretView {
        TurretView::from_snapshots(world.turrets.iter().map(|state| state.snapshot()).collect())
    }

    /// Captures a read-only view of the enemies on the field.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.values().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of the live shots.
    #[must_use]
    pub fn shot_view(world: &World) -> ShotView {
        ShotView::from_snapshots(world.shots.iter().map(|shot| shot.snapshot()).collect())
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Clock {
    elapsed: Duration,
    tick_index: u64,
}

impl Clock {
    fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.tick_index = self.tick_index.saturating_add(1);
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    position: FieldPoint,
    hit_points: f32,
    speed: f32,
}

impl Enemy {
    fn from_template(id: EnemyId, position: FieldPoint, template: EnemyTemplate) -> Self {
        Self {
            id,
            position,
            hit_points: template.hit_points(),
            speed: template.speed(),
        }
    }

    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.position,
            hit_points: self.hit_points,
            speed: self.speed,
        }
    }
}

#[derive(Clone, Debug)]
struct Shot {
    id: ShotId,
    origin: FieldPoint,
    target: FieldPoint,
    time_to_live: Duration,
}

impl Shot {
    fn snapshot(&self) -> ShotSnapshot {
        ShotSnapshot {
            id: self.id,
            origin: self.origin,
            target: self.target,
            time_to_live: self.time_to_live,
        }
    }
}
