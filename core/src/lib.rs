#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the AI-Mon Defence simulation.
//!
//! This crate defines the message surface that connects the host adapter, the
//! authoritative world, and pure systems. The host submits [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to AI-Mon Defence.";

/// Width of the reference playing field in field units.
pub const FIELD_WIDTH: f32 = 800.0;
/// Height of the reference playing field in field units.
pub const FIELD_HEIGHT: f32 = 600.0;
/// Vertical coordinate of the horizontal lane enemies travel along.
pub const LANE_Y: f32 = 300.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of real time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a new enemy enter the field.
    SpawnEnemy {
        /// Location at which the enemy appears.
        position: FieldPoint,
        /// Validated starting attributes for the enemy.
        template: EnemyTemplate,
    },
    /// Requests that an enemy be relocated to a new position.
    MoveEnemy {
        /// Identifier of the enemy being moved.
        enemy: EnemyId,
        /// Position the enemy occupies after the move.
        position: FieldPoint,
    },
    /// Requests that an enemy leave the active set.
    RemoveEnemy {
        /// Identifier of the enemy to remove.
        enemy: EnemyId,
        /// Reason the enemy is leaving the field.
        cause: RemovalCause,
    },
    /// Requests placement of a turret of the named kind.
    PlaceTurret {
        /// Catalog name of the turret kind to construct.
        kind: String,
        /// Location of the new turret.
        position: FieldPoint,
    },
    /// Requests that a ready turret attack the provided enemy.
    FireTurret {
        /// Identifier of the attacking turret.
        turret: TurretId,
        /// Identifier of the enemy being attacked.
        enemy: EnemyId,
    },
    /// Ages every shot by the provided delta and discards expired shots.
    AgeShots {
        /// Duration subtracted from each shot's remaining lifetime.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
        /// Location the enemy occupies after spawning.
        position: FieldPoint,
    },
    /// Confirms that an enemy moved between two positions.
    EnemyMoved {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// Position before the move.
        from: FieldPoint,
        /// Position after the move.
        to: FieldPoint,
    },
    /// Confirms that an enemy left the active set.
    EnemyRemoved {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Reason the enemy was removed.
        cause: RemovalCause,
    },
    /// Confirms that a turret was placed into the world.
    TurretPlaced {
        /// Identifier assigned to the turret by the world.
        turret: TurretId,
        /// Shared kind definition used by the turret.
        kind: Arc<TurretKind>,
        /// Location of the turret.
        position: FieldPoint,
    },
    /// Reports that a turret placement request was rejected.
    TurretPlacementRejected {
        /// Position provided in the placement request.
        position: FieldPoint,
        /// Specific reason the placement failed.
        reason: UnknownKindError,
    },
    /// Confirms that a turret attacked an enemy.
    TurretFired {
        /// Identifier of the turret that fired.
        turret: TurretId,
        /// Identifier of the enemy that was hit.
        enemy: EnemyId,
        /// Hit points subtracted from the enemy.
        damage: f32,
        /// Identifier of the shot recording the attack.
        shot: ShotId,
    },
    /// Confirms that a shot reached the end of its lifetime.
    ShotExpired {
        /// Identifier of the expired shot.
        shot: ShotId,
    },
}

/// Total time reported by the `TimeAdvanced` events in `events`.
///
/// Returns `None` when no tick was observed, which systems treat as "do
/// nothing this update". A tick of zero length yields `Some(Duration::ZERO)`.
#[must_use]
pub fn elapsed_in(events: &[Event]) -> Option<Duration> {
    events.iter().fold(None, |elapsed, event| match event {
        Event::TimeAdvanced { dt } => Some(elapsed.unwrap_or_default().saturating_add(*dt)),
        _ => elapsed,
    })
}

/// Reason an enemy left the active set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalCause {
    /// The enemy travelled past the right edge of the field.
    Escaped,
    /// The enemy ran out of hit points.
    Killed,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a turret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurretId(u32);

impl TurretId {
    /// Creates a new turret identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the turret identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShotId(u32);

impl ShotId {
    /// Creates a new shot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the shot identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location on the playing field expressed in continuous field units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldPoint {
    x: f32,
    y: f32,
}

impl FieldPoint {
    /// Creates a new field point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the point.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate of the point.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Planar Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: FieldPoint) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns the point shifted horizontally by `dx`.
    #[must_use]
    pub fn offset_x(self, dx: f32) -> Self {
        Self::new(self.x + dx, self.y)
    }
}

/// Fixed logical dimensions of the playing field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    width: f32,
    height: f32,
    lane_y: f32,
}

impl Field {
    /// Creates a new field description.
    #[must_use]
    pub const fn new(width: f32, height: f32, lane_y: f32) -> Self {
        Self {
            width,
            height,
            lane_y,
        }
    }

    /// Total width of the field. Enemies beyond it have escaped.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Total height of the field.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Vertical coordinate of the enemy lane.
    #[must_use]
    pub const fn lane_y(&self) -> f32 {
        self.lane_y
    }

    /// Reports whether a position lies past the right edge of the field.
    #[must_use]
    pub fn is_escaped(&self, position: FieldPoint) -> bool {
        position.x() > self.width
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT, LANE_Y)
    }
}

/// Immutable definition shared by every turret of one kind.
#[derive(Clone, Debug, PartialEq)]
pub struct TurretKind {
    name: String,
    level: u32,
    attack_power: f32,
    range: f32,
}

impl TurretKind {
    /// Creates a validated turret kind.
    ///
    /// Level, attack power and range must all be strictly positive; attack
    /// power and range must also be finite. A violation is a catalog defect
    /// and is reported as [`InvalidEntityError`].
    pub fn new(
        name: impl Into<String>,
        level: u32,
        attack_power: f32,
        range: f32,
    ) -> Result<Self, InvalidEntityError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidEntityError::EmptyKindName);
        }
        if level == 0 {
            return Err(InvalidEntityError::NonPositiveLevel { name });
        }
        if !is_positive(attack_power) {
            return Err(InvalidEntityError::NonPositiveAttackPower {
                name,
                value: attack_power,
            });
        }
        if !is_positive(range) {
            return Err(InvalidEntityError::NonPositiveRange { name, value: range });
        }

        Ok(Self {
            name,
            level,
            attack_power,
            range,
        })
    }

    /// Catalog name of the kind.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Level multiplier applied to the attack power.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Base attack power before the level multiplier.
    #[must_use]
    pub const fn attack_power(&self) -> f32 {
        self.attack_power
    }

    /// Radius of the circular area the kind can attack into.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Hit points removed by a single attack: `level * attack_power`.
    #[must_use]
    pub fn damage(&self) -> f32 {
        self.level as f32 * self.attack_power
    }

    /// Reports whether `target` lies within range of a turret at `origin`.
    #[must_use]
    pub fn reaches(&self, origin: FieldPoint, target: FieldPoint) -> bool {
        origin.distance(target) <= self.range
    }
}

/// Kinds shipped with the reference build.
#[must_use]
pub fn reference_kinds() -> Vec<TurretKind> {
    [
        ("Bulbasaur", 5, 8.0, 120.0),
        ("Charmander", 5, 10.0, 120.0),
        ("Squirtle", 5, 9.0, 120.0),
    ]
    .into_iter()
    .map(|(name, level, attack_power, range)| TurretKind {
        name: name.to_owned(),
        level,
        attack_power,
        range,
    })
    .collect()
}

/// Validated starting attributes assigned to freshly spawned enemies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    hit_points: f32,
    speed: f32,
}

impl EnemyTemplate {
    /// Hit points carried by reference enemies.
    pub const REFERENCE_HIT_POINTS: f32 = 100.0;
    /// Speed of reference enemies in field units per second.
    pub const REFERENCE_SPEED: f32 = 40.0;

    /// Creates a validated enemy template.
    ///
    /// Hit points and speed must be finite and not negative. An enemy created
    /// with zero hit points is legal and is pruned on the next update.
    pub fn new(hit_points: f32, speed: f32) -> Result<Self, InvalidEntityError> {
        if !is_non_negative(hit_points) {
            return Err(InvalidEntityError::NegativeHitPoints { value: hit_points });
        }
        if !is_non_negative(speed) {
            return Err(InvalidEntityError::NegativeSpeed { value: speed });
        }
        Ok(Self { hit_points, speed })
    }

    /// Starting hit points.
    #[must_use]
    pub const fn hit_points(&self) -> f32 {
        self.hit_points
    }

    /// Constant speed along the lane in field units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            hit_points: Self::REFERENCE_HIT_POINTS,
            speed: Self::REFERENCE_SPEED,
        }
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Raised when a kind or entity is constructed from invalid attributes.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InvalidEntityError {
    /// The kind name was empty or whitespace.
    #[error("turret kind name must not be empty")]
    EmptyKindName,
    /// The kind level was zero.
    #[error("turret kind `{name}` must have a positive level")]
    NonPositiveLevel {
        /// Name of the offending kind.
        name: String,
    },
    /// The kind attack power was zero, negative or not finite.
    #[error("turret kind `{name}` has non-positive attack power {value}")]
    NonPositiveAttackPower {
        /// Name of the offending kind.
        name: String,
        /// Rejected attack power.
        value: f32,
    },
    /// The kind range was zero, negative or not finite.
    #[error("turret kind `{name}` has non-positive range {value}")]
    NonPositiveRange {
        /// Name of the offending kind.
        name: String,
        /// Rejected range.
        value: f32,
    },
    /// Two catalog entries shared the same name.
    #[error("turret kind `{name}` is defined more than once")]
    DuplicateKindName {
        /// Name that appeared twice.
        name: String,
    },
    /// Starting hit points were negative or not finite.
    #[error("enemy hit points must not be negative, got {value}")]
    NegativeHitPoints {
        /// Rejected hit points.
        value: f32,
    },
    /// Speed was negative or not finite.
    #[error("enemy speed must not be negative, got {value}")]
    NegativeSpeed {
        /// Rejected speed.
        value: f32,
    },
}

/// Raised when a placement names a kind absent from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("unknown turret kind `{name}`")]
pub struct UnknownKindError {
    name: String,
}

impl UnknownKindError {
    /// Creates a new error for the provided kind name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Kind name that could not be resolved.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable representation of a single turret's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct TurretSnapshot {
    /// Identifier allocated to the turret by the world.
    pub id: TurretId,
    /// Shared kind definition.
    pub kind: Arc<TurretKind>,
    /// Fixed location of the turret.
    pub position: FieldPoint,
    /// Time left before the turret may fire again.
    pub cooldown: Duration,
}

impl TurretSnapshot {
    /// Reports whether the turret may fire during the current update.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }
}

/// Read-only snapshot describing all turrets placed on the field.
#[derive(Clone, Debug, Default)]
pub struct TurretView {
    snapshots: Vec<TurretSnapshot>,
}

impl TurretView {
    /// Creates a new turret view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TurretSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured turret snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &TurretSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot for the provided turret.
    #[must_use]
    pub fn get(&self, turret: TurretId) -> Option<&TurretSnapshot> {
        self.snapshots
            .binary_search_by_key(&turret, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of captured turrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no turrets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TurretSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current location of the enemy.
    pub position: FieldPoint,
    /// Remaining hit points. Zero or below means the enemy is dead.
    pub hit_points: f32,
    /// Constant speed along the lane in field units per second.
    pub speed: f32,
}

impl EnemySnapshot {
    /// Reports whether the enemy has run out of hit points.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hit_points <= 0.0
    }
}

/// Read-only snapshot describing all enemies on the field.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    ///
    /// Snapshots are ordered by identifier, which matches spawn order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single shot used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotSnapshot {
    /// Unique identifier assigned to the shot.
    pub id: ShotId,
    /// Turret position captured when the shot was fired.
    pub origin: FieldPoint,
    /// Enemy position captured when the shot was fired.
    pub target: FieldPoint,
    /// Remaining lifetime of the shot.
    pub time_to_live: Duration,
}

/// Read-only snapshot describing all live shots.
#[derive(Clone, Debug, Default)]
pub struct ShotView {
    snapshots: Vec<ShotSnapshot>,
}

impl ShotView {
    /// Creates a new shot view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ShotSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured shot snapshots in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &ShotSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured shots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no shots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ShotSnapshot> {
        self.snapshots
    }
}

/// Enemy selected by a turret during the current update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretTarget {
    /// Turret that selected the target.
    pub turret: TurretId,
    /// Enemy chosen as the target.
    pub enemy: EnemyId,
    /// Position of the turret.
    pub turret_position: FieldPoint,
    /// Position of the enemy when it was selected.
    pub enemy_position: FieldPoint,
}
