#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for AI-Mon Defence adapters.

use std::time::Duration;

use anyhow::Result as AnyResult;
use aimon_defence_core::{
    EnemyId, EnemyView, Field, ShotId, ShotView, TurretId, TurretView,
};
use glam::Vec2;
use thiserror::Error;

/// Edge length of the square sprite drawn for each turret.
pub const TURRET_SPRITE_SIZE: f32 = 32.0;

/// Edge length of the square marker drawn for each enemy.
pub const ENEMY_MARKER_SIZE: f32 = 20.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

const LANE_COLOR: Color = Color::from_rgb_u8(90, 90, 90);
const ENEMY_COLOR: Color = Color::from_rgb_u8(200, 40, 40);
const SHOT_COLOR: Color = Color::from_rgb_u8(250, 220, 60);
const UNKNOWN_KIND_COLOR: Color = Color::from_rgb_u8(150, 150, 150);

/// Sprite tint associated with a turret kind name.
#[must_use]
pub fn kind_color(kind: &str) -> Color {
    match kind {
        "Bulbasaur" => Color::from_rgb_u8(80, 170, 90),
        "Charmander" => Color::from_rgb_u8(230, 120, 40),
        "Squirtle" => Color::from_rgb_u8(60, 130, 220),
        _ => UNKNOWN_KIND_COLOR,
    }
}

/// Placement requested by the player during a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Field position of the requested turret.
    pub position: Vec2,
    /// Kind name as typed by the player.
    pub kind: String,
}

impl PlacementRequest {
    /// Creates a new placement request.
    #[must_use]
    pub fn new<T>(position: Vec2, kind: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            position,
            kind: kind.into(),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Zero-based index of the frame being produced.
    pub frame: u64,
    /// Turret placements requested since the previous frame.
    pub placements: Vec<PlacementRequest>,
}

/// Horizontal line enemies travel along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanePresentation {
    /// Left end of the lane.
    pub start: Vec2,
    /// Right end of the lane.
    pub end: Vec2,
    /// Stroke color.
    pub color: Color,
}

/// Turret sprite placement.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneTurret {
    /// Identifier of the turret.
    pub id: TurretId,
    /// Kind name used to select the sprite.
    pub kind: String,
    /// Top-left corner of the sprite.
    pub origin: Vec2,
    /// Sprite dimensions.
    pub size: Vec2,
    /// Sprite tint.
    pub color: Color,
    /// Whether the turret may fire on the next update.
    pub ready: bool,
}

/// Enemy marker with its hit point label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEnemy {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Centre of the marker.
    pub center: Vec2,
    /// Marker dimensions.
    pub size: Vec2,
    /// Remaining hit points rounded up for display.
    pub hit_points_label: u32,
    /// Marker fill.
    pub color: Color,
}

/// Shot drawn as a fading line from turret to target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneShot {
    /// Identifier of the shot.
    pub id: ShotId,
    /// Turret end of the line.
    pub from: Vec2,
    /// Target end of the line.
    pub to: Vec2,
    /// Stroke color whose alpha tracks the remaining lifetime.
    pub color: Color,
}

/// Everything a backend needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Width and height of the playing field.
    pub field_size: Vec2,
    /// Enemy lane.
    pub lane: LanePresentation,
    /// Placed turrets in placement order.
    pub turrets: Vec<SceneTurret>,
    /// Enemies in spawn order.
    pub enemies: Vec<SceneEnemy>,
    /// Live shots in firing order.
    pub shots: Vec<SceneShot>,
}

impl Scene {
    /// Creates an empty scene for the provided field.
    pub fn new(field: Field) -> Result<Self, RenderingError> {
        let (width, height) = (field.width(), field.height());
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(RenderingError::InvalidFieldSize { width, height });
        }

        Ok(Self {
            field_size: Vec2::new(width, height),
            lane: LanePresentation {
                start: Vec2::new(0.0, field.lane_y()),
                end: Vec2::new(width, field.lane_y()),
                color: LANE_COLOR,
            },
            turrets: Vec::new(),
            enemies: Vec::new(),
            shots: Vec::new(),
        })
    }

    /// Builds a scene describing the provided snapshots.
    ///
    /// `shot_time_to_live` is the lifetime of a fresh shot; a shot at that
    /// lifetime is drawn fully opaque and fades towards transparent.
    pub fn from_views(
        field: Field,
        turrets: &TurretView,
        enemies: &EnemyView,
        shots: &ShotView,
        shot_time_to_live: Duration,
    ) -> Result<Self, RenderingError> {
        let mut scene = Self::new(field)?;
        scene.refresh(turrets, enemies, shots, shot_time_to_live);
        Ok(scene)
    }

    /// Replaces the dynamic content of the scene with the provided snapshots.
    pub fn refresh(
        &mut self,
        turrets: &TurretView,
        enemies: &EnemyView,
        shots: &ShotView,
        shot_time_to_live: Duration,
    ) {
        let sprite = Vec2::splat(TURRET_SPRITE_SIZE);
        self.turrets.clear();
        self.turrets.extend(turrets.iter().map(|turret| SceneTurret {
            id: turret.id,
            kind: turret.kind.name().to_owned(),
            origin: to_vec2(turret.position.x(), turret.position.y()) - sprite / 2.0,
            size: sprite,
            color: kind_color(turret.kind.name()),
            ready: turret.is_ready(),
        }));

        self.enemies.clear();
        self.enemies.extend(enemies.iter().map(|enemy| SceneEnemy {
            id: enemy.id,
            center: to_vec2(enemy.position.x(), enemy.position.y()),
            size: Vec2::splat(ENEMY_MARKER_SIZE),
            hit_points_label: hit_points_label(enemy.hit_points),
            color: ENEMY_COLOR,
        }));

        self.shots.clear();
        self.shots.extend(shots.iter().map(|shot| SceneShot {
            id: shot.id,
            from: to_vec2(shot.origin.x(), shot.origin.y()),
            to: to_vec2(shot.target.x(), shot.target.y()),
            color: SHOT_COLOR.with_alpha(fade(shot.time_to_live, shot_time_to_live)),
        }));
    }
}

fn to_vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn hit_points_label(hit_points: f32) -> u32 {
    hit_points.ceil().max(0.0) as u32
}

fn fade(remaining: Duration, lifetime: Duration) -> f32 {
    if lifetime.is_zero() {
        return 1.0;
    }
    (remaining.as_secs_f32() / lifetime.as_secs_f32()).clamp(0.0, 1.0)
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting AI-Mon Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene);
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// The field must have a positive, finite size to be drawn.
    #[error("field size must be positive (received {width}x{height})")]
    InvalidFieldSize {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
}
