//! Headless backend that steps a fixed number of frames and logs each scene.

use std::{collections::BTreeMap, fmt::Write as _, time::Duration};

use aimon_defence_rendering::{
    FrameInput, PlacementRequest, Presentation, RenderingBackend, Scene,
};
use anyhow::Result;
use tracing::{debug, info};

/// Rendering backend that reports scenes through the log instead of a window.
#[derive(Debug)]
pub(crate) struct TextBackend {
    frames: u64,
    frame_duration: Duration,
    schedule: BTreeMap<u64, Vec<PlacementRequest>>,
}

impl TextBackend {
    pub(crate) fn new(
        frames: u64,
        frame_duration: Duration,
        schedule: BTreeMap<u64, Vec<PlacementRequest>>,
    ) -> Self {
        Self {
            frames,
            frame_duration,
            schedule,
        }
    }
}

impl RenderingBackend for TextBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene),
    {
        let Self {
            frames,
            frame_duration,
            mut schedule,
        } = self;
        let Presentation {
            window_title,
            scene,
            ..
        } = presentation;
        let mut scene = scene;

        info!(title = %window_title, frames, "headless session started");

        for frame in 0..frames {
            let placements = schedule.remove(&frame).unwrap_or_default();
            update_scene(frame_duration, FrameInput { frame, placements }, &mut scene);

            info!(
                frame,
                turrets = scene.turrets.len(),
                enemies = scene.enemies.len(),
                shots = scene.shots.len(),
                "frame rendered"
            );
            debug!(frame, "{}", describe(&scene));
        }

        if !schedule.is_empty() {
            info!(
                skipped = schedule.values().map(Vec::len).sum::<usize>(),
                "placements scheduled after the final frame were not applied"
            );
        }

        Ok(())
    }
}

fn describe(scene: &Scene) -> String {
    let mut line = String::new();
    for turret in &scene.turrets {
        let centre = turret.origin + turret.size / 2.0;
        let _ = write!(
            line,
            "[{} t{} ({:.0},{:.0}){}] ",
            turret.kind,
            turret.id.get(),
            centre.x,
            centre.y,
            if turret.ready { "" } else { " cooling" }
        );
    }
    for enemy in &scene.enemies {
        let _ = write!(
            line,
            "<e{} ({:.0},{:.0}) {}hp> ",
            enemy.id.get(),
            enemy.center.x,
            enemy.center.y,
            enemy.hit_points_label
        );
    }
    for shot in &scene.shots {
        let _ = write!(
            line,
            "*s{} ({:.0},{:.0})->({:.0},{:.0}) ",
            shot.id.get(),
            shot.from.x,
            shot.from.y,
            shot.to.x,
            shot.to.y
        );
    }
    line.truncate(line.trim_end().len());
    line
}
