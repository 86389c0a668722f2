#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that advances enemies along the lane and culls escapees.

use aimon_defence_core::{elapsed_in, Command, EnemyView, Event, Field, RemovalCause};

/// Pure system that reacts to tick events and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates a new movement system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes tick events and the current enemy view to emit movement commands.
    ///
    /// Every enemy advances by `speed * dt` along the x axis. An enemy whose
    /// resulting position lies past the field width is removed instead of
    /// moved, so it is never targetable during the rest of the update.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        field: &Field,
        out: &mut Vec<Command>,
    ) {
        let Some(elapsed) = elapsed_in(events) else {
            return;
        };
        let seconds = elapsed.as_secs_f32();

        for enemy in enemies.iter() {
            let destination = enemy.position.offset_x(enemy.speed * seconds);
            if field.is_escaped(destination) {
                out.push(Command::RemoveEnemy {
                    enemy: enemy.id,
                    cause: RemovalCause::Escaped,
                });
            } else if destination != enemy.position {
                out.push(Command::MoveEnemy {
                    enemy: enemy.id,
                    position: destination,
                });
            }
        }
    }
}
