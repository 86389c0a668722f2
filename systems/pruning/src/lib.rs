#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Lifecycle pruning system that discards dead enemies and expired shots.

use aimon_defence_core::{elapsed_in, Command, EnemyView, Event, RemovalCause};

/// Pure system that runs after combat to retire entities.
#[derive(Debug, Default)]
pub struct Pruning;

impl Pruning {
    /// Creates a new pruning system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits removal commands for dead enemies and an aging command for shots.
    ///
    /// Enemies with zero or fewer hit points are removed. Shots are aged by the
    /// tick's elapsed time, which also covers shots fired earlier in the same
    /// update. Nothing is emitted when no tick was observed.
    pub fn handle(&mut self, events: &[Event], enemies: &EnemyView, out: &mut Vec<Command>) {
        let Some(elapsed) = elapsed_in(events) else {
            return;
        };

        for enemy in enemies.iter().filter(|enemy| enemy.is_dead()) {
            out.push(Command::RemoveEnemy {
                enemy: enemy.id,
                cause: RemovalCause::Killed,
            });
        }

        out.push(Command::AgeShots { dt: elapsed });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use aimon_defence_core::{EnemyId, EnemySnapshot, FieldPoint, LANE_Y};

    fn enemy(id: u32, hit_points: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: FieldPoint::new(0.0, LANE_Y),
            hit_points,
            speed: 40.0,
        }
    }

    #[test]
    fn removes_only_enemies_at_or_below_zero() {
        let mut pruning = Pruning::new();
        let view = EnemyView::from_snapshots(vec![
            enemy(0, 0.0),
            enemy(1, 0.01),
            enemy(2, -15.0),
        ]);
        let mut out = Vec::new();

        pruning.handle(
            &[Event::TimeAdvanced { dt: Duration::ZERO }],
            &view,
            &mut out,
        );

        assert_eq!(
            out,
            vec![
                Command::RemoveEnemy {
                    enemy: EnemyId::new(0),
                    cause: RemovalCause::Killed,
                },
                Command::RemoveEnemy {
                    enemy: EnemyId::new(2),
                    cause: RemovalCause::Killed,
                },
                Command::AgeShots { dt: Duration::ZERO },
            ]
        );
    }

    #[test]
    fn silent_without_tick_events() {
        let mut pruning = Pruning::new();
        let view = EnemyView::from_snapshots(vec![enemy(0, 0.0)]);
        let mut out = Vec::new();

        pruning.handle(&[], &view, &mut out);

        assert!(out.is_empty());
    }
}
