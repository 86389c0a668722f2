#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects one target per turret from world snapshots.

use aimon_defence_core::{EnemyId, EnemyView, FieldPoint, TurretTarget, TurretView};

/// Turret targeting system that reuses a scratch buffer to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TurretTargeting {
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TurretTargeting {
    /// Creates a new turret targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes turret targets for the provided world snapshot.
    ///
    /// Each turret selects the first enemy, in spawn order, whose Euclidean
    /// distance from the turret is within the turret kind's range. There is no
    /// nearest-enemy or weakest-enemy preference. The output buffer is cleared
    /// before populating it with the latest assignments.
    pub fn handle(&mut self, turrets: &TurretView, enemies: &EnemyView, out: &mut Vec<TurretTarget>) {
        out.clear();

        if turrets.is_empty() || enemies.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);

        for turret in turrets.iter() {
            let selected = self
                .enemy_workspace
                .iter()
                .find(|candidate| turret.kind.reaches(turret.position, candidate.position));

            if let Some(candidate) = selected {
                out.push(TurretTarget {
                    turret: turret.id,
                    enemy: candidate.id,
                    turret_position: turret.position,
                    enemy_position: candidate.position,
                });
            }
        }
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.reserve(enemies.len());

        for snapshot in enemies.iter() {
            self.enemy_workspace.push(EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: FieldPoint,
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use aimon_defence_core::{EnemySnapshot, TurretId, TurretKind, TurretSnapshot};

    fn kind(range: f32) -> Arc<TurretKind> {
        Arc::new(TurretKind::new("Probe", 5, 8.0, range).expect("valid kind"))
    }

    fn turret(id: u32, x: f32, y: f32, range: f32) -> TurretSnapshot {
        TurretSnapshot {
            id: TurretId::new(id),
            kind: kind(range),
            position: FieldPoint::new(x, y),
            cooldown: Duration::ZERO,
        }
    }

    fn enemy(id: u32, x: f32, y: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: FieldPoint::new(x, y),
            hit_points: 100.0,
            speed: 40.0,
        }
    }

    #[test]
    fn targets_enemy_within_range() {
        let mut system = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![turret(1, 100.0, 200.0, 120.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(2, 100.0, 300.0)]);

        let mut out = Vec::new();
        system.handle(&turrets, &enemies, &mut out);

        assert_eq!(
            out,
            vec![TurretTarget {
                turret: TurretId::new(1),
                enemy: EnemyId::new(2),
                turret_position: FieldPoint::new(100.0, 200.0),
                enemy_position: FieldPoint::new(100.0, 300.0),
            }]
        );
    }

    #[test]
    fn enemy_outside_range_is_ignored() {
        let mut system = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![turret(1, 100.0, 150.0, 120.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(2, 100.0, 300.0)]);

        let mut out = Vec::new();
        system.handle(&turrets, &enemies, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn first_spawned_enemy_wins_over_nearer_one() {
        let mut system = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![turret(1, 300.0, 250.0, 120.0)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(9, 300.0, 300.0),
            enemy(3, 220.0, 300.0),
        ]);

        let mut out = Vec::new();
        system.handle(&turrets, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(3));
    }

    #[test]
    fn range_check_is_circular_not_axis_aligned() {
        let mut system = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![turret(1, 0.0, 0.0, 100.0)]);
        let corner = EnemyView::from_snapshots(vec![enemy(1, 90.0, 90.0)]);

        let mut out = Vec::new();
        system.handle(&turrets, &corner, &mut out);
        assert!(out.is_empty(), "diagonal beyond radius must be ignored");
    }

    #[test]
    fn every_turret_picks_at_most_one_target() {
        let mut system = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![
            turret(1, 100.0, 280.0, 120.0),
            turret(2, 600.0, 280.0, 120.0),
        ]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(1, 80.0, 300.0),
            enemy(2, 120.0, 300.0),
            enemy(3, 580.0, 300.0),
        ]);

        let mut out = Vec::new();
        system.handle(&turrets, &enemies, &mut out);

        let pairs: Vec<_> = out
            .iter()
            .map(|target| (target.turret.get(), target.enemy.get()))
            .collect();
        assert_eq!(pairs, vec![(1, 1), (2, 3)]);
    }

    #[test]
    fn empty_collections_clear_output() {
        let mut system = TurretTargeting::new();
        let mut out = vec![TurretTarget {
            turret: TurretId::new(99),
            enemy: EnemyId::new(99),
            turret_position: FieldPoint::new(0.0, 0.0),
            enemy_position: FieldPoint::new(0.0, 0.0),
        }];

        system.handle(
            &TurretView::default(),
            &EnemyView::from_snapshots(vec![enemy(1, 0.0, 0.0)]),
            &mut out,
        );
        assert!(out.is_empty());

        system.handle(
            &TurretView::from_snapshots(vec![turret(1, 0.0, 0.0, 50.0)]),
            &EnemyView::default(),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
