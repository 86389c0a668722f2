#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits turret firing commands from targeting data.

use aimon_defence_core::{Command, TurretTarget, TurretView};

/// Turret combat system that queues firing commands for ready turrets.
#[derive(Debug, Default)]
pub struct TurretCombat {
    scratch: Vec<Command>,
}

impl TurretCombat {
    /// Creates a new turret combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireTurret` entries for turrets ready to fire.
    ///
    /// Turrets that are still cooling down, or that are missing from the view,
    /// are skipped; a ready turret without a target simply stays ready.
    pub fn handle(&mut self, turrets: &TurretView, targets: &[TurretTarget], out: &mut Vec<Command>) {
        if targets.is_empty() || turrets.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in targets {
            let ready = turrets
                .get(target.turret)
                .is_some_and(|snapshot| snapshot.is_ready());
            if ready {
                self.scratch.push(Command::FireTurret {
                    turret: target.turret,
                    enemy: target.enemy,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
