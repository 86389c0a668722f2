//! Authoritative turret state management utilities.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use aimon_defence_core::{FieldPoint, TurretId, TurretKind, TurretSnapshot};

/// State of a turret stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TurretState {
    /// Identifier allocated by the world for the turret.
    pub(crate) id: TurretId,
    /// Shared kind definition.
    pub(crate) kind: Arc<TurretKind>,
    /// Fixed location of the turret.
    pub(crate) position: FieldPoint,
    /// Time left before the turret may fire again.
    pub(crate) cooldown: Duration,
}

impl TurretState {
    pub(crate) fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }

    pub(crate) fn snapshot(&self) -> TurretSnapshot {
        TurretSnapshot {
            id: self.id,
            kind: Arc::clone(&self.kind),
            position: self.position,
            cooldown: self.cooldown,
        }
    }
}

/// Registry that stores turrets and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TurretRegistry {
    entries: BTreeMap<TurretId, TurretState>,
    next_turret_id: TurretId,
}

impl TurretRegistry {
    /// Creates an empty turret registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_turret_id: TurretId::new(0),
        }
    }

    /// Stores a new, immediately ready turret and returns its identifier.
    pub(crate) fn insert(&mut self, kind: Arc<TurretKind>, position: FieldPoint) -> TurretId {
        let id = self.next_turret_id;
        self.next_turret_id = TurretId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            TurretState {
                id,
                kind,
                position,
                cooldown: Duration::ZERO,
            },
        );
        id
    }

    pub(crate) fn get_mut(&mut self, id: TurretId) -> Option<&mut TurretState> {
        self.entries.get_mut(&id)
    }

    /// Ages every cooldown by `dt`, saturating at zero.
    pub(crate) fn cool_down(&mut self, dt: Duration) {
        for turret in self.entries.values_mut() {
            turret.cooldown = turret.cooldown.saturating_sub(dt);
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TurretState> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
