use std::time::Duration;

use aimon_defence_core::{
    Command, EnemyId, EnemyTemplate, Event, FieldPoint, RemovalCause, TurretId, LANE_Y,
};
use aimon_defence_system_pruning::Pruning;
use aimon_defence_world::{self as world, query, World};

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn prune(world: &mut World, dt: Duration) -> Vec<Event> {
    let tick = apply_all(world, vec![Command::Tick { dt }]);
    let mut commands = Vec::new();
    Pruning::new().handle(&tick, &query::enemy_view(world), &mut commands);
    apply_all(world, commands)
}

fn armed_world(hit_points: f32) -> World {
    let mut world = World::new();
    let _ = apply_all(
        &mut world,
        vec![
            Command::SpawnEnemy {
                position: FieldPoint::new(100.0, LANE_Y),
                template: EnemyTemplate::new(hit_points, 0.0).expect("valid template"),
            },
            Command::PlaceTurret {
                kind: "Bulbasaur".to_owned(),
                position: FieldPoint::new(100.0, LANE_Y - 100.0),
            },
            Command::FireTurret {
                turret: TurretId::new(0),
                enemy: EnemyId::new(0),
            },
        ],
    );
    world
}

#[test]
fn killed_enemy_is_removed_and_shot_outlives_it() {
    let mut world = armed_world(40.0);

    let events = prune(&mut world, Duration::ZERO);

    assert_eq!(
        events,
        vec![Event::EnemyRemoved {
            enemy: EnemyId::new(0),
            cause: RemovalCause::Killed,
        }]
    );
    assert!(query::enemy_view(&world).is_empty());
    assert_eq!(query::shot_view(&world).len(), 1);
}

#[test]
fn wounded_enemy_is_kept_while_shot_expires() {
    let mut world = armed_world(40.01);

    let events = prune(&mut world, Duration::from_millis(100));

    assert_eq!(query::enemy_view(&world).len(), 1);
    assert!(query::shot_view(&world).is_empty());
    assert!(events.iter().any(|event| matches!(event, Event::ShotExpired { .. })));
}
