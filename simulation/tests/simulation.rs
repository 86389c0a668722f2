use std::time::Duration;

use aimon_defence_core::{EnemyId, Event, FieldPoint, RemovalCause, LANE_Y};
use aimon_defence_simulation::{Simulation, SimulationConfig};

fn simulation(source: &str) -> Simulation {
    let config = SimulationConfig::from_toml_str(source).expect("test config parses");
    Simulation::from_config(config).expect("test config is valid")
}

/// Stationary enemies entering at `x = 0` once per simulated second.
fn stationary(hit_points: f32) -> Simulation {
    simulation(&format!(
        "[spawning]\ninterval_secs = 1.0\nspeed = 0.0\nhit_points = {hit_points:?}\n"
    ))
}

fn assert_empty(simulation: &Simulation) {
    assert!(simulation.turrets().is_empty());
    assert!(simulation.enemies().is_empty());
    assert!(simulation.shots().is_empty());
}

#[test]
fn empty_simulation_stays_empty_below_spawn_interval() {
    let mut simulation = Simulation::new();
    for dt in [0, 1, 500, 1_999] {
        let mut fresh = Simulation::new();
        fresh.advance(Duration::from_millis(dt));
        assert_empty(&fresh);
    }

    simulation.advance(Duration::ZERO);
    simulation.advance(Duration::from_millis(1_500));
    assert_empty(&simulation);
}

#[test]
fn empty_simulation_stays_empty_with_spawning_disabled() {
    let mut simulation = simulation("[spawning]\ninterval_secs = 0.0\n");
    for dt in [0, 100, 2_000, 60_000] {
        simulation.advance(Duration::from_millis(dt));
        assert_empty(&simulation);
    }
}

#[test]
fn first_spawn_happens_once_two_seconds_accumulate() {
    let mut simulation = Simulation::new();
    for _ in 0..19 {
        simulation.advance(Duration::from_millis(100));
    }
    assert!(simulation.enemies().is_empty(), "1.9 s must not spawn");

    simulation.advance(Duration::from_millis(100));
    let enemies = simulation.enemies().into_vec();
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].id, EnemyId::new(0));
    assert_eq!(enemies[0].hit_points, 100.0);
    assert!(simulation
        .frame_events()
        .iter()
        .any(|event| matches!(event, Event::EnemySpawned { .. })));
}

#[test]
fn large_step_spawns_a_single_enemy() {
    let mut simulation = Simulation::new();
    simulation.advance(Duration::from_secs(7));

    assert_eq!(simulation.enemies().len(), 1);
}

#[test]
fn enemy_crossing_the_edge_is_removed_in_the_same_update() {
    let mut simulation = simulation("[spawning]\ninterval_secs = 1.0\nentry_x = 790.0\n");

    simulation.advance(Duration::from_secs(1));

    assert!(simulation.enemies().is_empty());
    assert!(simulation.frame_events().contains(&Event::EnemyRemoved {
        enemy: EnemyId::new(0),
        cause: RemovalCause::Escaped,
    }));

    simulation.advance(Duration::from_millis(500));
    assert!(simulation
        .enemies()
        .iter()
        .all(|enemy| enemy.id != EnemyId::new(0)));
}

#[test]
fn escaped_enemy_is_never_targeted() {
    let mut simulation = simulation("[spawning]\ninterval_secs = 1.0\nentry_x = 790.0\n");
    let _ = simulation
        .place_turret(820.0, LANE_Y, "Charmander")
        .expect("reference kind");

    simulation.advance(Duration::from_secs(1));

    assert!(simulation.shots().is_empty());
    assert!(simulation.turrets().iter().all(|turret| turret.is_ready()));
}

#[test]
fn turret_in_range_damages_enemy_and_starts_cooldown() {
    let mut simulation = stationary(100.0);
    simulation.advance(Duration::from_secs(1));
    let turret = simulation
        .place_turret(0.0, LANE_Y - 100.0, "Bulbasaur")
        .expect("reference kind");

    simulation.advance(Duration::ZERO);

    let enemies = simulation.enemies().into_vec();
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].hit_points, 60.0);

    let turrets = simulation.turrets();
    let snapshot = turrets.get(turret).expect("placed turret");
    assert_eq!(snapshot.cooldown, Duration::from_millis(800));

    let shots = simulation.shots().into_vec();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].time_to_live, Duration::from_millis(100));
    assert_eq!(shots[0].origin, FieldPoint::new(0.0, LANE_Y - 100.0));
    assert_eq!(shots[0].target, FieldPoint::new(0.0, LANE_Y));
}

#[test]
fn shot_expires_after_its_lifetime() {
    let mut simulation = stationary(100.0);
    simulation.advance(Duration::from_secs(1));
    let _ = simulation
        .place_turret(0.0, LANE_Y - 100.0, "Bulbasaur")
        .expect("reference kind");
    simulation.advance(Duration::ZERO);
    assert_eq!(simulation.shots().len(), 1);

    simulation.advance(Duration::from_millis(100));

    assert!(simulation.shots().is_empty());
    assert!(simulation
        .frame_events()
        .iter()
        .any(|event| matches!(event, Event::ShotExpired { .. })));
}

#[test]
fn turret_out_of_range_holds_fire() {
    let mut simulation = stationary(100.0);
    simulation.advance(Duration::from_secs(1));
    let turret = simulation
        .place_turret(0.0, LANE_Y - 150.0, "Bulbasaur")
        .expect("reference kind");

    simulation.advance(Duration::ZERO);

    assert_eq!(simulation.enemies().into_vec()[0].hit_points, 100.0);
    assert!(simulation.shots().is_empty());
    assert!(simulation
        .turrets()
        .get(turret)
        .expect("placed turret")
        .is_ready());
}

#[test]
fn enemy_at_exactly_zero_hit_points_is_pruned() {
    let mut simulation = stationary(40.0);
    simulation.advance(Duration::from_secs(1));
    let _ = simulation
        .place_turret(0.0, LANE_Y - 100.0, "Bulbasaur")
        .expect("reference kind");

    simulation.advance(Duration::ZERO);

    assert!(simulation.enemies().is_empty());
    assert!(simulation.frame_events().contains(&Event::EnemyRemoved {
        enemy: EnemyId::new(0),
        cause: RemovalCause::Killed,
    }));
    assert_eq!(simulation.shots().len(), 1, "the killing shot stays visible");
}

#[test]
fn enemy_with_remaining_hit_points_survives_until_next_hit() {
    let mut simulation = stationary(40.01);
    simulation.advance(Duration::from_secs(1));
    let _ = simulation
        .place_turret(0.0, LANE_Y - 100.0, "Bulbasaur")
        .expect("reference kind");

    simulation.advance(Duration::ZERO);
    let survivor = simulation.enemies().into_vec();
    assert_eq!(survivor.len(), 1);
    assert!(survivor[0].hit_points > 0.0);

    simulation.advance(Duration::from_millis(800));
    assert!(simulation
        .enemies()
        .iter()
        .all(|enemy| enemy.id != EnemyId::new(0)));
}

#[test]
fn overlapping_turrets_may_overkill_the_same_enemy() {
    let mut simulation = stationary(100.0);
    simulation.advance(Duration::from_secs(1));
    for kind in ["Charmander", "Charmander", "Squirtle"] {
        let _ = simulation
            .place_turret(0.0, LANE_Y - 50.0, kind)
            .expect("reference kind");
    }

    simulation.advance(Duration::ZERO);

    let fired = simulation
        .frame_events()
        .iter()
        .filter(|event| matches!(event, Event::TurretFired { .. }))
        .count();
    assert_eq!(fired, 3);
    assert!(simulation.enemies().is_empty());
    assert_eq!(simulation.shots().len(), 3);
}

#[test]
fn unknown_kind_is_rejected_without_side_effects() {
    let mut simulation = Simulation::new();
    let _ = simulation
        .place_turret(100.0, 100.0, "Squirtle")
        .expect("reference kind");
    let before = simulation.turrets().len();

    let error = simulation
        .place_turret(200.0, 200.0, "Nonexistent")
        .expect_err("unknown kind");

    assert_eq!(error.name(), "Nonexistent");
    assert_eq!(simulation.turrets().len(), before);
}

#[test]
fn kind_names_are_case_sensitive() {
    let mut simulation = Simulation::new();
    assert!(simulation.place_turret(0.0, 0.0, "bulbasaur").is_err());
    assert!(simulation.turrets().is_empty());
}

#[test]
fn placement_survives_an_idle_update_unchanged() {
    let mut simulation = Simulation::new();
    let turret = simulation
        .place_turret(-50.0, 900.0, "Charmander")
        .expect("placement is unconditional");

    simulation.advance(Duration::ZERO);

    let turrets = simulation.turrets();
    let snapshot = turrets.get(turret).expect("placed turret");
    assert_eq!(snapshot.position, FieldPoint::new(-50.0, 900.0));
    assert_eq!(snapshot.kind.name(), "Charmander");
    assert_eq!(snapshot.cooldown, Duration::ZERO);
}
