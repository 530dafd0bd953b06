//! Engine-level property tests
//!
//! Queueing, release scheduling, kinematics, and collision detection,
//! exercised directly through the library API.

use anyhow::Result;

use junction_sim::simulation::{
    angle_between, scan_collisions, CarId, Direction, Geometry, LaneSlot, LightAxis, LightPolicy,
    LightState, QueueStore, SimCar, SimWorld, TrafficGenerator, TurnPhase, Vec2, CAR_SPEED,
};

/// Policy returning the same state every tick
struct ConstantPolicy(LightState);

impl LightPolicy for ConstantPolicy {
    fn decide(&mut self, _tick: u64, _queues: &QueueStore) -> LightState {
        self.0
    }
}

/// Generator that never spawns
struct NoTraffic;

impl TrafficGenerator for NoTraffic {
    fn spawn(&mut self, _tick: u64, _queues: &mut QueueStore, _geometry: &Geometry) -> Result<()> {
        Ok(())
    }
}

fn quiet_world(light: LightState) -> SimWorld {
    SimWorld::new(
        Geometry::standard(),
        Box::new(ConstantPolicy(light)),
        Box::new(NoTraffic),
    )
}

fn ns_left() -> LightState {
    LightState::new(LightAxis::NorthSouth, TurnPhase::Left)
}

fn ns_straight() -> LightState {
    LightState::new(LightAxis::NorthSouth, TurnPhase::Straight)
}

#[test]
fn fifo_release_order() {
    let mut world = quiet_world(ns_left());
    let first = world
        .queues
        .spawn(Direction::North, LaneSlot::Left, &world.geometry)
        .unwrap();
    let second = world
        .queues
        .spawn(Direction::North, LaneSlot::Left, &world.geometry)
        .unwrap();
    let third = world
        .queues
        .spawn(Direction::North, LaneSlot::Left, &world.geometry)
        .unwrap();

    let summary = world.step();
    assert_eq!(summary.released, 1);
    assert_eq!(world.active[0].id, first);
    assert_eq!(world.queues.lane_len(Direction::North, LaneSlot::Left), 2);

    let summary = world.step();
    assert_eq!(summary.released, 1);
    assert_eq!(world.active[1].id, second);

    let summary = world.step();
    assert_eq!(summary.released, 1);
    assert_eq!(world.active[2].id, third);
    assert_eq!(world.queues.lane_len(Direction::North, LaneSlot::Left), 0);
}

#[test]
fn release_cap_straight_phase() {
    let mut world = quiet_world(ns_straight());
    for direction in Direction::ALL {
        for lane in LaneSlot::SPAWN {
            for _ in 0..3 {
                world.queues.spawn(direction, lane, &world.geometry).unwrap();
            }
        }
    }

    let summary = world.step();

    // One car per matching lane, both NS directions
    assert_eq!(summary.released, 4);
    assert_eq!(world.active_count(), 4);
    for direction in [Direction::North, Direction::South] {
        assert_eq!(world.queues.lane_len(direction, LaneSlot::StraightForward), 2);
        assert_eq!(world.queues.lane_len(direction, LaneSlot::Right), 2);
        assert_eq!(world.queues.lane_len(direction, LaneSlot::Left), 3);
    }
    // The red axis makes zero progress
    for direction in [Direction::East, Direction::West] {
        for lane in LaneSlot::SPAWN {
            assert_eq!(world.queues.lane_len(direction, lane), 3);
        }
    }
}

#[test]
fn release_cap_left_phase() {
    let mut world = quiet_world(ns_left());
    for direction in Direction::ALL {
        for lane in LaneSlot::SPAWN {
            for _ in 0..2 {
                world.queues.spawn(direction, lane, &world.geometry).unwrap();
            }
        }
    }

    let summary = world.step();

    assert_eq!(summary.released, 2);
    for direction in [Direction::North, Direction::South] {
        assert_eq!(world.queues.lane_len(direction, LaneSlot::Left), 1);
        assert_eq!(world.queues.lane_len(direction, LaneSlot::StraightForward), 2);
        assert_eq!(world.queues.lane_len(direction, LaneSlot::Right), 2);
    }
    for direction in [Direction::East, Direction::West] {
        for lane in LaneSlot::SPAWN {
            assert_eq!(world.queues.lane_len(direction, lane), 2);
        }
    }
}

#[test]
fn empty_queues_release_nothing() {
    let mut world = quiet_world(ns_straight());
    let summary = world.step();
    assert_eq!(summary.released, 0);
    assert_eq!(world.active_count(), 0);
    assert_eq!(summary.exited, 0);
}

#[test]
fn kinematics_terminates_without_overshoot() {
    let geometry = Geometry::standard();
    let mut car = SimCar::new(CarId(0), Direction::North, LaneSlot::Left, &geometry).unwrap();
    let target = geometry.position(Direction::West, LaneSlot::StraightBack);
    let distance = car.position.distance(&target);
    let expected_steps = (distance / CAR_SPEED).ceil() as u32;

    let mut steps = 0;
    while !car.finished {
        car.advance(&geometry, CAR_SPEED);
        steps += 1;
        assert!(steps <= expected_steps, "car overshot its exit coordinate");
    }

    assert_eq!(steps, expected_steps);
    assert_eq!(car.position.x, target.x);
    assert_eq!(car.position.y, target.y);
}

#[test]
fn zero_distance_finishes_in_place() {
    let geometry = Geometry::standard();
    let mut car = SimCar::new(CarId(0), Direction::North, LaneSlot::Left, &geometry).unwrap();
    let target = geometry.position(car.target_direction, car.exit_lane);
    car.position = target;

    car.advance(&geometry, CAR_SPEED);

    assert!(car.finished);
    assert_eq!(car.velocity, Vec2::ZERO);
    assert_eq!(car.position.x, target.x);
    assert_eq!(car.position.y, target.y);
}

#[test]
fn car_derives_turn_and_exit_from_tables() {
    let geometry = Geometry::standard();

    let car = SimCar::new(CarId(0), Direction::North, LaneSlot::Left, &geometry).unwrap();
    assert_eq!(car.target_direction, Direction::West);
    assert_eq!(car.exit_lane, LaneSlot::StraightBack);
    assert_eq!(car.travel_direction, Direction::South);
    assert_eq!(car.position, geometry.position(Direction::North, LaneSlot::Left));

    let car = SimCar::new(CarId(1), Direction::East, LaneSlot::Right, &geometry).unwrap();
    assert_eq!(car.target_direction, Direction::South);
    assert_eq!(car.exit_lane, LaneSlot::StraightBack2);

    assert!(SimCar::new(CarId(2), Direction::North, LaneSlot::StraightBack, &geometry).is_err());
}

fn car_at(id: usize, origin: Direction, position: Vec2, geometry: &Geometry) -> SimCar {
    let mut car = SimCar::new(CarId(id), origin, LaneSlot::StraightForward, geometry).unwrap();
    car.position = position;
    car
}

#[test]
fn collision_distance_boundary_is_strict() {
    let geometry = Geometry::standard();
    // North origin travels south, east origin travels west: 90 degrees apart
    let a = car_at(0, Direction::North, Vec2::new(0.0, 0.0), &geometry);
    let b = car_at(1, Direction::East, Vec2::new(0.3, 0.0), &geometry);
    assert_eq!(scan_collisions(&[a, b], 1), 0);

    let a = car_at(0, Direction::North, Vec2::new(0.0, 0.0), &geometry);
    let b = car_at(1, Direction::East, Vec2::new(0.29, 0.0), &geometry);
    assert_eq!(scan_collisions(&[a, b], 1), 1);
}

#[test]
fn parallel_traffic_is_never_flagged() {
    let geometry = Geometry::standard();
    let a = car_at(0, Direction::North, Vec2::new(0.0, 0.0), &geometry);
    let b = car_at(1, Direction::North, Vec2::new(0.1, 0.0), &geometry);
    assert_eq!(scan_collisions(&[a, b], 1), 0);
}

#[test]
fn opposing_traffic_is_flagged() {
    let geometry = Geometry::standard();
    let a = car_at(0, Direction::North, Vec2::new(0.0, 0.0), &geometry);
    let b = car_at(1, Direction::South, Vec2::new(0.1, 0.0), &geometry);
    assert_eq!(scan_collisions(&[a, b], 1), 1);
}

#[test]
fn collision_scan_counts_every_conflicting_pair() {
    let geometry = Geometry::standard();
    let a = car_at(0, Direction::North, Vec2::new(0.0, 0.0), &geometry);
    let b = car_at(1, Direction::East, Vec2::new(0.1, 0.0), &geometry);
    let c = car_at(2, Direction::West, Vec2::new(0.0, 0.1), &geometry);
    // a-b, a-c, and b-c all conflict
    assert_eq!(scan_collisions(&[a, b, c], 1), 3);
}

#[test]
fn heading_angles_wrap_correctly() {
    assert_eq!(angle_between(Direction::North, Direction::North), 0.0);
    assert_eq!(angle_between(Direction::North, Direction::East), 90.0);
    assert_eq!(angle_between(Direction::North, Direction::South), 180.0);
    assert_eq!(angle_between(Direction::South, Direction::East), 90.0);
    assert_eq!(angle_between(Direction::East, Direction::West), 180.0);
}

#[test]
fn conservation_holds_every_tick() {
    use junction_sim::simulation::{FixedCyclePolicy, RandomTraffic};

    let mut world = SimWorld::new(
        Geometry::standard(),
        Box::new(FixedCyclePolicy::new()),
        Box::new(RandomTraffic::with_seed(0.2, 42)),
    );

    for _ in 0..300 {
        world.step();
        let accounted =
            world.queued_count() as u64 + world.active_count() as u64 + world.exited_count();
        assert_eq!(world.spawned_count(), accounted);
    }
    assert!(world.spawned_count() > 0);
    assert!(world.exited_count() > 0);
}

fn full_tables() -> (
    Vec<(Direction, LaneSlot, Vec2)>,
    Vec<(Direction, LaneSlot, Direction)>,
) {
    let mut positions = Vec::new();
    for direction in Direction::ALL {
        for lane in LaneSlot::ALL {
            positions.push((direction, lane, Vec2::new(1.0, 1.0)));
        }
    }
    let mut turns = Vec::new();
    for direction in Direction::ALL {
        for lane in LaneSlot::SPAWN {
            turns.push((direction, lane, direction.opposite()));
        }
    }
    (positions, turns)
}

#[test]
fn geometry_validation_requires_every_entry() {
    let (positions, turns) = full_tables();
    assert!(Geometry::from_tables(&positions, &turns).is_ok());

    let mut missing_coord = positions.clone();
    missing_coord.retain(|&(d, l, _)| !(d == Direction::West && l == LaneSlot::StraightBack2));
    let err = Geometry::from_tables(&missing_coord, &turns).unwrap_err();
    assert!(err.to_string().contains("missing coordinate"));

    let mut missing_turn = turns.clone();
    missing_turn.retain(|&(d, l, _)| !(d == Direction::East && l == LaneSlot::Right));
    let err = Geometry::from_tables(&positions, &missing_turn).unwrap_err();
    assert!(err.to_string().contains("missing turn target"));

    let mut extra_turn = turns.clone();
    extra_turn.push((Direction::North, LaneSlot::StraightBack, Direction::South));
    let err = Geometry::from_tables(&positions, &extra_turn).unwrap_err();
    assert!(err.to_string().contains("exit-only"));
}

#[test]
fn queue_snapshot_totals() {
    let geometry = Geometry::standard();
    let mut queues = QueueStore::new();
    queues.spawn(Direction::North, LaneSlot::Left, &geometry).unwrap();
    queues.spawn(Direction::North, LaneSlot::Left, &geometry).unwrap();
    queues.spawn(Direction::South, LaneSlot::Right, &geometry).unwrap();
    queues.spawn(Direction::East, LaneSlot::StraightForward, &geometry).unwrap();

    let snapshot = queues.snapshot();
    assert_eq!(snapshot.lane_len(Direction::North, LaneSlot::Left), 2);
    assert_eq!(snapshot.direction_total(Direction::North), 2);
    assert_eq!(snapshot.axis_total(LightAxis::NorthSouth), 3);
    assert_eq!(snapshot.axis_total(LightAxis::EastWest), 1);
    assert_eq!(snapshot.total(), 4);
    assert_eq!(snapshot.lane_len(Direction::North, LaneSlot::StraightBack), 0);
}

#[test]
fn queue_ids_are_monotonic_within_a_lane() {
    let geometry = Geometry::standard();
    let mut queues = QueueStore::new();
    for _ in 0..5 {
        for direction in Direction::ALL {
            queues.spawn(direction, LaneSlot::Right, &geometry).unwrap();
        }
    }
    for direction in Direction::ALL {
        let ids: Vec<CarId> = queues
            .lane_cars(direction, LaneSlot::Right)
            .map(|car| car.id)
            .collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}

#[test]
fn exit_only_lanes_are_never_queueable() {
    let geometry = Geometry::standard();
    let mut queues = QueueStore::new();
    assert!(queues
        .spawn(Direction::North, LaneSlot::StraightBack, &geometry)
        .is_err());
    assert!(queues
        .spawn(Direction::North, LaneSlot::StraightBack2, &geometry)
        .is_err());
    assert_eq!(queues.spawned_total(), 0);
    assert!(queues
        .pop_head(Direction::North, LaneSlot::StraightBack)
        .is_none());
}
