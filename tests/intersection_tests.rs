//! Round-robin light controller tests

use intersection_sim::simulation::{
    Direction, Intersection, Lane, LightValue, Release, SerialCounter, SimError, TwoWayRoad,
    Vehicle,
};

fn road(name: &str, green_time: u32) -> TwoWayRoad {
    TwoWayRoad::new(name, green_time).expect("valid road")
}

/// Put `per_lane` vehicles in every lane of every road
fn fill(intersection: &mut Intersection, serials: &mut SerialCounter, per_lane: usize) {
    for road_index in 0..intersection.num_roads() {
        for direction in Direction::ALL {
            for lane in Lane::ALL {
                for _ in 0..per_lane {
                    let vehicle = serials.issue(1).unwrap();
                    intersection
                        .enqueue_vehicle(road_index, direction, lane, vehicle)
                        .unwrap();
                }
            }
        }
    }
}

fn ids(vehicles: &[Vehicle]) -> Vec<u64> {
    vehicles.iter().map(|v| v.serial_id().0).collect()
}

#[test]
fn test_construction_limits() {
    assert!(matches!(
        Intersection::new(Vec::new()),
        Err(SimError::InvalidArgument(_))
    ));

    let five = (0..5).map(|i| road(&format!("R{i}"), 3)).collect();
    assert!(Intersection::new(five).is_err());

    let four = (0..4).map(|i| road(&format!("R{i}"), 3)).collect();
    let intersection = Intersection::new(four).unwrap();
    assert_eq!(intersection.num_roads(), 4);
}

#[test]
fn test_missing_road_slot_is_rejected() {
    let slots = vec![Some(road("A", 3)), None, Some(road("C", 3))];
    assert!(matches!(
        Intersection::from_slots(slots),
        Err(SimError::InvalidArgument(_))
    ));

    let slots = vec![Some(road("A", 3)), Some(road("B", 5))];
    let intersection = Intersection::from_slots(slots).unwrap();
    assert_eq!(intersection.num_roads(), 2);
}

#[test]
fn test_initial_state() {
    let intersection = Intersection::new(vec![road("A", 4), road("B", 6)]).unwrap();
    assert_eq!(intersection.active_road_index(), 0);
    assert_eq!(intersection.active_countdown(), 4);
    assert_eq!(intersection.active_light_phase(), LightValue::Red);
    assert!(intersection.all_roads_empty());
}

#[test]
fn test_enqueue_rejects_out_of_range_indices() {
    let mut serials = SerialCounter::new();
    let mut intersection = Intersection::new(vec![road("A", 4), road("B", 6)]).unwrap();

    let result = intersection.enqueue_vehicle(2, Direction::Forward, Lane::Left, serials.issue(1).unwrap());
    assert!(matches!(result, Err(SimError::InvalidArgument(_))));
    assert!(intersection.enqueue_vehicle_at(0, 2, 0, serials.issue(1).unwrap()).is_err());
    assert!(intersection.enqueue_vehicle_at(0, 0, 3, serials.issue(1).unwrap()).is_err());
    assert!(intersection.all_roads_empty(), "rejected enqueues must have no effect");

    intersection
        .enqueue_vehicle_at(1, 1, 2, serials.issue(1).unwrap())
        .unwrap();
    let b = intersection.road(1).unwrap();
    assert_eq!(b.lane(Direction::Backward, Lane::Right).len(), 1);
    assert!(!intersection.all_roads_empty());
}

#[test]
fn test_single_empty_road_consumes_one_step() {
    let mut intersection = Intersection::new(vec![road("A", 5)]).unwrap();

    assert_eq!(intersection.step().unwrap(), Release::Idle);
    assert_eq!(intersection.active_road_index(), 0);
    assert_eq!(intersection.active_countdown(), 4);

    assert_eq!(intersection.step().unwrap(), Release::Idle);
    assert_eq!(intersection.active_countdown(), 3);
}

#[test]
fn test_exhausted_idle_slice_restarts_on_same_road() {
    let mut intersection = Intersection::new(vec![road("A", 1)]).unwrap();

    assert_eq!(intersection.step().unwrap(), Release::Idle);
    assert_eq!(intersection.active_countdown(), 0);

    assert_eq!(intersection.step().unwrap(), Release::Idle);
    assert_eq!(intersection.active_road_index(), 0);
    assert_eq!(intersection.active_countdown(), 0);
}

#[test]
fn test_hand_off_after_full_slice() {
    let mut serials = SerialCounter::new();
    let mut intersection = Intersection::new(vec![road("A", 4), road("B", 6)]).unwrap();
    fill(&mut intersection, &mut serials, 10);

    for expected_countdown in [3, 2, 1, 0] {
        let release = intersection.step().unwrap();
        assert!(!release.is_idle());
        assert_eq!(intersection.active_road_index(), 0);
        assert_eq!(intersection.active_countdown(), expected_countdown);
    }

    let release = intersection.step().unwrap();
    assert_eq!(intersection.active_road_index(), 1);
    assert_eq!(intersection.active_countdown(), 5, "fresh budget of 6, one step used");
    assert_eq!(release.vehicles().len(), 4);
    assert_eq!(intersection.active_light_phase(), LightValue::Green);
}

#[test]
fn test_slice_ends_with_left_signal() {
    let mut serials = SerialCounter::new();
    let mut intersection = Intersection::new(vec![road("A", 3)]).unwrap();
    fill(&mut intersection, &mut serials, 10);

    assert_eq!(intersection.step().unwrap().vehicles().len(), 4);
    assert_eq!(intersection.active_light_phase(), LightValue::Green);
    assert_eq!(intersection.step().unwrap().vehicles().len(), 4);

    // timer 1 falls in the left-signal window and is the last step
    assert_eq!(intersection.step().unwrap().vehicles().len(), 2);
    assert_eq!(intersection.active_light_phase(), LightValue::Red);
    assert_eq!(intersection.active_countdown(), 0);
}

#[test]
fn test_round_robin_visits_roads_in_order() {
    let mut serials = SerialCounter::new();
    let mut intersection =
        Intersection::new(vec![road("A", 2), road("B", 3), road("C", 1)]).unwrap();
    fill(&mut intersection, &mut serials, 20);

    let mut active = Vec::new();
    for _ in 0..12 {
        let release = intersection.step().unwrap();
        assert!(!release.is_idle());
        active.push(intersection.active_road_index());
    }
    assert_eq!(active, vec![0, 0, 1, 1, 1, 2, 0, 0, 1, 1, 1, 2]);
}

#[test]
fn test_idle_road_is_skipped() {
    let mut serials = SerialCounter::new();
    let mut intersection = Intersection::new(vec![road("A", 3), road("B", 3)]).unwrap();
    intersection
        .enqueue_vehicle(1, Direction::Forward, Lane::Middle, serials.issue(1).unwrap())
        .unwrap();

    let release = intersection.step().unwrap();
    assert_eq!(ids(release.vehicles()), vec![1]);
    assert_eq!(intersection.active_road_index(), 1);
    assert_eq!(intersection.active_countdown(), 2);
    assert_eq!(intersection.road(0).unwrap().light_value(), LightValue::Red);

    // Nothing left anywhere: the search comes back to B and still costs a step
    assert_eq!(intersection.step().unwrap(), Release::Idle);
    assert_eq!(intersection.active_road_index(), 1);
    assert_eq!(intersection.active_countdown(), 1);
}

#[test]
fn test_skip_wraps_around_to_earlier_road() {
    let mut serials = SerialCounter::new();
    let mut intersection =
        Intersection::new(vec![road("A", 3), road("B", 4), road("C", 5)]).unwrap();

    // Use up A's slice on an empty intersection so the light moves to B
    for _ in 0..4 {
        assert_eq!(intersection.step().unwrap(), Release::Idle);
    }
    assert_eq!(intersection.active_road_index(), 1);
    assert_eq!(intersection.active_countdown(), 3);

    intersection
        .enqueue_vehicle(0, Direction::Backward, Lane::Left, serials.issue(1).unwrap())
        .unwrap();

    let release = intersection.step().unwrap();
    assert_eq!(ids(release.vehicles()), vec![1]);
    assert_eq!(intersection.active_road_index(), 0);
    assert_eq!(intersection.active_countdown(), 2);
    assert_eq!(intersection.active_light_phase(), LightValue::LeftSignal);
}

#[test]
fn test_every_vehicle_leaves_in_lane_order() {
    let mut serials = SerialCounter::new();
    let mut intersection = Intersection::new(vec![road("A", 4), road("B", 5)]).unwrap();
    fill(&mut intersection, &mut serials, 3);

    let mut released = Vec::new();
    let mut steps = 0;
    while !intersection.all_roads_empty() {
        released.extend(intersection.step().unwrap().into_vehicles());
        steps += 1;
        assert!(steps < 1000, "intersection failed to drain");
    }

    assert_eq!(released.len(), 36);
    let mut sorted = ids(&released);
    sorted.sort_unstable();
    assert_eq!(sorted, (1..=36).collect::<Vec<_>>());

    // Lane k of the fill holds ids 3k+1..3k+3; each must leave in that order
    for lane_start in (1..=36).step_by(3) {
        let order: Vec<u64> = ids(&released)
            .into_iter()
            .filter(|id| (lane_start..lane_start + 3).contains(id))
            .collect();
        assert_eq!(order, vec![lane_start, lane_start + 1, lane_start + 2]);
    }
}

#[test]
fn test_left_window_idles_until_next_slice() {
    let mut serials = SerialCounter::new();
    let mut intersection = Intersection::new(vec![road("A", 3), road("B", 3)]).unwrap();
    for _ in 0..3 {
        intersection
            .enqueue_vehicle(0, Direction::Forward, Lane::Middle, serials.issue(1).unwrap())
            .unwrap();
    }

    assert_eq!(ids(intersection.step().unwrap().vehicles()), vec![1]);
    assert_eq!(intersection.active_countdown(), 2);
    assert_eq!(ids(intersection.step().unwrap().vehicles()), vec![2]);
    assert_eq!(intersection.active_countdown(), 1);

    // Last step of A's slice is in the left window and A has no left traffic
    assert_eq!(intersection.step().unwrap(), Release::Idle);
    assert_eq!(intersection.active_road_index(), 0);
    assert_eq!(intersection.active_countdown(), 0);
    assert_eq!(intersection.waiting_count(), 1);

    // B is empty, so the light comes back to A with a fresh slice
    assert_eq!(ids(intersection.step().unwrap().vehicles()), vec![3]);
    assert_eq!(intersection.active_road_index(), 0);
    assert_eq!(intersection.active_countdown(), 2);
    assert!(intersection.all_roads_empty());
}
