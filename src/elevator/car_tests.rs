/*
 * Unit tests for the elevator car
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 * Time is the logical tick passed into each call; nothing sleeps.
 *
 * Tests:
 * - test_car_init
 * - test_add_stop_*
 * - test_request_*
 * - test_advance_*
 * - test_maintenance_*
 *
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod car_tests {
    use crate::config::ElevatorConfig;
    use crate::elevator::ElevatorCar;
    use crate::shared::Behaviour::{DoorOpen, Idle, Moving, OutOfService};
    use crate::shared::Direction::{Down, Up};
    use crate::shared::DoorState::Open;
    use crate::shared::{CarEvent, ElevatorError};

    fn setup_car(door_open_ticks: u64) -> ElevatorCar {
        let config = ElevatorConfig {
            door_open_ticks,
            maintenance_trip_limit: 100,
        };
        ElevatorCar::new(0, 1, 10, &config).unwrap()
    }

    // Drive the car until its stops are empty, returning the tick reached
    fn run_until_idle(car: &mut ElevatorCar, mut now: u64) -> u64 {
        while car.has_stops() {
            now += 1;
            car.advance_toward_stops(now).unwrap();
            assert!(now < 1000, "car never finished its sweep");
        }
        now
    }

    #[test]
    fn test_car_init() {
        // Purpose: A new car waits at the bottom floor, doors open, pointing up

        // Act
        let car = setup_car(3);

        // Assert
        assert_eq!(car.floor(), 1);
        assert_eq!(car.direction(), Up);
        assert_eq!(car.door_state(), Open);
        assert_eq!(car.behaviour(), Idle);
        assert!(!car.is_occupied());
        assert!(car.is_idle());
        assert_eq!(car.trip_count(), 0);
        assert_eq!(car.total_mileage(), 0);
    }

    #[test]
    fn test_car_rejects_empty_range() {
        let config = ElevatorConfig::default();

        assert!(matches!(
            ElevatorCar::new(0, 5, 5, &config),
            Err(ElevatorError::InvalidFleet(_))
        ));
    }

    #[test]
    fn test_add_stop_out_of_range() {
        // Arrange
        let mut car = setup_car(3);

        // Act
        let result = car.add_stop(11);

        // Assert
        assert_eq!(
            result,
            Err(ElevatorError::OutOfRange {
                car: 0,
                floor: 11,
                min: 1,
                max: 10
            })
        );
        assert_eq!(car.stop_count(), 0);
    }

    #[test]
    fn test_add_stop_ignores_current_and_duplicate_floors() {
        // Arrange
        let mut car = setup_car(3);

        // Act
        let current = car.add_stop(1).unwrap();
        let first = car.add_stop(4).unwrap();
        let duplicate = car.add_stop(4).unwrap();

        // Assert
        assert!(!current);
        assert!(first);
        assert!(!duplicate);
        assert_eq!(car.stops().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_request_from_car_marks_occupied() {
        // Arrange
        let mut car = setup_car(3);

        // Act
        car.request_from_car(6, 0).unwrap();

        // Assert
        assert!(car.is_occupied());
        assert!(!car.is_idle());
        assert_eq!(car.stops().collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn test_request_from_hall_leaves_car_unoccupied() {
        // Arrange
        let mut car = setup_car(3);

        // Act
        car.request_from_hall(6, 0).unwrap();

        // Assert
        assert!(!car.is_occupied());
        assert_eq!(car.stop_count(), 1);
        assert_eq!(car.behaviour(), DoorOpen);
    }

    #[test]
    fn test_request_from_car_out_of_range_leaves_state_unchanged() {
        // Purpose: A rejected cab request must not set the occupied flag

        // Arrange
        let mut car = setup_car(3);
        let before = car.snapshot();

        // Act
        let result = car.request_from_car(0, 0);

        // Assert
        assert!(matches!(result, Err(ElevatorError::OutOfRange { floor: 0, .. })));
        assert_eq!(car.snapshot(), before);
    }

    #[test]
    fn test_request_for_current_floor_reuses_open_door() {
        // Purpose: A call at the floor the car is dwelling on restarts the dwell without a close/reopen

        // Arrange
        let mut car = setup_car(3);
        car.request_from_car(3, 0).unwrap();
        car.request_from_car(5, 0).unwrap();
        let now = {
            let mut now = 0;
            while car.floor() != 3 {
                now += 1;
                car.advance_toward_stops(now).unwrap();
            }
            now
        };
        assert_eq!(car.door_state(), Open);
        car.drain_events();

        // Act
        car.request_from_hall(3, now + 2).unwrap();

        // Assert
        assert_eq!(car.door_state(), Open);
        assert_eq!(car.dwell_deadline(), Some(now + 5));
        assert!(car.drain_events().is_empty());
        assert_eq!(car.stops().collect::<Vec<_>>(), vec![5]);

        // The restarted dwell holds the car past the original deadline
        car.advance_toward_stops(now + 3).unwrap();
        assert_eq!(car.floor(), 3);
        car.advance_toward_stops(now + 5).unwrap();
        assert_eq!(car.floor(), 4);
    }

    #[test]
    fn test_cab_press_at_current_floor_does_not_occupy() {
        // Arrange
        let mut car = setup_car(3);

        // Act
        car.request_from_car(1, 4).unwrap();

        // Assert
        assert!(!car.is_occupied());
        assert_eq!(car.stop_count(), 0);
        assert_eq!(car.dwell_deadline(), Some(7));
    }

    #[test]
    fn test_open_and_close_door_are_idempotent() {
        // Arrange
        let mut car = setup_car(3);

        // Act
        car.open_door(0);
        car.close_door(1);
        car.close_door(2);
        car.open_door(3);
        car.open_door(4);

        // Assert
        assert_eq!(
            car.drain_events(),
            vec![
                CarEvent::DoorClosed { tick: 1, car: 0, floor: 1 },
                CarEvent::DoorOpened { tick: 3, car: 0, floor: 1 },
            ]
        );
    }

    #[test]
    fn test_advance_without_stops_is_noop() {
        // Arrange
        let mut car = setup_car(0);

        // Act
        car.advance_toward_stops(1).unwrap();

        // Assert
        assert_eq!(car.floor(), 1);
        assert_eq!(car.door_state(), Open);
        assert!(car.drain_events().is_empty());
    }

    #[test]
    fn test_advance_serves_stop_and_completes_trip() {
        // Arrange
        let mut car = setup_car(0);
        car.request_from_car(4, 0).unwrap();

        // Act
        let now = run_until_idle(&mut car, 0);

        // Assert
        assert_eq!(now, 3);
        assert_eq!(car.floor(), 4);
        assert_eq!(car.door_state(), Open);
        assert!(!car.is_occupied());
        assert_eq!(car.trip_count(), 1);
        assert_eq!(car.mileage(), 3);
        assert_eq!(car.total_mileage(), 3);
        assert!(car.is_idle());

        let events = car.drain_events();
        assert_eq!(events.first(), Some(&CarEvent::DoorClosed { tick: 1, car: 0, floor: 1 }));
        assert_eq!(events.last(), Some(&CarEvent::DoorOpened { tick: 3, car: 0, floor: 4 }));
    }

    #[test]
    fn test_advance_holds_during_dwell() {
        // Arrange
        let mut car = setup_car(2);
        car.request_from_car(2, 0).unwrap();
        car.request_from_car(3, 0).unwrap();
        car.advance_toward_stops(1).unwrap();
        assert_eq!(car.floor(), 2);
        assert_eq!(car.door_state(), Open);

        // Act
        car.advance_toward_stops(2).unwrap();
        let held_floor = car.floor();
        let held_door = car.door_state();
        car.advance_toward_stops(3).unwrap();

        // Assert
        assert_eq!(held_floor, 2);
        assert_eq!(held_door, Open);
        assert_eq!(car.floor(), 3);
    }

    #[test]
    fn test_car_dwelling_with_hall_stops_left_is_idle() {
        // Purpose: Idleness depends on the open door and occupancy, not on stops still pending

        // Arrange
        let mut car = setup_car(2);
        car.request_from_hall(2, 0).unwrap();
        car.request_from_hall(3, 0).unwrap();

        // Act
        car.advance_toward_stops(1).unwrap();
        let idle_while_dwelling = car.is_idle();
        car.request_from_car(5, 1).unwrap();

        // Assert
        assert!(idle_while_dwelling);
        assert_eq!(car.behaviour(), DoorOpen);
        assert!(!car.is_idle());
        assert_eq!(car.stops().collect::<Vec<_>>(), vec![3, 5]);
    }

    #[test]
    fn test_advance_serves_stops_in_sweep_order() {
        // Purpose: Stops above are served on the way up before the car turns for stops below

        // Arrange
        let mut car = setup_car(0);
        car.test_set_position(5, Up);
        car.request_from_car(7, 0).unwrap();
        car.request_from_car(2, 0).unwrap();
        car.request_from_car(9, 0).unwrap();

        // Act
        let mut served = Vec::new();
        let mut now = 0;
        while car.has_stops() {
            now += 1;
            let before = car.stop_count();
            car.advance_toward_stops(now).unwrap();
            if car.stop_count() < before {
                served.push(car.floor());
            }
        }

        // Assert
        assert_eq!(served, vec![7, 9, 2]);
        assert_eq!(car.direction(), Down);
        assert_eq!(car.trip_count(), 1);
    }

    #[test]
    fn test_new_stop_mid_sweep_extends_run() {
        // Purpose: A stop added ahead of the car keeps the direction instead of reversing

        // Arrange
        let mut car = setup_car(0);
        car.request_from_car(3, 0).unwrap();
        car.advance_toward_stops(1).unwrap();

        // Act
        car.request_from_car(6, 1).unwrap();
        let now = run_until_idle(&mut car, 1);

        // Assert
        assert_eq!(car.floor(), 6);
        assert_eq!(car.direction(), Up);
        assert_eq!(now, 5);
    }

    #[test]
    fn test_direction_kept_after_sweep_until_new_request() {
        // Arrange
        let mut car = setup_car(0);
        car.test_set_position(5, Up);
        car.request_from_car(8, 0).unwrap();
        let now = run_until_idle(&mut car, 0);

        // Act
        let kept = car.direction();
        car.request_from_hall(2, now).unwrap();
        car.advance_toward_stops(now + 1).unwrap();

        // Assert
        assert_eq!(kept, Up);
        assert_eq!(car.direction(), Down);
        assert_eq!(car.floor(), 7);
    }

    #[test]
    fn test_moving_toward_requires_occupancy() {
        // Arrange
        let mut car = setup_car(0);
        car.test_set_position(4, Up);

        // Act & Assert
        assert!(!car.moving_toward(8));

        car.request_from_car(9, 0).unwrap();
        assert!(car.moving_toward(8));
        assert!(!car.moving_toward(3));
        assert!(!car.moving_toward(4));
        assert_eq!(car.distance_to(8), 4);
        assert_eq!(car.distance_to(1), 3);
    }

    #[test]
    fn test_step_with_open_door_is_invariant_violation() {
        // Arrange
        let mut car = setup_car(0);

        // Act
        let result = car.step_one_floor(1);

        // Assert
        assert!(matches!(result, Err(ElevatorError::InvariantViolation { car: 0, .. })));
        assert_eq!(car.floor(), 1);
    }

    #[test]
    fn test_step_out_of_shaft_is_invariant_violation() {
        // Arrange
        let mut car = setup_car(0);
        car.close_door(0);
        car.test_set_position(10, Up);

        // Act
        let result = car.step_one_floor(1);

        // Assert
        assert!(matches!(result, Err(ElevatorError::InvariantViolation { .. })));
        assert_eq!(car.floor(), 10);
        assert_eq!(car.mileage(), 0);
    }

    #[test]
    fn test_floor_stays_in_range_at_shaft_ends() {
        // Purpose: Alternating requests at both ends never push the car out of range

        // Arrange
        let mut car = setup_car(1);
        let mut now = 0;

        // Act & Assert
        for target in [10, 1, 10, 2, 9, 1] {
            car.request_from_car(target, now).unwrap();
            while car.has_stops() {
                now += 1;
                car.advance_toward_stops(now).unwrap();
                assert!(car.floor() >= 1 && car.floor() <= 10);
            }
        }
        assert_eq!(car.trip_count(), 6);
    }

    #[test]
    fn test_behaviour_follows_state() {
        // Arrange
        let mut car = setup_car(1);
        car.request_from_car(3, 0).unwrap();

        // Act & Assert
        assert_eq!(car.behaviour(), DoorOpen);
        car.advance_toward_stops(1).unwrap();
        assert_eq!(car.behaviour(), Moving);
        car.advance_toward_stops(2).unwrap();
        assert_eq!(car.behaviour(), Idle);
    }

    #[test]
    fn test_maintenance_after_trip_limit() {
        // Purpose: Completing the hundredth unoccupied trip takes the car out of service

        // Arrange
        let mut car = setup_car(0);
        car.test_set_trip_count(99);
        car.request_from_hall(3, 0).unwrap();
        assert!(car.can_serve(5));

        // Act
        run_until_idle(&mut car, 0);

        // Assert
        assert_eq!(car.trip_count(), 100);
        assert!(car.in_maintenance());
        assert!(!car.can_serve(5));
        assert_eq!(car.behaviour(), OutOfService);
        assert!(car
            .drain_events()
            .contains(&CarEvent::MaintenanceEntered { tick: 2, car: 0 }));
    }

    #[test]
    fn test_maintenance_refuses_cab_requests() {
        // Arrange
        let mut car = setup_car(0);
        car.test_set_trip_count(100);

        // Act
        let result = car.request_from_car(4, 0);

        // Assert
        assert_eq!(result, Err(ElevatorError::CarOutOfService { car: 0 }));
        assert!(!car.is_occupied());
        assert!(car.in_maintenance());
    }

    #[test]
    fn test_maintenance_completed_resets_counters() {
        // Arrange
        let mut car = setup_car(0);
        car.request_from_car(6, 0).unwrap();
        let now = run_until_idle(&mut car, 0);
        car.test_set_trip_count(100);
        car.drain_events();

        // Act
        car.maintenance_completed(now + 1);

        // Assert
        assert_eq!(car.trip_count(), 0);
        assert_eq!(car.mileage(), 0);
        assert_eq!(car.total_mileage(), 5);
        assert_eq!(car.floor(), 6);
        assert!(!car.in_maintenance());
        assert_eq!(
            car.drain_events(),
            vec![CarEvent::MaintenanceExited { tick: now + 1, car: 0 }]
        );
    }
}
