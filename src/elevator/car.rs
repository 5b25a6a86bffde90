/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};
use std::collections::BTreeSet;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::elevator::timer::DwellTimer;
use crate::shared::{
    Behaviour, CarEvent, CarId, CarSnapshot, Direction, DoorState, ElevatorError, ElevatorResult,
    Floor, Tick,
};

/**
 * One elevator car: position, direction, door and trip bookkeeping.
 *
 * The car never moves on its own. A driver calls `advance_toward_stops` once per logical tick,
 * and the car takes at most one floor step per call.
 *
 * # Fields
 * - `id`:                      Stable identifier, also the final dispatch tie-break.
 * - `min_floor`, `max_floor`:  The shaft the car serves, `min_floor < max_floor`.
 * - `floor`:                   Current floor, always inside the shaft.
 * - `direction`:               Direction of the current sweep. Kept after the sweep ends.
 * - `door`:                    Door state. An open door holds the car in place.
 * - `occupied`:                Set by an in-car request, cleared when a sweep empties `stops`.
 * - `stops`:                   Pending target floors, consumed in sweep order.
 * - `trip_count`:              Sweeps completed since the last service.
 * - `mileage`:                 Floors travelled since the last service.
 * - `total_mileage`:           Floors travelled over the car's lifetime.
 * - `maintenance_trip_limit`:  Trips after which the car takes itself out of service.
 * - `door_timer`:              Dwell timer armed whenever the door opens.
 * - `events`:                  Notifications not yet collected by the owner.
 */
#[derive(Debug, Clone)]
pub struct ElevatorCar {
    id: CarId,
    min_floor: Floor,
    max_floor: Floor,
    floor: Floor,
    direction: Direction,
    door: DoorState,
    occupied: bool,
    stops: BTreeSet<Floor>,
    trip_count: u32,
    mileage: u64,
    total_mileage: u64,
    maintenance_trip_limit: u32,
    door_timer: DwellTimer,
    events: Vec<CarEvent>,
}

impl ElevatorCar {
    pub fn new(
        id: CarId,
        min_floor: Floor,
        max_floor: Floor,
        config: &ElevatorConfig,
    ) -> ElevatorResult<ElevatorCar> {
        if min_floor >= max_floor {
            return Err(ElevatorError::InvalidFleet(format!(
                "bottom floor {} must be below top floor {}",
                min_floor, max_floor
            )));
        }

        Ok(ElevatorCar {
            id,
            min_floor,
            max_floor,
            floor: min_floor,
            direction: Direction::Up,
            door: DoorState::Open,
            occupied: false,
            stops: BTreeSet::new(),
            trip_count: 0,
            mileage: 0,
            total_mileage: 0,
            maintenance_trip_limit: config.maintenance_trip_limit,
            door_timer: DwellTimer::new(config.door_open_ticks),
            events: Vec::new(),
        })
    }

    /***************************************/
    /*              Accessors              */
    /***************************************/
    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn min_floor(&self) -> Floor {
        self.min_floor
    }

    pub fn max_floor(&self) -> Floor {
        self.max_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn door_state(&self) -> DoorState {
        self.door
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn stops(&self) -> impl Iterator<Item = Floor> + '_ {
        self.stops.iter().copied()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty()
    }

    pub fn trip_count(&self) -> u32 {
        self.trip_count
    }

    pub fn mileage(&self) -> u64 {
        self.mileage
    }

    pub fn total_mileage(&self) -> u64 {
        self.total_mileage
    }

    /***************************************/
    /*             Predicates              */
    /***************************************/

    /// A car that already carries a passenger finishes its sweep before going out of service.
    pub fn in_maintenance(&self) -> bool {
        self.trip_count >= self.maintenance_trip_limit && !self.occupied
    }

    pub fn in_range(&self, floor: Floor) -> bool {
        self.min_floor <= floor && floor <= self.max_floor
    }

    pub fn can_serve(&self, floor: Floor) -> bool {
        self.in_range(floor) && !self.in_maintenance()
    }

    /// Door open with nobody aboard. Pending hall stops do not matter: a car dwelling at a
    /// floor can take another call there before moving on.
    pub fn is_idle(&self) -> bool {
        self.door == DoorState::Open && !self.occupied
    }

    /// Only an occupied car is ever "moving toward" a floor.
    pub fn moving_toward(&self, floor: Floor) -> bool {
        if !self.occupied {
            return false;
        }
        match self.direction {
            Direction::Up => self.floor < floor,
            Direction::Down => self.floor > floor,
        }
    }

    pub fn distance_to(&self, floor: Floor) -> u32 {
        (self.floor - floor).unsigned_abs()
    }

    pub fn behaviour(&self) -> Behaviour {
        if self.in_maintenance() {
            Behaviour::OutOfService
        } else if self.stops.is_empty() {
            Behaviour::Idle
        } else if self.door == DoorState::Open {
            Behaviour::DoorOpen
        } else {
            Behaviour::Moving
        }
    }

    /***************************************/
    /*              Requests               */
    /***************************************/

    /// Returns whether the floor was new to the stop set.
    pub fn add_stop(&mut self, floor: Floor) -> ElevatorResult<bool> {
        self.check_range(floor)?;
        if floor == self.floor {
            return Ok(false);
        }
        Ok(self.stops.insert(floor))
    }

    /// In-car button. Validation happens before any state is touched.
    pub fn request_from_car(&mut self, floor: Floor, now: Tick) -> ElevatorResult<()> {
        self.check_range(floor)?;
        if self.in_maintenance() {
            return Err(ElevatorError::CarOutOfService { car: self.id });
        }

        // Pressing the current floor only reopens the door, the car gains no stop
        if floor == self.floor {
            self.serve_in_place(now);
            return Ok(());
        }

        self.occupied = true;
        if self.add_stop(floor)? {
            debug!("Car {}: cab request for floor {}", self.id, floor);
        }
        Ok(())
    }

    /// Hall call forwarded by the dispatcher once it has chosen this car.
    pub fn request_from_hall(&mut self, floor: Floor, now: Tick) -> ElevatorResult<()> {
        self.check_range(floor)?;

        if floor == self.floor {
            self.serve_in_place(now);
            return Ok(());
        }

        if self.add_stop(floor)? {
            debug!("Car {}: hall request for floor {}", self.id, floor);
        }
        Ok(())
    }

    /***************************************/
    /*                Door                 */
    /***************************************/
    pub fn open_door(&mut self, now: Tick) {
        if self.door == DoorState::Open {
            return;
        }
        self.door = DoorState::Open;
        self.door_timer.start(now);
        debug!("Car {}: door opened at floor {}", self.id, self.floor);
        self.events.push(CarEvent::DoorOpened {
            tick: now,
            car: self.id,
            floor: self.floor,
        });
    }

    pub fn close_door(&mut self, now: Tick) {
        if self.door == DoorState::Closed {
            return;
        }
        self.door = DoorState::Closed;
        self.door_timer.stop();
        debug!("Car {}: door closed at floor {}", self.id, self.floor);
        self.events.push(CarEvent::DoorClosed {
            tick: now,
            car: self.id,
            floor: self.floor,
        });
    }

    pub fn dwell_deadline(&self) -> Option<Tick> {
        self.door_timer.deadline()
    }

    /***************************************/
    /*               Motion                */
    /***************************************/
    pub fn step_one_floor(&mut self, now: Tick) -> ElevatorResult<()> {
        if self.door == DoorState::Open {
            return Err(ElevatorError::InvariantViolation {
                car: self.id,
                reason: format!("asked to move with the door open at floor {}", self.floor),
            });
        }

        let next_floor = self.floor + self.direction.step();
        if !self.in_range(next_floor) {
            return Err(ElevatorError::InvariantViolation {
                car: self.id,
                reason: format!(
                    "step to floor {} leaves the range {}..={}",
                    next_floor, self.min_floor, self.max_floor
                ),
            });
        }

        self.floor = next_floor;
        self.mileage += 1;
        self.total_mileage += 1;
        debug!("Car {}: at floor {}", self.id, self.floor);
        self.events.push(CarEvent::FloorChanged {
            tick: now,
            car: self.id,
            floor: self.floor,
        });

        if self.stops.remove(&self.floor) {
            self.open_door(now);
            if self.stops.is_empty() {
                self.complete_trip(now);
            }
        }
        Ok(())
    }

    /// One scheduling step: wait out the dwell, settle the direction, move one floor.
    pub fn advance_toward_stops(&mut self, now: Tick) -> ElevatorResult<()> {
        let (lowest, highest) = match (self.stops.first(), self.stops.last()) {
            (Some(&lowest), Some(&highest)) => (lowest, highest),
            _ => return Ok(()),
        };

        if self.door == DoorState::Open {
            if !self.door_timer.expired(now) {
                return Ok(());
            }
            self.close_door(now);
        }

        let nothing_ahead = match self.direction {
            Direction::Up => self.floor > highest,
            Direction::Down => self.floor < lowest,
        };
        if nothing_ahead {
            self.direction = self.direction.reversed();
        }

        self.step_one_floor(now)
    }

    /***************************************/
    /*             Maintenance             */
    /***************************************/
    pub fn maintenance_completed(&mut self, now: Tick) {
        let was_out_of_service = self.in_maintenance();
        self.trip_count = 0;
        self.mileage = 0;

        if was_out_of_service {
            info!("Car {}: serviced, back in operation", self.id);
            self.events
                .push(CarEvent::MaintenanceExited { tick: now, car: self.id });
        }
    }

    /***************************************/
    /*              Reporting              */
    /***************************************/
    pub fn snapshot(&self) -> CarSnapshot {
        CarSnapshot {
            id: self.id,
            floor: self.floor,
            direction: self.direction,
            door: self.door,
            behaviour: self.behaviour(),
            occupied: self.occupied,
            stops: self.stops.iter().copied().collect(),
            trip_count: self.trip_count,
            mileage: self.mileage,
            total_mileage: self.total_mileage,
            in_maintenance: self.in_maintenance(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<CarEvent> {
        std::mem::take(&mut self.events)
    }

    /***************************************/
    /*          Private functions          */
    /***************************************/
    fn check_range(&self, floor: Floor) -> ElevatorResult<()> {
        if self.in_range(floor) {
            Ok(())
        } else {
            Err(ElevatorError::OutOfRange {
                car: self.id,
                floor,
                min: self.min_floor,
                max: self.max_floor,
            })
        }
    }

    // Open the door if needed, and restart the dwell either way
    fn serve_in_place(&mut self, now: Tick) {
        if self.door == DoorState::Open {
            self.door_timer.start(now);
        } else {
            self.open_door(now);
        }
    }

    fn complete_trip(&mut self, now: Tick) {
        self.occupied = false;
        self.trip_count += 1;
        debug!("Car {}: trip {} completed", self.id, self.trip_count);

        if self.in_maintenance() {
            info!(
                "Car {}: {} trips since last service, entering maintenance",
                self.id, self.trip_count
            );
            self.events
                .push(CarEvent::MaintenanceEntered { tick: now, car: self.id });
        }
    }

    /***************************************/
    /*           Test functions            */
    /***************************************/
    #[cfg(test)]
    pub fn test_set_position(&mut self, floor: Floor, direction: Direction) {
        self.floor = floor;
        self.direction = direction;
    }

    #[cfg(test)]
    pub fn test_set_trip_count(&mut self, trip_count: u32) {
        self.trip_count = trip_count;
    }
}
