/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{Config, ElevatorConfig};
use crate::elevator::ElevatorCar;
use crate::shared::{CarEvent, CarId, CarSnapshot, ElevatorError, ElevatorResult, Floor, Tick};

/***************************************/
/*               Enums                 */
/***************************************/

/// Which rule of the selection protocol picked the car. Ordered by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRule {
    StationedIdle,
    EnRoute,
    NearestUnoccupied,
    SoonestToFree,
}

/**
 * Owns every car of the bank together with the logical clock that drives them.
 *
 * Every method takes `&self` or `&mut self`; callers that share a dispatcher between threads
 * wrap it in a lock (see `ElevatorBank`), so a selection never observes a half-applied step.
 *
 * # Fields
 * - `cars`:    The fleet, indexed by car id.
 * - `now`:     Logical time, advanced by one on every `tick`.
 */
#[derive(Debug, Clone)]
pub struct FleetDispatcher {
    cars: Vec<ElevatorCar>,
    now: Tick,
}

impl FleetDispatcher {
    pub fn new(
        n_cars: usize,
        top_floor: Floor,
        bottom_floor: Floor,
        config: &ElevatorConfig,
    ) -> ElevatorResult<FleetDispatcher> {
        if n_cars == 0 {
            return Err(ElevatorError::InvalidFleet(
                "a fleet needs at least one car".to_string(),
            ));
        }

        let cars = (0..n_cars)
            .map(|id| ElevatorCar::new(id, bottom_floor, top_floor, config))
            .collect::<ElevatorResult<Vec<ElevatorCar>>>()?;

        info!(
            "Fleet of {} cars serving floors {}..={}",
            n_cars, bottom_floor, top_floor
        );
        Ok(FleetDispatcher { cars, now: 0 })
    }

    pub fn from_config(config: &Config) -> ElevatorResult<FleetDispatcher> {
        FleetDispatcher::new(
            config.fleet.n_cars,
            config.fleet.top_floor,
            config.fleet.bottom_floor,
            &config.elevator,
        )
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn cars(&self) -> &[ElevatorCar] {
        &self.cars
    }

    pub fn car(&self, id: CarId) -> ElevatorResult<&ElevatorCar> {
        self.cars.get(id).ok_or(ElevatorError::UnknownCar { car: id })
    }

    /// Hall call: pick exactly one eligible car and hand it the request.
    pub fn dispatch(&mut self, floor: Floor) -> ElevatorResult<CarId> {
        self.dispatch_with_rule(floor).map(|(id, _)| id)
    }

    pub fn dispatch_with_rule(&mut self, floor: Floor) -> ElevatorResult<(CarId, SelectionRule)> {
        let (id, rule) = match self.select(floor) {
            Ok(choice) => choice,
            Err(e) => {
                warn!("Hall call at floor {} rejected: {}", floor, e);
                return Err(e);
            }
        };

        let now = self.now;
        self.car_mut(id)?.request_from_hall(floor, now)?;
        info!("Hall call at floor {} assigned to car {} ({:?})", floor, id, rule);
        Ok((id, rule))
    }

    /// In-car button, bypassing selection entirely.
    pub fn press_car_button(&mut self, id: CarId, floor: Floor) -> ElevatorResult<()> {
        let now = self.now;
        let result = self.car_mut(id)?.request_from_car(floor, now);
        if let Err(e) = &result {
            warn!("Cab request in car {} for floor {} rejected: {}", id, floor, e);
        }
        result
    }

    /// Advance the clock, then give each working car with pending stops one scheduling step.
    pub fn tick(&mut self) -> ElevatorResult<Tick> {
        self.now += 1;
        let now = self.now;

        for car in self.cars.iter_mut() {
            if car.has_stops() && !car.in_maintenance() {
                car.advance_toward_stops(now)?;
            }
        }
        debug!("Tick {} done", now);
        Ok(now)
    }

    pub fn service_car(&mut self, id: CarId) -> ElevatorResult<()> {
        let now = self.now;
        self.car_mut(id)?.maintenance_completed(now);
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<CarSnapshot> {
        self.cars.iter().map(ElevatorCar::snapshot).collect()
    }

    pub fn drain_events(&mut self) -> Vec<CarEvent> {
        self.cars
            .iter_mut()
            .flat_map(|car| car.drain_events())
            .collect()
    }

    /***************************************/
    /*          Private functions          */
    /***************************************/
    fn car_mut(&mut self, id: CarId) -> ElevatorResult<&mut ElevatorCar> {
        self.cars
            .get_mut(id)
            .ok_or(ElevatorError::UnknownCar { car: id })
    }

    // Every branch returns a definite car or the failure; tie-breaks end on the car id
    fn select(&self, floor: Floor) -> ElevatorResult<(CarId, SelectionRule)> {
        let eligible: Vec<&ElevatorCar> =
            self.cars.iter().filter(|car| car.can_serve(floor)).collect();

        if eligible.is_empty() {
            return Err(ElevatorError::NoAvailableElevator { floor });
        }

        if let Some(car) = eligible
            .iter()
            .filter(|car| car.floor() == floor && car.is_idle())
            .min_by_key(|car| car.id())
        {
            return Ok((car.id(), SelectionRule::StationedIdle));
        }

        if let Some(car) = eligible
            .iter()
            .filter(|car| car.moving_toward(floor))
            .min_by_key(|car| (car.distance_to(floor), car.id()))
        {
            return Ok((car.id(), SelectionRule::EnRoute));
        }

        if let Some(car) = eligible
            .iter()
            .filter(|car| !car.is_occupied())
            .min_by_key(|car| (car.distance_to(floor), car.id()))
        {
            return Ok((car.id(), SelectionRule::NearestUnoccupied));
        }

        eligible
            .iter()
            .min_by_key(|car| (car.stop_count(), car.distance_to(floor), car.id()))
            .map(|car| (car.id(), SelectionRule::SoonestToFree))
            .ok_or(ElevatorError::NoAvailableElevator { floor })
    }

    /***************************************/
    /*           Test functions            */
    /***************************************/
    #[cfg(test)]
    pub fn test_car_mut(&mut self, id: CarId) -> &mut ElevatorCar {
        &mut self.cars[id]
    }

    #[cfg(test)]
    pub fn test_select(&self, floor: Floor) -> ElevatorResult<(CarId, SelectionRule)> {
        self.select(floor)
    }
}
