/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::warn;
use parking_lot::Mutex;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::coordinator::{FleetDispatcher, SelectionRule};
use crate::shared::{CarEvent, CarId, CarSnapshot, ElevatorResult, Floor, Tick};

/**
 * Thread-safe front of the elevator bank.
 *
 * Each public operation holds one lock over the whole fleet for its full duration. A dispatch
 * decision therefore never interleaves with another dispatch, a cab request or a car being
 * stepped: each call sees every car either before or after any concurrent operation.
 *
 * Car events collected during an operation are forwarded on `event_tx` before the lock is
 * released, so the reporter sees them in the order they happened.
 *
 * # Fields
 * - `fleet`:       The dispatcher and every car it owns.
 * - `event_tx`:    Sender for `CarEvent` notifications to an external reporter.
 */
pub struct ElevatorBank {
    fleet: Mutex<FleetDispatcher>,
    event_tx: cbc::Sender<CarEvent>,
}

impl ElevatorBank {
    pub fn new(fleet: FleetDispatcher, event_tx: cbc::Sender<CarEvent>) -> ElevatorBank {
        ElevatorBank {
            fleet: Mutex::new(fleet),
            event_tx,
        }
    }

    pub fn from_config(
        config: &Config,
        event_tx: cbc::Sender<CarEvent>,
    ) -> ElevatorResult<ElevatorBank> {
        Ok(ElevatorBank::new(
            FleetDispatcher::from_config(config)?,
            event_tx,
        ))
    }

    pub fn call_elevator(&self, floor: Floor) -> ElevatorResult<CarId> {
        self.with_fleet(|fleet| fleet.dispatch(floor))
    }

    pub fn call_elevator_with_rule(&self, floor: Floor) -> ElevatorResult<(CarId, SelectionRule)> {
        self.with_fleet(|fleet| fleet.dispatch_with_rule(floor))
    }

    pub fn press_car_button(&self, car: CarId, floor: Floor) -> ElevatorResult<()> {
        self.with_fleet(|fleet| fleet.press_car_button(car, floor))
    }

    pub fn tick(&self) -> ElevatorResult<Tick> {
        self.with_fleet(|fleet| fleet.tick())
    }

    pub fn service_car(&self, car: CarId) -> ElevatorResult<()> {
        self.with_fleet(|fleet| fleet.service_car(car))
    }

    pub fn snapshot(&self) -> Vec<CarSnapshot> {
        self.fleet.lock().snapshot()
    }

    pub fn now(&self) -> Tick {
        self.fleet.lock().now()
    }

    /***************************************/
    /*          Private functions          */
    /***************************************/
    fn with_fleet<T>(
        &self,
        operation: impl FnOnce(&mut FleetDispatcher) -> ElevatorResult<T>,
    ) -> ElevatorResult<T> {
        let mut fleet = self.fleet.lock();
        let result = operation(&mut *fleet);
        self.publish(fleet.drain_events());
        result
    }

    fn publish(&self, events: Vec<CarEvent>) {
        for event in events {
            if self.event_tx.send(event).is_err() {
                warn!("Event reporter disconnected, dropping car events");
                return;
            }
        }
    }
}
