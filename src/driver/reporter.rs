use crossbeam_channel as cbc;
use log::info;

use crate::shared::CarEvent;

/**
 * Logs every car event it receives. Stops once all senders are gone.
 */
pub struct EventReporter {
    event_rx: cbc::Receiver<CarEvent>,
}

impl EventReporter {
    pub fn new(event_rx: cbc::Receiver<CarEvent>) -> EventReporter {
        EventReporter { event_rx }
    }

    pub fn run(self) -> usize {
        let mut reported = 0;
        for event in self.event_rx.iter() {
            info!("{}", describe(&event));
            reported += 1;
        }
        reported
    }
}

pub fn describe(event: &CarEvent) -> String {
    match *event {
        CarEvent::FloorChanged { tick, car, floor } => {
            format!("[{:>5}] Car {} passing floor {}", tick, car, floor)
        }
        CarEvent::DoorOpened { tick, car, floor } => {
            format!("[{:>5}] Car {} doors open at floor {}", tick, car, floor)
        }
        CarEvent::DoorClosed { tick, car, floor } => {
            format!("[{:>5}] Car {} doors closed at floor {}", tick, car, floor)
        }
        CarEvent::MaintenanceEntered { tick, car } => {
            format!("[{:>5}] Car {} out of service, awaiting maintenance", tick, car)
        }
        CarEvent::MaintenanceExited { tick, car } => {
            format!("[{:>5}] Car {} back in service", tick, car)
        }
    }
}
