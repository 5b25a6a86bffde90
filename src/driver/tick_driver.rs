/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::info;
use std::sync::Arc;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::coordinator::ElevatorBank;
use crate::shared::ElevatorResult;

/**
 * Drives the bank's logical clock from wall-clock time.
 *
 * Only the binary uses this; tests call `tick` on the bank directly.
 *
 * # Fields
 * - `bank`:            The shared elevator bank.
 * - `interval`:        Wall-clock time between two ticks.
 * - `terminate_rx`:    Any message (or a dropped sender) stops the driver.
 */
pub struct TickDriver {
    bank: Arc<ElevatorBank>,
    interval: Duration,
    terminate_rx: cbc::Receiver<()>,
}

impl TickDriver {
    pub fn new(
        bank: Arc<ElevatorBank>,
        interval: Duration,
        terminate_rx: cbc::Receiver<()>,
    ) -> TickDriver {
        TickDriver {
            bank,
            interval,
            terminate_rx,
        }
    }

    /// Returns only on termination or on a fatal car error.
    pub fn run(self) -> ElevatorResult<()> {
        let ticker = cbc::tick(self.interval);

        loop {
            cbc::select! {
                recv(ticker) -> _ => {
                    self.bank.tick()?;
                }
                recv(self.terminate_rx) -> _ => {
                    info!("Tick driver stopped at tick {}", self.bank.now());
                    return Ok(());
                }
            }
        }
    }
}
