//! Simulation of a bank of elevator cars answering hall calls and in-car requests.
//!
//! [`ElevatorCar`] holds the per-car state machine, [`FleetDispatcher`] decides which car answers
//! a hall call, and [`ElevatorBank`] shares both safely between threads.

pub mod config;
pub mod control;
pub mod coordinator;
pub mod driver;
pub mod elevator;
pub mod shared;

pub use config::Config;
pub use coordinator::{ElevatorBank, FleetDispatcher, SelectionRule};
pub use elevator::ElevatorCar;
pub use shared::{CarEvent, CarId, CarSnapshot, ElevatorError, Floor, Tick};
