use thiserror::Error;

use crate::shared::{CarId, Floor};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElevatorError {
    #[error("Floor {floor} is outside the range {min}..={max} of car {car}")]
    OutOfRange {
        car: CarId,
        floor: Floor,
        min: Floor,
        max: Floor,
    },

    #[error("No elevator is available to answer a call at floor {floor}")]
    NoAvailableElevator { floor: Floor },

    #[error("Unknown car {car}")]
    UnknownCar { car: CarId },

    #[error("Car {car} is out of service until maintenance is completed")]
    CarOutOfService { car: CarId },

    #[error("Invalid fleet: {0}")]
    InvalidFleet(String),

    /// Fatal: the car's direction logic disagrees with its stops or its door.
    #[error("Invariant violation in car {car}: {reason}")]
    InvariantViolation { car: CarId, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ElevatorResult<T> = Result<T, ElevatorError>;
