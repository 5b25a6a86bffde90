/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*            Type aliases             */
/***************************************/
pub type Floor = i32;
pub type CarId = usize;
pub type Tick = u64;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn step(self) -> Floor {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Closed,
    Open,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "doorOpen")]
    DoorOpen,
    #[serde(rename = "outOfService")]
    OutOfService,
}

/**
 * Read-only view of a single car, handed to reporting and the operator console.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarSnapshot {
    pub id: CarId,
    pub floor: Floor,
    pub direction: Direction,
    pub door: DoorState,
    pub behaviour: Behaviour,
    pub occupied: bool,
    pub stops: Vec<Floor>,
    #[serde(rename = "tripCount")]
    pub trip_count: u32,
    pub mileage: u64,
    #[serde(rename = "totalMileage")]
    pub total_mileage: u64,
    #[serde(rename = "inMaintenance")]
    pub in_maintenance: bool,
}

/**
 * One-way notifications emitted by the cars.
 *
 * Nothing inside the fleet reads these back; they exist for an external reporter.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarEvent {
    FloorChanged { tick: Tick, car: CarId, floor: Floor },
    DoorOpened { tick: Tick, car: CarId, floor: Floor },
    DoorClosed { tick: Tick, car: CarId, floor: Floor },
    MaintenanceEntered { tick: Tick, car: CarId },
    MaintenanceExited { tick: Tick, car: CarId },
}

impl CarEvent {
    pub fn car(&self) -> CarId {
        match *self {
            CarEvent::FloorChanged { car, .. }
            | CarEvent::DoorOpened { car, .. }
            | CarEvent::DoorClosed { car, .. }
            | CarEvent::MaintenanceEntered { car, .. }
            | CarEvent::MaintenanceExited { car, .. } => car,
        }
    }
}
