pub mod error;
pub mod macros;
pub mod structs;

pub use error::ConfigError;
pub use error::ElevatorError;
pub use error::ElevatorResult;
pub use structs::Behaviour;
pub use structs::CarEvent;
pub use structs::CarId;
pub use structs::CarSnapshot;
pub use structs::Direction;
pub use structs::DoorState;
pub use structs::Floor;
pub use structs::Tick;
