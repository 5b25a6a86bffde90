pub mod car;
pub mod car_tests;
pub mod timer;

pub use car::ElevatorCar;
pub use timer::DwellTimer;
