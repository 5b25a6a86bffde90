pub mod reporter;
pub mod tick_driver;

pub use reporter::EventReporter;
pub use tick_driver::TickDriver;
