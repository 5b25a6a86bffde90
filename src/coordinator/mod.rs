pub mod coordinator;
pub mod dispatcher;

pub use coordinator::ElevatorBank;
pub use dispatcher::FleetDispatcher;
pub use dispatcher::SelectionRule;
