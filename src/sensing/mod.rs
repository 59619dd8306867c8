pub mod alert;
pub mod classifier;
pub mod collector;
pub mod controller;
pub mod loop_worker;
pub mod window;

pub use alert::AlertPolicy;
pub use classifier::classify;
pub use collector::RoundCollector;
pub use controller::MonitorController;
pub use loop_worker::{ContinueGate, SessionDriver, SessionMode, SessionOutcome};
pub use window::{RollingWindow, ViewBounds};
