//! Distance sensor capability.
//!
//! The session driver polls one sample per tick through this seam. A
//! timeout is reported as `None`, never as an error.

pub mod simulated;

pub use simulated::SimulatedSensor;

/// One distance measurement per call, in centimeters.
pub trait DistanceSensor {
    /// `None` means the sensor timed out waiting for an echo.
    fn sample(&mut self) -> Option<f64>;
}
