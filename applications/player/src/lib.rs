//! Cadence Player Library
//!
//! Headless command-line front-end: configuration, a simulated playback
//! device, and a line-oriented command interpreter over a player session.
//!
//! This library exposes the core components for testing purposes.

pub mod app;
pub mod command;
pub mod config;
pub mod device;
pub mod error;

// Re-export commonly used types for convenience
pub use app::{Player, Reply};
pub use command::Command;
pub use config::PlayerConfig;
pub use device::SimulatedDevice;
pub use error::{PlayerAppError, Result};
