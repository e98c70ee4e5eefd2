//! ==============================================================================
//! weather station - synthetic iot weather readings
//! ==============================================================================
//!
//! data flows one way:
//!
//! ```text
//!     simulator ──write_csv──▶ readings.csv ──load_latest_reading──▶ GET /latest
//!                                   │
//!                                   └──load_readings──▶ plot (svg)
//! ```
//!
//! the file is the only interface between generation and serving.
//!
//! ==============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod plot;
pub mod server;
pub mod simulator;
pub mod store;

pub use domain::Reading;
pub use error::{Result, StationError};
pub use simulator::{simulate, write_csv, SimulationParams};
pub use store::{load_latest_reading, load_readings};
