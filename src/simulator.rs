//! ==============================================================================
//! simulator.rs - synthetic weather reading generator
//! ==============================================================================
//!
//! purpose:
//!     produces an ordered, evenly spaced series of readings for a fixed
//!     duration and writes it to the flat readings file.
//!
//! sampling, per step (order matters for seeded reproducibility):
//!     1. temperature ~ normal(20.0, 2.0)
//!     2. humidity    ~ uniform[30.0, 90.0)
//!     3. rain        ~ bernoulli(0.1)
//!
//! relationships:
//!     - used by: main.rs (generate subcommand)
//!     - writes: the file read back by store.rs
//!
//! ==============================================================================

use crate::domain::{round2, Reading, TIMESTAMP_FORMAT};
use crate::error::{Result, StationError};

use chrono::{DateTime, Duration, Utc};
use rand::distributions::{Bernoulli, Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use std::path::Path;

const TEMPERATURE_MEAN: f64 = 20.0;
const TEMPERATURE_STD_DEV: f64 = 2.0;
const HUMIDITY_MIN: f64 = 30.0;
const HUMIDITY_MAX: f64 = 90.0;
const RAIN_PROBABILITY: f64 = 0.1;

/// upper bound on the up-front allocation; longer runs grow the vec
const MAX_PREALLOCATED_READINGS: u64 = 1 << 16;

/// what to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParams {
    pub duration_minutes: u64,
    pub interval_seconds: u64,
    /// fixed seed for a reproducible series; fresh entropy when `None`
    pub seed: Option<u64>,
}

impl SimulationParams {
    pub fn new(duration_minutes: u64, interval_seconds: u64, seed: Option<u64>) -> Self {
        Self { duration_minutes, interval_seconds, seed }
    }

    /// number of readings, `floor(duration * 60 / interval)`
    pub fn total_steps(&self) -> Result<u64> {
        if self.interval_seconds == 0 {
            return Err(StationError::InvalidArgument(
                "interval_seconds must be positive".to_string(),
            ));
        }
        let total_seconds = self.duration_minutes.checked_mul(60).ok_or_else(|| {
            StationError::InvalidArgument(format!(
                "duration_minutes {} is too large",
                self.duration_minutes
            ))
        })?;
        Ok(total_seconds / self.interval_seconds)
    }
}

/// Generate readings starting now (utc).
pub fn simulate(params: &SimulationParams) -> Result<Vec<Reading>> {
    simulate_from(Utc::now(), params)
}

/// Generate readings starting at `start`.
///
/// Timestamps are `start + step * interval`, truncated to whole seconds.
pub fn simulate_from(start: DateTime<Utc>, params: &SimulationParams) -> Result<Vec<Reading>> {
    let total_steps = params.total_steps()?;
    let interval = i64::try_from(params.interval_seconds)
        .map_err(|_| StationError::InvalidArgument("interval_seconds is too large".to_string()))?;

    let mut rng = match params.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let temperature = Normal::new(TEMPERATURE_MEAN, TEMPERATURE_STD_DEV)
        .map_err(|e| StationError::InvalidArgument(e.to_string()))?;
    let humidity = Uniform::new(HUMIDITY_MIN, HUMIDITY_MAX);
    let rain = Bernoulli::new(RAIN_PROBABILITY)
        .map_err(|e| StationError::InvalidArgument(e.to_string()))?;

    let capacity = total_steps.min(MAX_PREALLOCATED_READINGS) as usize;
    let mut readings = Vec::with_capacity(capacity);
    for step in 0..total_steps {
        let timestamp = (step as i64)
            .checked_mul(interval)
            .and_then(Duration::try_seconds)
            .and_then(|offset| start.checked_add_signed(offset))
            .ok_or_else(|| StationError::InvalidArgument("timestamp out of range".to_string()))?;

        let t = temperature.sample(&mut rng);
        let h = humidity.sample(&mut rng);
        let r = rain.sample(&mut rng);

        readings.push(Reading {
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            temperature: round2(t),
            humidity: round2(h),
            rain: u8::from(r),
        });
    }

    tracing::debug!(steps = total_steps, seed = ?params.seed, "[GENERATE] simulated readings");
    Ok(readings)
}

/// Write readings to `path` as csv, replacing any existing file.
pub fn write_csv(readings: &[Reading], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StationError::io(parent, e))?;
    }

    let file = std::fs::File::create(path).map_err(|e| StationError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    // explicit header so an empty run still produces a valid file
    writer.write_record(Reading::COLUMNS)?;
    for reading in readings {
        writer.serialize(reading)?;
    }
    writer.flush().map_err(|e| StationError::io(path, e))?;
    Ok(())
}
