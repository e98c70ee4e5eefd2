//! ==============================================================================
//! plot.rs - chart of a readings file
//! ==============================================================================
//!
//! purpose:
//!     renders temperature, humidity and rain as three stacked line charts
//!     (svg) against minutes since the first reading.
//!
//! relationships:
//!     - used by: main.rs (plot subcommand)
//!     - reads: readings loaded through store.rs
//!
//! ==============================================================================

use crate::domain::{Reading, TIMESTAMP_FORMAT};
use crate::error::{Result, StationError};

use chrono::NaiveDateTime;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

fn plot_err(e: impl std::fmt::Display) -> StationError {
    StationError::Plot(e.to_string())
}

/// minutes since the first reading, one per reading
fn elapsed_minutes(readings: &[Reading]) -> Result<Vec<f64>> {
    let times = readings
        .iter()
        .map(|r| {
            NaiveDateTime::parse_from_str(&r.timestamp, TIMESTAMP_FORMAT)
                .map_err(|e| plot_err(format!("bad timestamp {:?}: {}", r.timestamp, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    let first = times[0];
    Ok(times.iter().map(|t| (*t - first).num_seconds() as f64 / 60.0).collect())
}

/// padded value range so flat series still get a visible axis
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (min - 1.0)..(max + 1.0)
}

struct Series<'a> {
    title: &'a str,
    color: RGBColor,
    values: Vec<f64>,
    range: Range<f64>,
}

/// Render `readings` to an svg file at `output`.
pub fn render_chart(readings: &[Reading], output: &Path, size: (u32, u32)) -> Result<()> {
    if readings.is_empty() {
        return Err(StationError::Plot("no readings to plot".to_string()));
    }

    let minutes = elapsed_minutes(readings)?;
    let x_max = minutes.last().copied().unwrap_or(0.0).max(1.0);

    let series = [
        Series {
            title: "Temperature (°C)",
            color: RED,
            values: readings.iter().map(|r| r.temperature).collect(),
            range: value_range(readings.iter().map(|r| r.temperature)),
        },
        Series {
            title: "Humidity (%)",
            color: BLUE,
            values: readings.iter().map(|r| r.humidity).collect(),
            range: value_range(readings.iter().map(|r| r.humidity)),
        },
        Series {
            title: "Rain",
            color: GREEN,
            values: readings.iter().map(|r| f64::from(r.rain)).collect(),
            range: -0.1..1.1,
        },
    ];

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StationError::io(parent, e))?;
    }

    let root = SVGBackend::new(output, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let root = root
        .titled("IoT Weather Sensor Readings", ("sans-serif", 24))
        .map_err(plot_err)?;

    for (area, s) in root.split_evenly((series.len(), 1)).iter().zip(series.iter()) {
        let mut chart = ChartBuilder::on(area)
            .caption(s.title, ("sans-serif", 16))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..x_max, s.range.clone())
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc("Minutes")
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(LineSeries::new(
                minutes.iter().copied().zip(s.values.iter().copied()),
                &s.color,
            ))
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    tracing::info!("[PLOT] Plot saved to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{simulate, SimulationParams};

    #[test]
    fn test_renders_svg() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plots").join("weather.svg");
        let readings = simulate(&SimulationParams::new(30, 60, Some(4))).unwrap();

        render_chart(&readings, &output, (800, 900)).unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Humidity"));
    }

    #[test]
    fn test_single_reading_renders() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("one.svg");
        let readings = simulate(&SimulationParams::new(1, 60, Some(4))).unwrap();
        assert_eq!(readings.len(), 1);
        render_chart(&readings, &output, (400, 600)).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_empty_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_chart(&[], &dir.path().join("x.svg"), (400, 300)).unwrap_err();
        assert!(matches!(err, StationError::Plot(_)));
    }

    #[test]
    fn test_bad_timestamp_is_error() {
        let readings = vec![Reading {
            timestamp: "yesterday".to_string(),
            temperature: 20.0,
            humidity: 50.0,
            rain: 0,
        }];
        let dir = tempfile::tempdir().unwrap();
        assert!(render_chart(&readings, &dir.path().join("x.svg"), (400, 300)).is_err());
    }

    #[test]
    fn test_value_range_pads_flat_series() {
        let range = value_range([20.0, 20.0].into_iter());
        assert_eq!(range, 19.0..21.0);
    }
}
