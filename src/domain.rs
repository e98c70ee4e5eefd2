use serde::{Deserialize, Serialize};

/// timestamp layout shared by the generator and the chart.
/// the trailing `Z` is a literal appended to utc wall-clock time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// one sampled sensor record
/// field order is the column order of the readings file
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Reading {
    /// iso-8601, second precision, e.g. "2024-01-01T00:00:00Z"
    pub timestamp: String,

    /// temperature in celsius, 2 decimals
    pub temperature: f64,

    /// relative humidity (30-90%), 2 decimals
    pub humidity: f64,

    /// rain indicator, 0 or 1
    pub rain: u8,
}

impl Reading {
    /// header row of the readings file
    pub const COLUMNS: [&'static str; 4] = ["timestamp", "temperature", "humidity", "rain"];
}

/// round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(20.344), 20.34);
        assert_eq!(round2(20.346), 20.35);
        assert_eq!(round2(-1.004), -1.0);
    }

    #[test]
    fn test_reading_serializes_with_column_names() {
        let reading = Reading {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            temperature: 20.34,
            humidity: 55.12,
            rain: 0,
        };
        let json = serde_json::to_value(&reading).unwrap();
        for column in Reading::COLUMNS {
            assert!(json.get(column).is_some(), "missing {column}");
        }
        assert_eq!(json["rain"], 0);
    }
}
