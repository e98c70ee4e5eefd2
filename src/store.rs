//! read side of the readings file.
//!
//! every call re-reads the whole file. a missing file, an empty file and a
//! header-only file all mean "no data" (`Ok(None)`); a malformed row is an error.

use crate::domain::Reading;
use crate::error::{Result, StationError};

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Open the readings file, or `None` when it does not exist.
fn open(path: &Path) -> Result<Option<csv::Reader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(csv::Reader::from_reader(file))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StationError::io(path, e)),
    }
}

/// Load the most recent reading (the last row in file order).
pub fn load_latest_reading(path: &Path) -> Result<Option<Reading>> {
    let Some(mut reader) = open(path)? else {
        tracing::debug!(path = %path.display(), "readings file not found");
        return Ok(None);
    };

    let headers = reader.headers()?.clone();
    let mut last = None;
    for record in reader.records() {
        last = Some(record?);
    }

    match last {
        Some(record) => Ok(Some(record.deserialize(Some(&headers))?)),
        None => Ok(None),
    }
}

/// Load every reading in file order. A missing file yields an empty list.
pub fn load_readings(path: &Path) -> Result<Vec<Reading>> {
    let Some(mut reader) = open(path)? else {
        return Ok(Vec::new());
    };
    let readings = reader.deserialize().collect::<std::result::Result<Vec<Reading>, _>>()?;
    Ok(readings)
}
