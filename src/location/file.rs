//! Location fixes read from a JSON file.
//!
//! Some external tool (a GPS daemon hook, a phone sync script) writes the last
//! known fix to disk:
//!
//! ```json
//! { "latitude": 37.7749, "longitude": -122.4194, "timestamp": 1718000000 }
//! ```
//!
//! `timestamp` is optional Unix seconds. Fixes older than [`MAX_FIX_AGE_SECS`]
//! are treated as absent.

use super::provider::{LocationProvider, Permission};
use crate::domain::error::{Result, TruckmapError};
use crate::domain::Coordinate;
use crate::infrastructure::paths::expand_tilde;
use serde::Deserialize;
use std::path::PathBuf;

/// Maximum age of a usable fix (15 minutes).
pub const MAX_FIX_AGE_SECS: i64 = 15 * 60;

#[derive(Debug, Deserialize)]
struct LocationFix {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timestamp: Option<i64>,
}

/// Reads the device location from a JSON fix file.
#[derive(Debug, Clone)]
pub struct FileLocation {
    file_path: PathBuf,
}

impl FileLocation {
    /// `path` may start with `~`, which maps to the sandbox host directory.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            file_path: PathBuf::from(expand_tilde(path)),
        }
    }

    #[must_use]
    pub fn from_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    /// Reads and validates the fix, checking freshness against `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, the coordinate is
    /// invalid, or the fix is stale or timestamped in the future.
    pub fn read_fix(&self, now: i64) -> Result<Coordinate> {
        let contents = std::fs::read_to_string(&self.file_path)?;
        let fix: LocationFix = serde_json::from_str(&contents)
            .map_err(|e| TruckmapError::Location(format!("failed to parse fix: {e}")))?;

        let coordinate = Coordinate::new(fix.latitude, fix.longitude);
        if !coordinate.is_valid() {
            return Err(TruckmapError::Location("fix has an invalid coordinate".to_string()));
        }

        if let Some(taken_at) = fix.timestamp {
            match now.checked_sub(taken_at) {
                Some(age) if (0..=MAX_FIX_AGE_SECS).contains(&age) => {}
                Some(age) if age < 0 => {
                    return Err(TruckmapError::Location(format!("fix is {}s in the future", age.unsigned_abs())));
                }
                Some(age) => return Err(TruckmapError::Location(format!("fix is {age}s old"))),
                None => {
                    return Err(TruckmapError::Location(format!("fix timestamp {taken_at} is out of range")));
                }
            }
        }

        Ok(coordinate)
    }
}

impl LocationProvider for FileLocation {
    fn request_permission(&mut self) -> Permission {
        if self.file_path.is_file() {
            Permission::Granted
        } else {
            tracing::debug!(path = ?self.file_path, "location file missing");
            Permission::Denied
        }
    }

    fn current_coordinate(&mut self) -> Option<Coordinate> {
        let now = chrono::Utc::now().timestamp();
        match self.read_fix(now) {
            Ok(coordinate) => Some(coordinate),
            Err(e) => {
                tracing::debug!(path = ?self.file_path, error = %e, "no usable location fix");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::resolve;
    use std::io::Write;

    fn fix_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn fresh_fix_resolves() {
        let file = fix_file(r#"{"latitude": 37.7749, "longitude": -122.4194, "timestamp": 1000}"#);
        let provider = FileLocation::from_path(file.path().to_path_buf());
        assert_eq!(provider.read_fix(1000 + 60).unwrap(), Coordinate::new(37.7749, -122.4194));
    }

    #[test]
    fn stale_fix_is_rejected() {
        let file = fix_file(r#"{"latitude": 37.7749, "longitude": -122.4194, "timestamp": 1000}"#);
        let provider = FileLocation::from_path(file.path().to_path_buf());
        assert!(provider.read_fix(1000 + MAX_FIX_AGE_SECS + 1).is_err());
    }

    #[test]
    fn future_fix_is_rejected() {
        let file = fix_file(r#"{"latitude": 1, "longitude": 2, "timestamp": 99999999999}"#);
        let provider = FileLocation::from_path(file.path().to_path_buf());
        assert!(provider.read_fix(1_700_000_000).is_err());
    }

    #[test]
    fn extreme_timestamps_yield_no_coordinate() {
        let file = fix_file(r#"{"latitude": 1, "longitude": 2, "timestamp": -9223372036854775808}"#);
        let mut provider = FileLocation::from_path(file.path().to_path_buf());
        assert!(provider.read_fix(1_700_000_000).is_err());
        assert_eq!(resolve(&mut provider), None);

        let file = fix_file(r#"{"latitude": 1, "longitude": 2, "timestamp": 9223372036854775807}"#);
        let provider = FileLocation::from_path(file.path().to_path_buf());
        assert!(provider.read_fix(-1_000).is_err());
    }

    #[test]
    fn untimestamped_fix_resolves_through_provider() {
        let file = fix_file(r#"{"latitude": 1.5, "longitude": 2.5}"#);
        let mut provider = FileLocation::from_path(file.path().to_path_buf());
        assert_eq!(resolve(&mut provider), Some(Coordinate::new(1.5, 2.5)));
    }

    #[test]
    fn missing_file_is_denied() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = FileLocation::from_path(dir.path().join("fix.json"));
        assert_eq!(provider.request_permission(), Permission::Denied);
        assert_eq!(resolve(&mut provider), None);
    }

    #[test]
    fn garbage_yields_no_coordinate() {
        let file = fix_file("not json");
        let mut provider = FileLocation::from_path(file.path().to_path_buf());
        assert_eq!(resolve(&mut provider), None);
    }
}
