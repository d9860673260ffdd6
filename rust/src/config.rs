//! Configuration types for the schedule and estimate engines.

use pyo3::prelude::*;

/// Configuration for sequencing and calendar expansion.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleConfig {
    /// Initial holiday horizon in years from the base date; sequencing widens it
    /// to cover pinned dates and the last phase end
    #[pyo3(get, set)]
    pub horizon_years: u32,
    /// Maximum number of calendar rows kept after expansion
    #[pyo3(get, set)]
    pub max_calendar_rows: usize,
    /// Treat Dec 29 - Jan 3 as non-working every year
    #[pyo3(get, set)]
    pub year_end_block: bool,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            horizon_years: 1,
            max_calendar_rows: 60,
            year_end_block: true,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (
        horizon_years=None,
        max_calendar_rows=None,
        year_end_block=None,
        verbosity=None
    ))]
    fn new(
        horizon_years: Option<u32>,
        max_calendar_rows: Option<usize>,
        year_end_block: Option<bool>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            // horizon is at least one year
            horizon_years: horizon_years.unwrap_or(defaults.horizon_years).max(1),
            max_calendar_rows: max_calendar_rows.unwrap_or(defaults.max_calendar_rows),
            year_end_block: year_end_block.unwrap_or(defaults.year_end_block),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(horizon_years={}, max_calendar_rows={}, year_end_block={})",
            self.horizon_years, self.max_calendar_rows, self.year_end_block
        )
    }
}

/// Configuration for the cost estimate.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct EstimateConfig {
    /// Labour cost of one person-hour, in yen
    #[pyo3(get, set)]
    pub hourly_rate: f64,
    /// Divisor converting yen into the display unit (10,000 yen = 1 man-yen)
    #[pyo3(get, set)]
    pub display_divisor: f64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            hourly_rate: 15000.0,
            display_divisor: 10000.0,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl EstimateConfig {
    #[new]
    #[pyo3(signature = (hourly_rate=None, display_divisor=None, verbosity=None))]
    fn new(hourly_rate: Option<f64>, display_divisor: Option<f64>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            hourly_rate: hourly_rate.unwrap_or(defaults.hourly_rate),
            display_divisor: display_divisor.unwrap_or(defaults.display_divisor),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "EstimateConfig(hourly_rate={}, display_divisor={})",
            self.hourly_rate, self.display_divisor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_overrides_fall_back_to_defaults() {
        let config = ScheduleConfig::new(None, Some(30), None, Some(2));
        assert_eq!(config.horizon_years, 1);
        assert_eq!(config.max_calendar_rows, 30);
        assert!(config.year_end_block);
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn test_schedule_horizon_floor() {
        let config = ScheduleConfig::new(Some(0), None, None, None);
        assert_eq!(config.horizon_years, 1);
    }

    #[test]
    fn test_estimate_defaults() {
        let config = EstimateConfig::new(None, None, None);
        assert_eq!(config, EstimateConfig::default());
        assert_eq!(config.hourly_rate, 15000.0);
        assert_eq!(config.display_divisor, 10000.0);
    }
}
