//! Logging macros for the planning engines with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Verbosity levels are the `verbosity` field of `ScheduleConfig` and `EstimateConfig`:
//! - 0: SILENT (nothing)
//! - 1: CHANGES (phase placements, pattern totals)
//! - 2: CHECKS (fixed-date overrides, coercions, chosen price keys)
//! - 3: DEBUG (holiday set sizes, every lookup candidate)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: phase placements, per-pattern totals.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: fixed-date overrides, duration coercions, price keys picked by lookup.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_silent_verbosity_evaluates_nothing() {
        let mut touched = false;
        let mut touch = || {
            touched = true;
            "x"
        };
        log_changes!(VERBOSITY_SILENT, "phase {}", touch());
        log_checks!(VERBOSITY_CHANGES, "lookup {}", touch());
        log_debug!(VERBOSITY_CHECKS, "candidate {}", touch());
        assert!(!touched);
    }
}
