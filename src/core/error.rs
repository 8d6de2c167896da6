use thiserror::Error;

/// Result type for engine operations
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Data errors detected before a playback session starts.
///
/// None of these are retried: the caller is expected to pick a different
/// lap (another driver, another session) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// Too few samples for the requested operation, or a non-finite value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Elapsed time went backwards between two consecutive samples
    #[error("elapsed time decreases at sample {index}: {previous} -> {current}")]
    NonMonotonicTime {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// Every position sample is the same point, so no axis bounds exist
    #[error("degenerate track: all position samples are identical")]
    DegenerateTrack,
}

impl ReplayError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Reject a channel that contains NaN or infinite values
pub fn ensure_finite(channel: &str, values: &[f64]) -> ReplayResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(ReplayError::invalid_input(format!(
            "{} channel has non-finite value {} at index {}",
            channel, values[idx], idx
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert!(ReplayError::invalid_input("x")
            .to_string()
            .starts_with("invalid input:"));

        let err = ReplayError::NonMonotonicTime {
            index: 2,
            previous: 0.5,
            current: 0.3,
        };
        assert_eq!(err.to_string(), "elapsed time decreases at sample 2: 0.5 -> 0.3");
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("speed", &[1.0, 2.0]).is_ok());

        let err = ensure_finite("speed", &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidInput(_)));
        assert!(err.to_string().contains("index 1"));

        assert!(ensure_finite("x", &[f64::INFINITY]).is_err());
    }
}
