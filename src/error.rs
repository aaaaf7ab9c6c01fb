//! Crate-level error types.

use std::fmt;

/// Errors produced by the quake crate.
#[derive(Debug)]
pub enum ShakeError {
    /// A shake parameter was out of range or inconsistent with another.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Value that was rejected.
        value: f32,
        /// Constraint the value violated.
        reason: &'static str,
    },
    /// Generic I/O failure while reading or writing options.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl ShakeError {
    pub(crate) fn invalid(
        name: &'static str,
        value: f32,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Whether this is an [`ShakeError::InvalidParameter`] for `name`.
    #[must_use]
    pub fn is_invalid(&self, name: &str) -> bool {
        matches!(self, Self::InvalidParameter { name: n, .. } if *n == name)
    }
}

impl fmt::Display for ShakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid {name} ({value}): {reason}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ShakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShakeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display_names_the_field() {
        let err = ShakeError::invalid("roughness", -2.0, "must be >= 0");
        assert_eq!(err.to_string(), "invalid roughness (-2): must be >= 0");
        assert!(err.is_invalid("roughness"));
        assert!(!err.is_invalid("magnitude"));
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error;
        let err = ShakeError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
    }
}
