//! Configuration errors.
//!
//! Only degenerate input is an error. A ray that misses the droplet or is
//! totally internally reflected is a physical outcome and is reported
//! through [`crate::TraceOutcome`] instead.

use refract_math::DVec3;
use thiserror::Error;

use crate::Band;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Sphere radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("Refractive index for {band} must be positive, got {index}")]
    NonPositiveIndex { band: Band, index: f64 },

    #[error("Outside medium refractive index must be positive, got {0}")]
    NonPositiveOutsideIndex(f64),

    #[error("Refractive index table is empty")]
    EmptyTable,

    #[error("Refractive index table lists {0} more than once")]
    DuplicateBand(Band),

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("Direction vector has zero length")]
    DegenerateDirection,

    #[error("Beam needs at least one ray")]
    EmptyBeam,

    #[error("Beam radius must be positive, got {0}")]
    NonPositiveBeamRadius(f64),

    #[error("Standoff distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("Exit extension must be positive, got {0}")]
    NonPositiveExtension(f64),

    #[error("Ray origin {0:?} is not outside the droplet")]
    OriginInsideDroplet(DVec3),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reject NaN and infinities before any other range check.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}
