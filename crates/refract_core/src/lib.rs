//! Refractulator core - light paths through a spherical water droplet.
//!
//! Traces parallel rays into a sphere, refracts them at entry, reflects them
//! once off the far wall and refracts them again on the way out. Each color
//! band is traced with its own refractive index, so the outgoing rays fan out
//! the way a primary rainbow does.
//!
//! # Example
//!
//! ```
//! use refract_core::{BeamConfig, Droplet, Execution};
//!
//! let droplet = Droplet::default();
//! let (beam, result) = droplet
//!     .trace_beam(&BeamConfig::default(), Execution::Sequential)
//!     .unwrap();
//! assert!(result.paths.len() <= 6 * beam.len());
//! ```

mod batch;
mod beam;
mod config;
mod droplet;
mod error;
mod optics;
mod path;
mod spectrum;
mod sphere;

pub use batch::{BatchReport, BatchResult, Execution};
pub use beam::{incident_direction, perpendicular_pair, Beam};
pub use config::{
    BeamConfig, DropletConfig, BOUNCE_T_MIN, DEFAULT_EXIT_EXTENSION, DEFAULT_STANDOFF,
    DEFAULT_SUN_DISTANCE, ENTRY_T_MIN,
};
pub use droplet::{Discard, Droplet, Trace, TraceOutcome};
pub use error::{ConfigError, ConfigResult};
pub use optics::{critical_sine, reflect, refract, Refraction};
pub use path::{PathSegments, RayPath, Segment};
pub use spectrum::{Band, RefractiveIndexTable, AIR_INDEX};
pub use sphere::{Intersection, Sphere};

/// Re-export the math types used in the public API
pub use refract_math::{DVec3, Interval, Ray};
