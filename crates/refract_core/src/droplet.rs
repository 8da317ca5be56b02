//! Single-ray tracer: entry refraction, one internal reflection, exit refraction.

use log::{debug, trace};
use refract_math::{DVec3, Interval, Ray};

use crate::config::{DropletConfig, BOUNCE_T_MIN, DEFAULT_SUN_DISTANCE, ENTRY_T_MIN};
use crate::error::{ensure_finite, ConfigError, ConfigResult};
use crate::optics::{critical_sine, reflect, refract, Refraction};
use crate::path::{PathSegments, RayPath, Segment};
use crate::{Band, RefractiveIndexTable, Sphere};

/// Stage at which a ray left the trace without producing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discard {
    /// The incoming ray never reaches the sphere.
    MissedEntry,
    /// No transmitted ray at the entry point.
    EntryTotalReflection,
    /// The refracted ray found no second surface point.
    NoInternalBounce,
    /// The reflected ray found no exit point.
    NoExit,
    /// No transmitted ray at the exit point.
    ExitTotalReflection,
}

/// Surface points and exit direction of a ray that made it through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    pub band: Band,
    pub origin: DVec3,
    pub entry: DVec3,
    pub bounce: DVec3,
    pub exit: DVec3,
    /// Unit direction of the ray after leaving the droplet
    pub exit_direction: DVec3,
}

impl Trace {
    /// Package as drawable segments, extending the outgoing leg by `extension`.
    pub fn to_path(&self, extension: f64) -> RayPath {
        RayPath {
            band: self.band,
            segments: PathSegments {
                incoming: Segment::new(self.origin, self.entry),
                inside1: Segment::new(self.entry, self.bounce),
                inside2: Segment::new(self.bounce, self.exit),
                outgoing: Segment::new(self.exit, self.exit + self.exit_direction * extension),
            },
        }
    }

    /// Angle in degrees between the incident and the outgoing direction,
    /// measured so that a ray sent straight back scores 0.
    pub fn deviation_from_backscatter(&self, incident: DVec3) -> f64 {
        (-incident)
            .dot(self.exit_direction)
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
    }
}

/// Result of tracing one (origin, band) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceOutcome {
    Emitted(Trace),
    Discarded(Discard),
}

impl TraceOutcome {
    pub fn trace(self) -> Option<Trace> {
        match self {
            TraceOutcome::Emitted(t) => Some(t),
            TraceOutcome::Discarded(_) => None,
        }
    }
}

/// A validated droplet: the sphere, the surrounding medium and the per-color
/// index table. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Droplet {
    sphere: Sphere,
    outside_index: f64,
    table: RefractiveIndexTable,
    exit_extension: f64,
}

impl Droplet {
    /// Validate `config` and build the droplet.
    pub fn new(config: DropletConfig) -> ConfigResult<Self> {
        let sphere = Sphere::new(config.center, config.radius)?;
        let outside_index = ensure_finite("outside index", config.outside_index)?;
        if outside_index <= 0.0 {
            return Err(ConfigError::NonPositiveOutsideIndex(outside_index));
        }
        let exit_extension = ensure_finite("exit extension", config.exit_extension)?;
        if exit_extension <= 0.0 {
            return Err(ConfigError::NonPositiveExtension(exit_extension));
        }
        for (band, index) in config.table.iter() {
            match critical_sine(index, outside_index) {
                Some(sine) => debug!(
                    "{band}: n = {index}, exit critical angle {:.2} deg",
                    sine.asin().to_degrees()
                ),
                None => debug!("{band}: n = {index}, no total internal reflection on exit"),
            }
        }
        Ok(Self {
            sphere,
            outside_index,
            table: config.table,
            exit_extension,
        })
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    pub fn outside_index(&self) -> f64 {
        self.outside_index
    }

    pub fn table(&self) -> &RefractiveIndexTable {
        &self.table
    }

    pub fn exit_extension(&self) -> f64 {
        self.exit_extension
    }

    /// Position of a sun marker `distance` units back along the incident direction.
    pub fn sun_position(&self, direction: DVec3, distance: f64) -> DVec3 {
        self.sphere.center() - direction * distance
    }

    /// Sun marker at the default distance.
    pub fn default_sun_position(&self, direction: DVec3) -> DVec3 {
        self.sun_position(direction, DEFAULT_SUN_DISTANCE)
    }

    /// Trace one ray of the given band through the droplet.
    ///
    /// `direction` must be unit length. `index` is the droplet's refractive
    /// index for `band`.
    pub fn trace_ray(&self, origin: DVec3, direction: DVec3, band: Band, index: f64) -> TraceOutcome {
        let sphere = &self.sphere;

        // Entry
        let incoming = Ray::new(origin, direction);
        let Some((_, entry)) = sphere.hit(&incoming, Interval::above(ENTRY_T_MIN)) else {
            return TraceOutcome::Discarded(Discard::MissedEntry);
        };
        let normal = sphere.outward_normal(entry);
        let inside = match refract(direction, normal, self.outside_index, index) {
            Refraction::Transmitted(t) => t,
            Refraction::TotalInternalReflection => {
                return TraceOutcome::Discarded(Discard::EntryTotalReflection)
            }
        };

        // Internal bounce
        let Some((_, bounce)) = sphere.hit(&Ray::new(entry, inside), Interval::above(BOUNCE_T_MIN))
        else {
            return TraceOutcome::Discarded(Discard::NoInternalBounce);
        };
        let reflected = reflect(inside, sphere.outward_normal(bounce));

        // Exit
        let Some((_, exit)) = sphere.hit(&Ray::new(bounce, reflected), Interval::above(BOUNCE_T_MIN))
        else {
            return TraceOutcome::Discarded(Discard::NoExit);
        };
        let inward = -sphere.outward_normal(exit);
        let exit_direction = match refract(reflected, inward, index, self.outside_index) {
            Refraction::Transmitted(t) => t,
            Refraction::TotalInternalReflection => {
                return TraceOutcome::Discarded(Discard::ExitTotalReflection)
            }
        };

        TraceOutcome::Emitted(Trace {
            band,
            origin,
            entry,
            bounce,
            exit,
            exit_direction,
        })
    }

    /// Trace one ray and package it with this droplet's exit extension.
    pub fn trace_path(&self, origin: DVec3, direction: DVec3, band: Band) -> Option<RayPath> {
        let Some(index) = self.table.get(band) else {
            trace!("no refractive index for {band}");
            return None;
        };
        self.trace_ray(origin, direction, band, index)
            .trace()
            .map(|t| t.to_path(self.exit_extension))
    }
}

impl Default for Droplet {
    fn default() -> Self {
        Self {
            sphere: Sphere::unit(),
            outside_index: crate::AIR_INDEX,
            table: RefractiveIndexTable::water(),
            exit_extension: crate::DEFAULT_EXIT_EXTENSION,
        }
    }
}
