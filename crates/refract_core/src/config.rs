//! Droplet and beam configuration.

use refract_math::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ConfigError, ConfigResult};
use crate::spectrum::{RefractiveIndexTable, AIR_INDEX};

/// Minimum ray parameter accepted when a ray from outside enters the sphere.
pub const ENTRY_T_MIN: f64 = 0.0;

/// Minimum ray parameter accepted for the internal bounce and the exit.
///
/// Those rays start on the surface, so one root sits at t = 0 up to rounding;
/// this threshold skips it. Raise it when tracing very large spheres.
pub const BOUNCE_T_MIN: f64 = 1e-6;

/// How far the exiting ray is drawn past the exit point.
pub const DEFAULT_EXIT_EXTENSION: f64 = 10.0;

/// Distance of the beam origin plane behind the sphere center.
pub const DEFAULT_STANDOFF: f64 = 5.0;

/// Distance used for the sun marker.
pub const DEFAULT_SUN_DISTANCE: f64 = 10.0;

/// Droplet configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropletConfig {
    /// Sphere radius
    pub radius: f64,
    /// Sphere center
    pub center: DVec3,
    /// Refractive index of the surrounding medium
    pub outside_index: f64,
    /// Droplet refractive index per color
    pub table: RefractiveIndexTable,
    /// Length of the drawn outgoing segment. Presentation only.
    pub exit_extension: f64,
}

impl Default for DropletConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            center: DVec3::ZERO,
            outside_index: AIR_INDEX,
            table: RefractiveIndexTable::water(),
            exit_extension: DEFAULT_EXIT_EXTENSION,
        }
    }
}

/// Cylindrical beam parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Number of rays around the circle
    pub num_rays: usize,
    /// Radius of the circle the origins lie on
    pub cylinder_radius: f64,
    /// Azimuth of the incident direction, degrees
    pub theta_deg: f64,
    /// Elevation of the incident direction, degrees
    pub phi_deg: f64,
    /// Standoff of the origin plane behind the sphere center
    pub distance: f64,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            num_rays: 100,
            cylinder_radius: 0.5,
            theta_deg: 120.0,
            phi_deg: -30.0,
            distance: DEFAULT_STANDOFF,
        }
    }
}

impl BeamConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_rays == 0 {
            return Err(ConfigError::EmptyBeam);
        }
        let radius = ensure_finite("beam radius", self.cylinder_radius)?;
        if radius <= 0.0 {
            return Err(ConfigError::NonPositiveBeamRadius(radius));
        }
        ensure_finite("azimuth", self.theta_deg)?;
        ensure_finite("elevation", self.phi_deg)?;
        let distance = ensure_finite("standoff distance", self.distance)?;
        if distance <= 0.0 {
            return Err(ConfigError::NonPositiveDistance(distance));
        }
        Ok(())
    }
}
