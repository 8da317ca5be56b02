//! Cylindrical beam of parallel rays.

use std::f64::consts::TAU;

use refract_math::{unit, DVec3};

use crate::config::BeamConfig;
use crate::error::{ConfigError, ConfigResult};

/// Unit incident direction from azimuth and elevation in degrees.
pub fn incident_direction(theta_deg: f64, phi_deg: f64) -> DVec3 {
    let (sin_theta, cos_theta) = theta_deg.to_radians().sin_cos();
    let (sin_phi, cos_phi) = phi_deg.to_radians().sin_cos();
    DVec3::new(cos_phi * cos_theta, cos_phi * sin_theta, sin_phi).normalize()
}

/// Two unit vectors orthogonal to `d` and to each other.
///
/// `d` must be unit length. The helper axis is X unless `d` is within 0.9 of
/// it, in which case Y is used.
pub fn perpendicular_pair(d: DVec3) -> (DVec3, DVec3) {
    let helper = if d.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    let v1 = d.cross(helper).normalize();
    let v2 = d.cross(v1).normalize();
    (v1, v2)
}

/// Parallel ray origins on a circle orthogonal to the incident direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    direction: DVec3,
    center: DVec3,
    origins: Vec<DVec3>,
}

impl Beam {
    /// Beam aimed at `target` along the direction given by the config's angles.
    pub fn cylinder(target: DVec3, config: &BeamConfig) -> ConfigResult<Self> {
        config.validate()?;
        let direction = incident_direction(config.theta_deg, config.phi_deg);
        Self::along(
            target,
            direction,
            config.num_rays,
            config.cylinder_radius,
            config.distance,
        )
    }

    /// Beam aimed at `target` along an arbitrary direction, normalized here.
    pub fn along(
        target: DVec3,
        direction: DVec3,
        num_rays: usize,
        cylinder_radius: f64,
        distance: f64,
    ) -> ConfigResult<Self> {
        let direction = unit(direction).ok_or(ConfigError::DegenerateDirection)?;
        BeamConfig {
            num_rays,
            cylinder_radius,
            distance,
            ..Default::default()
        }
        .validate()?;

        let (v1, v2) = perpendicular_pair(direction);
        let center = target - direction * distance;
        let origins = (0..num_rays)
            .map(|k| {
                let angle = TAU * k as f64 / num_rays as f64;
                let (sin, cos) = angle.sin_cos();
                center + cylinder_radius * (cos * v1 + sin * v2)
            })
            .collect();

        Ok(Self {
            direction,
            center,
            origins,
        })
    }

    /// Unit direction shared by every ray in the beam.
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Point on the beam axis the origins are arranged around.
    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn origins(&self) -> &[DVec3] {
        &self.origins
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}
