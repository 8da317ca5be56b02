//! Sphere primitive and the ray/sphere quadratic.

use crate::error::{ensure_finite, ConfigError, ConfigResult};
use refract_math::{DVec3, Interval, Ray};

/// Result of solving the ray/sphere quadratic.
///
/// Roots are returned unfiltered; which one is physically meaningful depends
/// on the call site, see [`Intersection::first_in`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// Discriminant is negative: the line never touches the sphere.
    Miss,
    /// Both roots of the quadratic, `near <= far` when the direction is non-zero.
    Roots { near: f64, far: f64 },
}

impl Intersection {
    /// Smallest root strictly inside `ray_t`, if any.
    pub fn first_in(&self, ray_t: Interval) -> Option<f64> {
        match *self {
            Intersection::Miss => None,
            Intersection::Roots { near, far } => {
                let (lo, hi) = if near <= far { (near, far) } else { (far, near) };
                if ray_t.surrounds(lo) {
                    Some(lo)
                } else if ray_t.surrounds(hi) {
                    Some(hi)
                } else {
                    None
                }
            }
        }
    }
}

/// The refracting body: a sphere that stays fixed for the whole trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: DVec3, radius: f64) -> ConfigResult<Self> {
        if !center.is_finite() {
            return Err(ConfigError::NonFinite { field: "sphere center" });
        }
        let radius = ensure_finite("sphere radius", radius)?;
        if radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// Unit sphere at the origin.
    pub fn unit() -> Self {
        Self {
            center: DVec3::ZERO,
            radius: 1.0,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Solve `|P0 + tD - C|^2 = r^2` for t.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Intersection::Miss;
        }

        let sqrtd = discriminant.sqrt();
        Intersection::Roots {
            near: (-b - sqrtd) / (2.0 * a),
            far: (-b + sqrtd) / (2.0 * a),
        }
    }

    /// First hit along `ray` strictly inside `ray_t`, as (t, point).
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f64, DVec3)> {
        let t = self.intersect(ray).first_in(ray_t)?;
        Some((t, ray.at(t)))
    }

    /// True when `p` is inside the sphere or on its surface.
    pub fn contains(&self, p: DVec3) -> bool {
        (p - self.center).length_squared() <= self.radius * self.radius
    }

    /// Outward unit normal at a point on the surface.
    pub fn outward_normal(&self, p: DVec3) -> DVec3 {
        (p - self.center).normalize()
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::unit()
    }
}
