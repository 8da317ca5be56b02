// Re-export glam for convenience
pub use glam::*;

// Refractulator math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Normalize `v`, or `None` when it has no usable length (zero, NaN or infinite).
#[inline]
pub fn unit(v: DVec3) -> Option<DVec3> {
    v.try_normalize()
}
