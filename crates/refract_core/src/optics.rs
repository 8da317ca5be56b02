//! Snell refraction and mirror reflection at a surface.
//!
//! Both functions take unit vectors. The normal passed to [`refract`] must
//! point back toward the incoming side, so that `-n.dot(i)` is the cosine of
//! the angle of incidence.

use refract_math::DVec3;

/// Outcome of refracting across a boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refraction {
    /// The transmitted unit direction.
    Transmitted(DVec3),
    /// No transmitted ray exists: the angle of incidence is past critical.
    TotalInternalReflection,
}

impl Refraction {
    /// The transmitted direction, if there is one.
    pub fn transmitted(self) -> Option<DVec3> {
        match self {
            Refraction::Transmitted(t) => Some(t),
            Refraction::TotalInternalReflection => None,
        }
    }
}

/// Refract `incident` across a surface with normal `normal`, going from a
/// medium of index `n1` into one of index `n2`.
#[inline]
pub fn refract(incident: DVec3, normal: DVec3, n1: f64, n2: f64) -> Refraction {
    let eta = n1 / n2;
    let cos_theta_i = -normal.dot(incident);
    let sin2_theta_t = eta * eta * (1.0 - cos_theta_i * cos_theta_i);
    if sin2_theta_t > 1.0 {
        return Refraction::TotalInternalReflection;
    }

    let cos_theta_t = (1.0 - sin2_theta_t).sqrt();
    let transmitted = eta * incident + (eta * cos_theta_i - cos_theta_t) * normal;
    Refraction::Transmitted(transmitted.normalize())
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(incident: DVec3, normal: DVec3) -> DVec3 {
    (incident - 2.0 * incident.dot(normal) * normal).normalize()
}

/// Sine of the critical angle going from `n1` into `n2`, or `None` when
/// `n1 <= n2` (total internal reflection cannot happen).
pub fn critical_sine(n1: f64, n2: f64) -> Option<f64> {
    (n1 > n2).then(|| n2 / n1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const WATER: f64 = 1.333;
    const AIR: f64 = 1.000293;

    /// Unit direction hitting a +Z-facing surface at `angle` radians from the normal.
    fn incident_at(angle: f64) -> DVec3 {
        DVec3::new(angle.sin(), 0.0, -angle.cos())
    }

    fn random_unit(rng: &mut StdRng) -> DVec3 {
        loop {
            let v = DVec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let len_sq = v.length_squared();
            if len_sq > 1e-6 && len_sq <= 1.0 {
                return v / len_sq.sqrt();
            }
        }
    }

    #[test]
    fn test_normal_incidence_passes_straight() {
        let i = DVec3::new(0.0, 0.0, -1.0);
        let t = refract(i, DVec3::Z, AIR, WATER).transmitted().unwrap();
        assert!(t.abs_diff_eq(i, 1e-12));
    }

    #[test]
    fn test_snell_law_holds() {
        let n = DVec3::Z;
        for deg in [5.0_f64, 20.0, 45.0, 70.0, 89.0] {
            let theta_i = deg.to_radians();
            let t = refract(incident_at(theta_i), n, AIR, WATER)
                .transmitted()
                .unwrap();

            assert!((t.length() - 1.0).abs() < 1e-12);
            // Transmitted ray keeps travelling into the surface
            assert!(t.z < 0.0);
            let sin_t = t.cross(-n).length();
            assert!(
                (AIR * theta_i.sin() - WATER * sin_t).abs() < 1e-9,
                "Snell violated at {deg} degrees"
            );
        }
    }

    #[test]
    fn test_refraction_reversible() {
        let mut rng = StdRng::seed_from_u64(42);
        let pairs = [(AIR, WATER), (WATER, AIR), (1.0, 1.5), (1.342, 1.331)];

        let mut checked = 0;
        for _ in 0..500 {
            let n = random_unit(&mut rng);
            let mut i = random_unit(&mut rng);
            if i.dot(n) > 0.0 {
                i = -i;
            }
            for (n1, n2) in pairs {
                let Some(t) = refract(i, n, n1, n2).transmitted() else {
                    continue;
                };
                let Some(back) = refract(-t, -n, n2, n1).transmitted() else {
                    continue;
                };
                // Reversing the transmitted ray retraces the incident one
                assert!(
                    back.abs_diff_eq(-i, 1e-8),
                    "i={i:?} n={n:?} ({n1}, {n2}) back={back:?}"
                );
                checked += 1;
            }
        }
        assert!(checked > 1000);
    }

    #[test]
    fn test_total_internal_reflection_at_critical_angle() {
        let n = DVec3::Z;
        for (n1, n2) in [(WATER, AIR), (1.342, 1.0), (1.5, 1.0), (2.4, 1.333)] {
            let critical = critical_sine(n1, n2).unwrap().asin();

            // Sweep across the critical angle; TIR exactly when (n1/n2)^2 sin^2 > 1
            for k in 0..=900 {
                let theta = (k as f64) * 0.1_f64.to_radians();
                let ratio = n1 / n2;
                let sin2 = 1.0 - theta.cos().powi(2);
                let expect_tir = ratio * ratio * sin2 > 1.0;
                let result = refract(incident_at(theta), n, n1, n2);
                assert_eq!(
                    result == Refraction::TotalInternalReflection,
                    expect_tir,
                    "theta={theta} n1={n1} n2={n2}"
                );
            }

            assert!(refract(incident_at(critical - 1e-6), n, n1, n2)
                .transmitted()
                .is_some());
            assert_eq!(
                refract(incident_at(critical + 1e-6), n, n1, n2),
                Refraction::TotalInternalReflection
            );
        }
    }

    #[test]
    fn test_no_tir_into_denser_medium() {
        assert_eq!(critical_sine(AIR, WATER), None);
        assert!(refract(incident_at(1.5), DVec3::Z, AIR, WATER)
            .transmitted()
            .is_some());
    }

    #[test]
    fn test_reflect() {
        let i = DVec3::new(1.0, 0.0, -1.0).normalize();
        let r = reflect(i, DVec3::Z);
        assert!(r.abs_diff_eq(DVec3::new(1.0, 0.0, 1.0).normalize(), 1e-12));
    }

    #[test]
    fn test_reflect_twice_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let i = random_unit(&mut rng);
            let n = random_unit(&mut rng);
            let twice = reflect(reflect(i, n), n);
            assert!(twice.abs_diff_eq(i, 1e-12));
        }
    }
}
