//! Core units, constants, and shared primitives for the asteroid haul workspace.

/// Physical constants. Heliocentric quantities use AU and years, planetary ones km and seconds.
pub mod constants {
    /// Standard gravity used by the rocket equation (m/s²).
    pub const G0: f64 = 9.81;
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Days per Julian year.
    pub const DAYS_PER_YEAR: f64 = 365.25;
    /// Sun's gravitational parameter (AU³/yr²).
    pub const MU_SUN_AU3_YR2: f64 = 39.478;
    /// Earth's standard gravitational parameter (km³/s²).
    pub const MU_EARTH_KM3_S2: f64 = 398_600.4418;
    /// One AU per year expressed in km/s.
    pub const AU_PER_YEAR_KM_S: f64 = AU_KM / (DAYS_PER_YEAR * SECONDS_PER_DAY);
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::AU_PER_YEAR_KM_S;

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert a heliocentric speed in AU/yr to km/s.
    #[inline]
    pub fn au_per_year_to_km_s(v: f64) -> f64 {
        v * AU_PER_YEAR_KM_S
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::DAYS_PER_YEAR;

    /// Convert years to days.
    #[inline]
    pub fn years_to_days(years: f64) -> f64 {
        years * DAYS_PER_YEAR
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU or AU/yr depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
        norm(&sub(a, b))
    }

    /// Cross product `a × b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Angle between two vectors in radians, in `[0, π]`. Zero if either vector is null.
    ///
    /// Uses `atan2(|a × b|, a · b)`, which stays exact for parallel and nearly parallel vectors.
    pub fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
        if norm(a) < 1e-12 || norm(b) < 1e-12 {
            return 0.0;
        }
        norm(&cross(a, b)).atan2(dot(a, b))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn identical_vectors_have_zero_angle() {
            let v = [1.2, -0.4, 0.05];
            assert_eq!(angle_between(&v, &v), 0.0);
        }

        #[test]
        fn nearly_parallel_vectors_keep_their_angle() {
            let theta = angle_between(&[1.0, 0.0, 0.0], &[1.0, 1e-9, 0.0]);
            assert!((theta - 1e-9).abs() < 1e-18, "theta = {theta}");
        }

        #[test]
        fn opposite_vectors_are_pi_apart() {
            let theta = angle_between(&[1.0, 0.0, 0.0], &[-2.0, 0.0, 0.0]);
            assert!((theta - std::f64::consts::PI).abs() < 1e-15);
        }
    }
}
