//! Destination price curves.

/// Price per kg as a pure function of the asteroid's perihelion weight and a uniform draw.
///
/// The perihelion weight runs from 1 at the start of the cycle down to 0 at its end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceCurve {
    /// `base + draw·spread`
    Flat { base: f64, spread: f64 },
    /// `base + w·weight + draw·spread`
    Perihelion { base: f64, weight: f64, spread: f64 },
    /// `base + (1 − w)·weight + draw·spread`
    Aphelion { base: f64, weight: f64, spread: f64 },
}

impl PriceCurve {
    pub fn price(&self, perihelion_weight: f64, draw: f64) -> f64 {
        match *self {
            PriceCurve::Flat { base, spread } => base + draw * spread,
            PriceCurve::Perihelion {
                base,
                weight,
                spread,
            } => base + perihelion_weight * weight + draw * spread,
            PriceCurve::Aphelion {
                base,
                weight,
                spread,
            } => base + (1.0 - perihelion_weight) * weight + draw * spread,
        }
    }

    /// Lowest and highest price the curve can produce.
    pub fn range(&self) -> (f64, f64) {
        let ends = [
            self.price(0.0, 0.0),
            self.price(0.0, 1.0),
            self.price(1.0, 0.0),
            self.price(1.0, 1.0),
        ];
        ends.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(*p), hi.max(*p))
        })
    }

    pub(crate) fn is_finite(&self) -> bool {
        match *self {
            PriceCurve::Flat { base, spread } => base.is_finite() && spread.is_finite(),
            PriceCurve::Perihelion {
                base,
                weight,
                spread,
            }
            | PriceCurve::Aphelion {
                base,
                weight,
                spread,
            } => base.is_finite() && weight.is_finite() && spread.is_finite(),
        }
    }
}

/// Share of the cycle still ahead of the asteroid, clamped to `[0, 1]`.
pub fn perihelion_weight(day: f64, total_days: f64) -> f64 {
    if total_days <= 0.0 {
        return 0.0;
    }
    (1.0 - day / total_days).clamp(0.0, 1.0)
}
