//! Conversion between plan coordinates and real-world lengths.

use serde::{Deserialize, Serialize};
use uom::si::f64::Length;
use uom::si::length::foot;

/// Fixed linear mapping between plan units and feet.
///
/// A single factor is used in both directions so that lengths shown to the user
/// always agree with the coordinates stored in the design.
///
/// # Examples
/// ```
/// use patiox::Scale;
/// use uom::si::length::foot;
///
/// let scale = Scale::default();
/// assert!((scale.length(100.0).get::<foot>() - 10.0).abs() < 1e-9);
/// assert!((scale.plan_units_from_feet(10.0) - 100.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Feet represented by one plan unit.
    pub feet_per_unit: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self { feet_per_unit: 0.1 }
    }
}

impl Scale {
    /// Create a scale from a feet-per-unit factor.
    #[must_use]
    pub const fn new(feet_per_unit: f64) -> Self {
        Self { feet_per_unit }
    }

    /// Convert a plan distance into feet.
    #[must_use]
    pub fn to_feet(self, plan_units: f64) -> f64 {
        plan_units * self.feet_per_unit
    }

    /// Convert a plan distance into a typed length.
    #[must_use]
    pub fn length(self, plan_units: f64) -> Length {
        Length::new::<foot>(self.to_feet(plan_units))
    }

    /// Convert feet into plan units.
    #[must_use]
    pub fn plan_units_from_feet(self, feet: f64) -> f64 {
        feet / self.feet_per_unit
    }

    /// Convert a typed length into plan units.
    #[must_use]
    pub fn plan_units(self, length: Length) -> f64 {
        self.plan_units_from_feet(length.get::<foot>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::length::meter;

    #[test]
    fn conversions_share_one_factor() {
        let scale = Scale::new(0.25);
        assert!((scale.to_feet(8.0) - 2.0).abs() < f64::EPSILON);
        assert!((scale.plan_units_from_feet(2.0) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn typed_lengths_respect_units() {
        let scale = Scale::default();
        let one_metre = Length::new::<meter>(1.0);
        let units = scale.plan_units(one_metre);
        assert!((units - 32.808_398_950_131_23).abs() < 1e-6);
    }
}
