// tp-core/src/units.rs

use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

/// Pressure in pascal.
#[inline]
pub fn pa_of(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

/// Temperature in kelvin.
#[inline]
pub fn k_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

pub mod constants {
    /// Universal gas constant on a kmol basis [J/(kmol·K)].
    ///
    /// Pairs with molar masses in g/mol (numerically kg/kmol).
    pub const R_UNIVERSAL: f64 = 8314.462618;

    /// Standard atmosphere [Pa].
    pub const ATM_PA: f64 = 101_325.0;

    /// Offset between Celsius and Kelvin scales [K].
    pub const ZERO_CELSIUS_K: f64 = 273.15;
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::pressure::bar;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn accessors_read_back_si() {
        assert_eq!(pa_of(pa(101_325.0)), 101_325.0);
        assert_eq!(k_of(k(300.0)), 300.0);
        assert!((pa(1e5).get::<bar>() - 1.0).abs() < 1e-12);
        assert!((k(373.15).get::<degree_celsius>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn constants_match_unit_definitions() {
        assert!((k(constants::ZERO_CELSIUS_K).get::<degree_celsius>()).abs() < 1e-12);
        assert!((pa(constants::ATM_PA).get::<bar>() - 1.01325).abs() < 1e-12);
    }
}
