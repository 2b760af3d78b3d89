// cc-core/src/units.rs
//
// Raw readings cross the host boundary as integers scaled ×10 (`150` is
// 15.0 °C, `750` is 75.0 %RH). Everything that turns them into floating
// point, or back, goes through this module.

use crate::numeric::{Real, round_half_away};
use uom::si::f64::ThermodynamicTemperature as UomThermodynamicTemperature;

pub type Temperature = UomThermodynamicTemperature;

/// Fixed-point scale of the host wire format.
pub const RAW_SCALE: Real = 10.0;

/// Raw ×10 integer to its physical value (°C or %).
#[inline]
pub fn raw_to_real(raw: i32) -> Real {
    Real::from(raw) / RAW_SCALE
}

/// Physical value back to raw ×10, rounded half away from zero.
#[inline]
pub fn real_to_raw(v: Real) -> i32 {
    round_half_away(v * RAW_SCALE)
}

#[inline]
pub fn degc(v: Real) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn to_degc(t: Temperature) -> Real {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn raw_to_temperature(raw: i32) -> Temperature {
    degc(raw_to_real(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_scale_round_trip() {
        for raw in [-400, -15, 0, 1, 150, 755, 1000] {
            assert_eq!(real_to_raw(raw_to_real(raw)), raw);
        }
    }

    #[test]
    fn real_to_raw_rounds_half_away() {
        assert_eq!(real_to_raw(13.15), 132);
        assert_eq!(real_to_raw(-0.15), -2);
    }

    #[test]
    fn celsius_helpers_agree() {
        let t = raw_to_temperature(150);
        assert!((to_degc(t) - 15.0).abs() < 1e-9);
        assert!((to_degc(degc(-4.5)) + 4.5).abs() < 1e-12);
    }
}
