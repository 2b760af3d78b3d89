//! Magnus-Tetens psychrometrics.
//!
//! All functions take temperature in °C and relative humidity in percent and
//! never fail. Out-of-range inputs extrapolate mathematically; callers that
//! care check plausibility first (see [`crate::PlausibleRange`]).

use cc_core::Real;

/// Magnus coefficient A (hPa).
pub const MAGNUS_A: Real = 6.112;
/// Magnus coefficient B (dimensionless).
pub const MAGNUS_B: Real = 17.67;
/// Magnus coefficient C (°C).
pub const MAGNUS_C: Real = 243.5;
/// Water-vapor scale giving g/m³ from hPa and kelvin.
pub const WATER_VAPOR_K: Real = 216.74;
/// Returned by [`dew_point`] when RH is not positive.
pub const DEW_POINT_SENTINEL: Real = -999.0;

const KELVIN_OFFSET: Real = 273.15;

/// Saturation vapor pressure over water (hPa).
pub fn saturation_vapor_pressure(temp_c: Real) -> Real {
    MAGNUS_A * (MAGNUS_B * temp_c / (MAGNUS_C + temp_c)).exp()
}

/// Absolute humidity (g/m³).
pub fn absolute_humidity(temp_c: Real, rh_percent: Real) -> Real {
    let e_s = saturation_vapor_pressure(temp_c);
    WATER_VAPOR_K * (rh_percent / 100.0) * e_s / (KELVIN_OFFSET + temp_c)
}

/// Relative humidity (%) that `ah` g/m³ would have at `temp_c`.
///
/// Not clamped; values above 100 mean the air would be supersaturated.
pub fn rh_from_absolute_humidity(temp_c: Real, ah: Real) -> Real {
    let e_s = saturation_vapor_pressure(temp_c);
    ah * (KELVIN_OFFSET + temp_c) / (WATER_VAPOR_K * e_s) * 100.0
}

/// Dew point (°C), or [`DEW_POINT_SENTINEL`] if `rh_percent <= 0`.
pub fn dew_point(temp_c: Real, rh_percent: Real) -> Real {
    if rh_percent <= 0.0 {
        return DEW_POINT_SENTINEL;
    }
    let gamma = (rh_percent / 100.0).ln() + MAGNUS_B * temp_c / (MAGNUS_C + temp_c);
    MAGNUS_C * gamma / (MAGNUS_B - gamma)
}
