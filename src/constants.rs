//! Physical constants, in Hartree atomic units unless noted

/// Converts wavelength to angular frequency: ω [a.u.] = this / λ [nm]
pub const FREQUENCY_CONVERSION: f64 = 45.563352525;
/// One atomic unit of intensity, in W/cm²: F₀² = I₀ / ((1 + ε²) × this)
pub const INTENSITY_CONVERSION: f64 = 3.50944521e16;
/// Euler's number
pub const EULER: f64 = 2.71828182845904523;
/// Transverse momenta below this magnitude are dropped from every batch
pub const KD_CUTOFF: f64 = 1.0e-4;
/// Floor on the unit envelope inside the instantaneous Keldysh parameter,
/// which otherwise diverges at envelope zeros
pub const ENVELOPE_FLOOR: f64 = 1.0e-12;
