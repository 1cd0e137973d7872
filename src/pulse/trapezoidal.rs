//! Monochromatic pulse with a trapezoidal envelope

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::{to_lab_frame, Pulse};
use crate::error::ConfigError;

/// An elliptically polarized pulse whose envelope ramps up linearly over
/// `n_on` cycles, holds at unity for `n_const` cycles and ramps back
/// down over `n_off` cycles. The turn-on sits at the time shift.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrapezoidalPulse {
    #[serde(rename = "peak_int")]
    peak_intensity: f64,
    #[serde(rename = "wave_len")]
    wavelength: f64,
    #[serde(rename = "cyc_num_turn_on")]
    n_on: f64,
    #[serde(rename = "cyc_num_const")]
    n_const: f64,
    #[serde(rename = "cyc_num_turn_off")]
    n_off: f64,
    #[serde(rename = "ellip")]
    ellipticity: f64,
    #[serde(rename = "azi")]
    azimuth: f64,
    cep: f64,
    #[serde(rename = "t_shift")]
    time_shift: f64,
}

impl TrapezoidalPulse {
    /// Creates a linearly polarized pulse with the given peak intensity
    /// (W/cm²), wavelength (nm) and ramp-up/plateau/ramp-down cycle
    /// counts.
    pub fn new(peak_intensity: f64, wavelength: f64, n_on: f64, n_const: f64, n_off: f64) -> Result<Self, ConfigError> {
        if peak_intensity <= 0.0 {
            return Err(ConfigError::pulse("peak intensity must be positive"));
        }
        if wavelength <= 0.0 {
            return Err(ConfigError::pulse("wavelength must be positive"));
        }
        if n_on <= 0.0 || n_off <= 0.0 || n_const < 0.0 {
            return Err(ConfigError::pulse("ramp cycle counts must be positive and the plateau non-negative"));
        }
        Ok(TrapezoidalPulse {
            peak_intensity,
            wavelength,
            n_on,
            n_const,
            n_off,
            ellipticity: 0.0,
            azimuth: 0.0,
            cep: 0.0,
            time_shift: 0.0,
        })
    }

    pub fn with_ellipticity(self, ellipticity: f64) -> Result<Self, ConfigError> {
        if !(-1.0..=1.0).contains(&ellipticity) {
            return Err(ConfigError::pulse("ellipticity must lie in [-1, 1]"));
        }
        Ok(TrapezoidalPulse { ellipticity, ..self })
    }

    pub fn with_azimuth(self, azimuth: f64) -> Self {
        TrapezoidalPulse { azimuth, ..self }
    }

    pub fn with_cep(self, cep: f64) -> Self {
        TrapezoidalPulse { cep, ..self }
    }

    pub fn with_time_shift(self, time_shift: f64) -> Self {
        TrapezoidalPulse { time_shift, ..self }
    }

    pub fn ramp_cycles(&self) -> (f64, f64, f64) {
        (self.n_on, self.n_const, self.n_off)
    }

    /// The envelope on complex shifted time and its slope: the ramps are
    /// linear in τ, while the piecewise boundaries test Re(τ) only.
    fn envelope(&self, tau: Complex<f64>) -> (Complex<f64>, f64) {
        let period = self.period();
        let t_on = self.n_on * period;
        let t_flat = t_on + self.n_const * period;
        let t_end = t_flat + self.n_off * period;
        let re = tau.re;
        if re <= 0.0 || re >= t_end {
            (Complex::new(0.0, 0.0), 0.0)
        } else if re < t_on {
            (tau / t_on, 1.0 / t_on)
        } else if re <= t_flat {
            (Complex::new(1.0, 0.0), 0.0)
        } else {
            ((t_end - tau) / (self.n_off * period), -1.0 / (self.n_off * period))
        }
    }

    fn potential(&self, t: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
        let tau = t - self.time_shift;
        let (envelope, _) = self.envelope(tau);
        let omega = self.angular_frequency();
        let phase = omega * tau + self.cep;
        let a0 = self.peak_potential();
        to_lab_frame(
            a0 * envelope * phase.cos(),
            a0 * self.ellipticity * envelope * phase.sin(),
            self.azimuth,
        )
    }

    fn field(&self, t: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
        let tau = t - self.time_shift;
        let (envelope, slope) = self.envelope(tau);
        let omega = self.angular_frequency();
        let phase = omega * tau + self.cep;
        let a0 = self.peak_potential();
        let f0 = self.peak_field();
        // F = -dA/dt picks up the derivative-of-ramp term ±1/t_ramp
        to_lab_frame(
            f0 * envelope * phase.sin() - a0 * slope * phase.cos(),
            -self.ellipticity * (f0 * envelope * phase.cos() + a0 * slope * phase.sin()),
            self.azimuth,
        )
    }
}

impl Pulse for TrapezoidalPulse {
    fn peak_intensity(&self) -> f64 {
        self.peak_intensity
    }

    fn wavelength(&self) -> f64 {
        self.wavelength
    }

    fn ellipticity(&self) -> f64 {
        self.ellipticity
    }

    fn azimuth(&self) -> f64 {
        self.azimuth
    }

    fn cep(&self) -> f64 {
        self.cep
    }

    fn time_shift(&self) -> f64 {
        self.time_shift
    }

    fn monochromatic(&self) -> bool {
        true
    }

    fn unit_envelope(&self, t: f64) -> f64 {
        let tau = Complex::new(t - self.time_shift, 0.0);
        self.envelope(tau).0.re
    }

    fn a_x(&self, t: Complex<f64>) -> Complex<f64> {
        self.potential(t).0
    }

    fn a_y(&self, t: Complex<f64>) -> Complex<f64> {
        self.potential(t).1
    }

    fn f_x(&self, t: Complex<f64>) -> Complex<f64> {
        self.field(t).0
    }

    fn f_y(&self, t: Complex<f64>) -> Complex<f64> {
        self.field(t).1
    }
}
