//! Monochromatic pulse with a cos⁴ envelope

use std::f64::consts;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::{to_lab_frame, Pulse};
use crate::error::ConfigError;

/// An elliptically polarized pulse whose vector potential carries a
/// cos⁴ envelope over `n_cycles` carrier cycles, centred on the time
/// shift.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CosQuarticPulse {
    #[serde(rename = "peak_int")]
    peak_intensity: f64,
    #[serde(rename = "wave_len")]
    wavelength: f64,
    #[serde(rename = "cyc_num")]
    n_cycles: f64,
    #[serde(rename = "ellip")]
    ellipticity: f64,
    #[serde(rename = "azi")]
    azimuth: f64,
    cep: f64,
    #[serde(rename = "t_shift")]
    time_shift: f64,
}

impl CosQuarticPulse {
    /// Creates a linearly polarized pulse with the given peak intensity
    /// (W/cm²), wavelength (nm) and cycle count.
    pub fn new(peak_intensity: f64, wavelength: f64, n_cycles: f64) -> Result<Self, ConfigError> {
        if peak_intensity <= 0.0 {
            return Err(ConfigError::pulse("peak intensity must be positive"));
        }
        if wavelength <= 0.0 {
            return Err(ConfigError::pulse("wavelength must be positive"));
        }
        if n_cycles <= 0.0 {
            return Err(ConfigError::pulse("cycle count must be positive"));
        }
        Ok(CosQuarticPulse {
            peak_intensity,
            wavelength,
            n_cycles,
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
        Ok(CosQuarticPulse { ellipticity, ..self })
    }

    pub fn with_azimuth(self, azimuth: f64) -> Self {
        CosQuarticPulse { azimuth, ..self }
    }

    pub fn with_cep(self, cep: f64) -> Self {
        CosQuarticPulse { cep, ..self }
    }

    pub fn with_time_shift(self, time_shift: f64) -> Self {
        CosQuarticPulse { time_shift, ..self }
    }

    pub fn n_cycles(&self) -> f64 {
        self.n_cycles
    }

    /// The support mask looks at the real part of the shifted time only,
    /// so that evaluation off the real axis is well-defined.
    fn in_support(&self, re_tau: f64) -> bool {
        (self.angular_frequency() * re_tau).abs() < self.n_cycles * consts::PI
    }

    fn potential(&self, t: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
        let tau = t - self.time_shift;
        if !self.in_support(tau.re) {
            return (Complex::new(0.0, 0.0), Complex::new(0.0, 0.0));
        }
        let omega = self.angular_frequency();
        let envelope = (0.5 * omega * tau / self.n_cycles).cos().powu(4);
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
        if !self.in_support(tau.re) {
            return (Complex::new(0.0, 0.0), Complex::new(0.0, 0.0));
        }
        let omega = self.angular_frequency();
        let s = 0.5 * omega * tau / self.n_cycles;
        let (sn, cs) = (s.sin(), s.cos());
        let phase = omega * tau + self.cep;
        // F = -dA/dt with the envelope gradient term 4/(2n) sin(s) cos(s)^3
        let rate = 2.0 / self.n_cycles;
        let f0 = self.peak_field();
        to_lab_frame(
            f0 * cs.powu(3) * (cs * phase.sin() + rate * sn * phase.cos()),
            f0 * self.ellipticity * cs.powu(3) * (rate * sn * phase.sin() - cs * phase.cos()),
            self.azimuth,
        )
    }
}

impl Pulse for CosQuarticPulse {
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
        let tau = t - self.time_shift;
        if self.in_support(tau) {
            (0.5 * self.angular_frequency() * tau / self.n_cycles).cos().powi(4)
        } else {
            0.0
        }
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
