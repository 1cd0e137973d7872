//! Monochromatic pulse with a cos² envelope

use std::f64::consts;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::{to_lab_frame, Pulse};
use crate::error::ConfigError;

/// An elliptically polarized pulse whose vector potential carries a
/// cos² envelope over `n_cycles` carrier cycles.
///
/// The cos² envelope turns off with a nonzero field gradient, so the
/// potential and field are multiplied by a smooth tanh clamp that takes
/// them to zero over a small fraction of the final cycle. The clamp is a
/// function of Re(t) only and therefore constant along the imaginary
/// (sub-barrier) direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CosSquaredPulse {
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

impl CosSquaredPulse {
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
        Ok(CosSquaredPulse {
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
        Ok(CosSquaredPulse { ellipticity, ..self })
    }

    pub fn with_azimuth(self, azimuth: f64) -> Self {
        CosSquaredPulse { azimuth, ..self }
    }

    pub fn with_cep(self, cep: f64) -> Self {
        CosSquaredPulse { cep, ..self }
    }

    pub fn with_time_shift(self, time_shift: f64) -> Self {
        CosSquaredPulse { time_shift, ..self }
    }

    pub fn n_cycles(&self) -> f64 {
        self.n_cycles
    }

    fn in_support(&self, re_tau: f64) -> bool {
        (self.angular_frequency() * re_tau).abs() < self.n_cycles * consts::PI
    }

    /// The smooth edge clamp tanh(5 (Re τ - b)) tanh(-5 (Re τ + b)),
    /// with b the half-length of the support; unity deep inside the
    /// pulse, zero at the turn-on and turn-off.
    fn edge_clamp(&self, re_tau: f64) -> f64 {
        let b = self.n_cycles * consts::PI / self.angular_frequency();
        (5.0 * (re_tau - b)).tanh() * (-5.0 * (re_tau + b)).tanh()
    }

    fn potential(&self, t: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
        let tau = t - self.time_shift;
        if !self.in_support(tau.re) {
            return (Complex::new(0.0, 0.0), Complex::new(0.0, 0.0));
        }
        let omega = self.angular_frequency();
        let envelope = (0.5 * omega * tau / self.n_cycles).cos().powu(2);
        let phase = omega * tau + self.cep;
        let a0 = self.peak_potential() * self.edge_clamp(tau.re);
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
        // F = -dA/dt with the envelope gradient term 2/(2n) sin(s) cos(s)
        let rate = 1.0 / self.n_cycles;
        let f0 = self.peak_field() * self.edge_clamp(tau.re);
        to_lab_frame(
            f0 * cs * (cs * phase.sin() + rate * sn * phase.cos()),
            f0 * self.ellipticity * cs * (rate * sn * phase.sin() - cs * phase.cos()),
            self.azimuth,
        )
    }
}

impl Pulse for CosSquaredPulse {
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
            (0.5 * self.angular_frequency() * tau / self.n_cycles).cos().powi(2)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_pulse_symmetry() {
        // 4e14 W/cm², 800 nm, linear along x: A_y vanishes identically
        // and the symmetric carrier makes F_x(0) = 0
        let pulse = CosSquaredPulse::new(4.0e14, 800.0, 2.0).unwrap();
        for i in -10..=10 {
            let t = Complex::new(0.09 * (i as f64) * pulse.n_cycles() * pulse.period(), 0.0);
            assert!(pulse.a_y(t).norm() == 0.0);
            assert!(pulse.f_y(t).norm() == 0.0);
        }
        let t0 = Complex::new(0.0, 0.0);
        assert!(pulse.f_x(t0).norm() < 1.0e-15);
        assert!(pulse.unit_envelope(0.0) == 1.0);
    }

    #[test]
    fn edge_clamp_behaviour() {
        let pulse = CosSquaredPulse::new(1.0e14, 800.0, 4.0).unwrap();
        let half = 0.5 * pulse.n_cycles() * pulse.period();
        // unity well inside, tiny just inside the boundary
        assert!((pulse.edge_clamp(0.0) - 1.0).abs() < 1.0e-15);
        assert!(pulse.edge_clamp(half - 0.1).abs() < 0.5);
        // constant along the imaginary direction by construction
        let t = Complex::new(0.3 * half, 25.0);
        let on_axis = Complex::new(0.3 * half, 0.0);
        let ratio = pulse.a_x(t).norm() / pulse.a_x(on_axis).norm();
        println!("|A_x| off-axis / on-axis = {}", ratio);
        assert!(ratio.is_finite() && ratio > 1.0);
    }

    #[test]
    fn time_shift_moves_peak() {
        let shift = 40.0;
        let pulse = CosSquaredPulse::new(1.0e14, 800.0, 4.0).unwrap()
            .with_time_shift(shift);
        assert!(pulse.unit_envelope(shift) == 1.0);
        assert!(pulse.unit_envelope(shift) > pulse.unit_envelope(0.0));
    }
}
