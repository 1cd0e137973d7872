//! Laser pulse models under the dipole approximation
//!
//! Every pulse exposes its vector potential and electric field as four
//! scalar functions of time. The time argument is complex: the imaginary
//! part carries the sub-barrier tunneling time, so the closed forms are
//! evaluated as written and only the support mask looks at Re(t).

use std::f64::consts;
use num_complex::Complex;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::constants::*;

mod cos_quartic;
mod cos_squared;
mod trapezoidal;

pub use self::cos_quartic::*;
pub use self::cos_squared::*;
pub use self::trapezoidal::*;

/// A laser pulse, described by its carrier and envelope.
///
/// `a_x`/`a_y` return the vector potential and `f_x`/`f_y` the electric
/// field, which is the exact derivative F = -dA/dt of the closed-form
/// potential. All four accept complex time.
#[enum_dispatch]
pub trait Pulse {
    /// Peak intensity I₀, in W/cm²
    fn peak_intensity(&self) -> f64;

    /// Carrier wavelength λ, in nm
    fn wavelength(&self) -> f64;

    /// Ellipticity ε in [-1, 1]: 0 is linear, ±1 circular
    fn ellipticity(&self) -> f64;

    /// Azimuth of the principal polarization axis, rad
    fn azimuth(&self) -> f64;

    /// Carrier-envelope phase, rad
    fn cep(&self) -> f64;

    /// Time offset of the envelope, a.u.
    fn time_shift(&self) -> f64;

    /// Does the field oscillate at a single carrier frequency?
    /// The Coulomb-corrected prefactor is only defined if it does.
    fn monochromatic(&self) -> bool;

    /// The unit envelope u(t) in [0, 1] at real time t
    fn unit_envelope(&self, t: f64) -> f64;

    fn a_x(&self, t: Complex<f64>) -> Complex<f64>;
    fn a_y(&self, t: Complex<f64>) -> Complex<f64>;
    fn f_x(&self, t: Complex<f64>) -> Complex<f64>;
    fn f_y(&self, t: Complex<f64>) -> Complex<f64>;

    /// Carrier angular frequency ω, in a.u.
    fn angular_frequency(&self) -> f64 {
        FREQUENCY_CONVERSION / self.wavelength()
    }

    /// Carrier period 2π/ω, in a.u.
    fn period(&self) -> f64 {
        2.0 * consts::PI / self.angular_frequency()
    }

    /// Peak field strength F₀, in a.u.
    fn peak_field(&self) -> f64 {
        (self.peak_intensity() / ((1.0 + self.ellipticity().powi(2)) * INTENSITY_CONVERSION)).sqrt()
    }

    /// Peak vector potential A₀ = F₀/ω, in a.u.
    fn peak_potential(&self) -> f64 {
        self.peak_field() / self.angular_frequency()
    }

    /// Keldysh adiabaticity parameter γ = ω √(2 I_p) / F₀
    fn keldysh_parameter(&self, ionization_potential: f64) -> f64 {
        self.angular_frequency() * (2.0 * ionization_potential).sqrt() / self.peak_field()
    }

    /// Both field components at a real time
    fn electric_field(&self, t: f64) -> (f64, f64) {
        let t = Complex::new(t, 0.0);
        (self.f_x(t).re, self.f_y(t).re)
    }
}

/// Specific pulse shapes, i.e. types that implement `trait Pulse`.
#[enum_dispatch(Pulse)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LaserPulse {
    CosSquared(CosSquaredPulse),
    CosQuartic(CosQuarticPulse),
    Trapezoidal(TrapezoidalPulse),
}

/// Rotates components given along the principal polarization axes into
/// the lab frame.
fn to_lab_frame(vx: Complex<f64>, vy: Complex<f64>, azimuth: f64) -> (Complex<f64>, Complex<f64>) {
    let (s, c) = azimuth.sin_cos();
    (vx * c + vy * s, -vx * s + vy * c)
}
