//! Per-batch assembly of the complex ionization amplitude

use num_complex::Complex;

use crate::constants::*;
use crate::geometry::{FieldFrame, ThreeVector};
use crate::pulse::Pulse;
use crate::special_functions::{gamma, sph_harm, WignerDTable};
use crate::target::Target;

use super::Prefactor;

/// Everything the amplitude needs that is fixed over one batch: the
/// instantaneous field, the target scalars, the prefactor constant and
/// the orbital coefficients projected into the field frame.
///
/// The projected coefficients G_{l,m'} = Σ_m C_{l,m} D^l_{m',m} fold the
/// Wigner rotation into a single per-l table, so each candidate costs
/// one spherical-harmonic sum rather than a double sum over (m, m').
pub(super) struct BatchAmplitude {
    ip: f64,
    kappa: f64,
    n_star: f64,
    f_x: f64,
    f_y: f64,
    f: f64,
    x_axis: ThreeVector,
    y_axis: ThreeVector,
    z_axis: ThreeVector,
    prefactor: Prefactor,
    coeff: f64,
    projected: Vec<Complex<f64>>,
    l_max: i32,
    sqrt_volume: f64,
    jacobian: f64,
}

impl BatchAmplitude {
    pub fn new<P, T>(
        pulse: &P,
        target: &T,
        frame: &FieldFrame,
        t_r: f64,
        prefactor: Prefactor,
        volume: f64,
        jacobian: bool,
    ) -> Self
    where
        P: Pulse,
        T: Target,
    {
        let ip = target.ionization_potential();
        let kappa = (2.0 * ip).sqrt();
        let n_star = target.asymptotic_charge() / kappa;
        let f = frame.magnitude();
        let (f_x, f_y) = frame.field();

        let coeff = match prefactor {
            Prefactor::None => 1.0,
            Prefactor::Standard => {
                2f64.powf(0.5 * n_star + 1.0) * kappa.powf(2.0 * n_star + 0.5) * gamma(0.5 * n_star + 1.0)
            },
            Prefactor::CoulombCorrected => {
                let envelope = pulse.unit_envelope(t_r).max(ENVELOPE_FLOOR);
                let gamma_inst = if pulse.monochromatic() {
                    pulse.angular_frequency() * kappa / (pulse.peak_field() * envelope)
                } else {
                    0.0
                };
                2f64.powf(1.5 * n_star + 1.0)
                    * kappa.powf(5.0 * n_star + 0.5)
                    * f.powf(-n_star)
                    * (1.0 + 2.0 * gamma_inst / EULER).powf(-n_star)
            },
        };

        let l_max = target.l_max();
        let projected = if prefactor == Prefactor::None {
            Vec::new()
        } else {
            let (alpha, beta, gamma) = frame.orbital_euler_angles(target.orientation());
            let table = WignerDTable::new(l_max, alpha, beta, gamma);
            let dim = (2 * l_max + 1) as usize;
            let mut projected = vec![Complex::new(0.0, 0.0); (l_max as usize + 1) * dim];
            for l in 0..=l_max {
                for mp in -l..=l {
                    let mut sum = Complex::new(0.0, 0.0);
                    for m in -l..=l {
                        let c = target.asymptotic_coeff(l, m);
                        if c != 0.0 {
                            sum += c * table.get(l, mp, m);
                        }
                    }
                    projected[(l as usize) * dim + (mp + l_max) as usize] = sum;
                }
            }
            projected
        };

        BatchAmplitude {
            ip,
            kappa,
            n_star,
            f_x,
            f_y,
            f,
            x_axis: frame.x_axis(),
            y_axis: frame.y_axis(),
            z_axis: frame.z_axis(),
            prefactor,
            coeff,
            projected,
            l_max,
            sqrt_volume: volume.sqrt(),
            jacobian: if jacobian { f.sqrt() } else { 1.0 },
        }
    }

    /// The angular factor Σ_{l,m'} G_{l,m'} Y_{l,m'} evaluated on the
    /// field-frame components of the (complex) saddle-point momentum,
    /// scaled by κ.
    fn angular(&self, k_ts: [Complex<f64>; 3]) -> Complex<f64> {
        let n = [
            (k_ts[0] * self.x_axis[0] + k_ts[1] * self.x_axis[1] + k_ts[2] * self.x_axis[2]) / self.kappa,
            (k_ts[0] * self.y_axis[0] + k_ts[1] * self.y_axis[1] + k_ts[2] * self.y_axis[2]) / self.kappa,
            (k_ts[0] * self.z_axis[0] + k_ts[1] * self.z_axis[1] + k_ts[2] * self.z_axis[2]) / self.kappa,
        ];
        let dim = (2 * self.l_max + 1) as usize;
        let mut sum = Complex::new(0.0, 0.0);
        for l in 0..=self.l_max {
            for mp in -l..=l {
                let g = self.projected[(l as usize) * dim + (mp + self.l_max) as usize];
                if g.norm_sqr() > 0.0 {
                    sum += g * sph_harm(l, mp, n);
                }
            }
        }
        sum
    }

    /// The complex amplitude for one candidate: transverse momentum k_d
    /// resolved into lab components (k_x, k_y), longitudinal k_z.
    pub fn evaluate(&self, k_x: f64, k_y: f64, k_d: f64, k_z: f64) -> Complex<f64> {
        let k_sqr = k_d * k_d + k_z * k_z;
        let tunneling = (-(k_sqr + 2.0 * self.ip).powf(1.5) / (3.0 * self.f)).exp();
        let pre = match self.prefactor {
            Prefactor::None => Complex::new(1.0, 0.0),
            _ => {
                // sub-barrier time and the saddle-point momentum shift
                let t_i = (self.kappa.powi(2) + k_sqr).sqrt() / self.f;
                let k_ts = [
                    Complex::new(k_x, -t_i * self.f_x),
                    Complex::new(k_y, -t_i * self.f_y),
                    Complex::new(k_z, 0.0),
                ];
                let denominator = ((k_sqr + 2.0 * self.ip) * self.f.powi(2)).powf(0.25 * (self.n_star + 1.0));
                self.coeff * self.angular(k_ts) / denominator
            },
        };
        self.sqrt_volume * tunneling * self.jacobian * pre
    }
}
