//! Ionization targets
//!
//! A target supplies the scalar properties of the ionizing orbital (the
//! ionization potential and the asymptotic charge seen by the outgoing
//! electron) together with its angular content: the coefficients of its
//! expansion in spherical harmonics in the body-fixed molecular frame,
//! and the Euler angles orienting that frame in the lab.

use crate::error::ConfigError;

/// Capability set the sampler requires of an ionization target.
pub trait Target {
    /// Ionization potential I_p, a.u.
    fn ionization_potential(&self) -> f64;

    /// Asymptotic charge Z seen by the departing electron
    fn asymptotic_charge(&self) -> f64;

    /// z-y-z Euler angles (alpha, beta, gamma) of the molecular frame
    /// relative to the lab frame
    fn orientation(&self) -> (f64, f64, f64);

    /// Largest angular momentum in the orbital expansion
    fn l_max(&self) -> i32;

    /// Asymptotic expansion coefficient C_{l,m} in the molecular frame;
    /// zero outside the table
    fn asymptotic_coeff(&self, l: i32, m: i32) -> f64;
}

/// A single-active-electron atom: one (l, m) orbital with asymptotic
/// coefficient C, quantized along an arbitrary axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Atom {
    ionization_potential: f64,
    charge: f64,
    l: i32,
    m: i32,
    coeff: f64,
    axis_polar: f64,
    axis_azimuth: f64,
}

impl Atom {
    /// Creates an atom in an s state quantized along the lab z-axis,
    /// with unit asymptotic coefficient.
    pub fn new(ionization_potential: f64, charge: f64) -> Result<Self, ConfigError> {
        if ionization_potential <= 0.0 {
            return Err(ConfigError::target("ionization potential must be positive"));
        }
        Ok(Atom {
            ionization_potential,
            charge,
            l: 0,
            m: 0,
            coeff: 1.0,
            axis_polar: 0.0,
            axis_azimuth: 0.0,
        })
    }

    pub fn with_orbital(self, l: i32, m: i32, coeff: f64) -> Result<Self, ConfigError> {
        if l < 0 || m.abs() > l {
            return Err(ConfigError::target("orbital quantum numbers must satisfy 0 <= |m| <= l"));
        }
        Ok(Atom { l, m, coeff, ..self })
    }

    pub fn with_quantization_axis(self, polar: f64, azimuth: f64) -> Self {
        Atom { axis_polar: polar, axis_azimuth: azimuth, ..self }
    }
}

impl Target for Atom {
    fn ionization_potential(&self) -> f64 {
        self.ionization_potential
    }

    fn asymptotic_charge(&self) -> f64 {
        self.charge
    }

    fn orientation(&self) -> (f64, f64, f64) {
        (self.axis_azimuth, self.axis_polar, 0.0)
    }

    fn l_max(&self) -> i32 {
        self.l
    }

    fn asymptotic_coeff(&self, l: i32, m: i32) -> f64 {
        if l == self.l && m == self.m {
            self.coeff
        } else {
            0.0
        }
    }
}

/// A molecular orbital: a table of asymptotic coefficients C_{l,m} for
/// l = 0..l_max in the molecular frame, oriented by z-y-z Euler angles.
#[derive(Clone, Debug, PartialEq)]
pub struct Molecule {
    ionization_potential: f64,
    charge: f64,
    euler: (f64, f64, f64),
    l_max: i32,
    // dense (l_max + 1) x (2 l_max + 1) table, row l at offset m + l_max
    coeffs: Vec<f64>,
}

impl Molecule {
    /// Creates a molecular orbital from per-l coefficient rows; row l
    /// must hold the 2l + 1 values C_{l,-l} ... C_{l,l}.
    pub fn from_coeffs(ionization_potential: f64, charge: f64, rows: &[Vec<f64>]) -> Result<Self, ConfigError> {
        if ionization_potential <= 0.0 {
            return Err(ConfigError::target("ionization potential must be positive"));
        }
        if rows.is_empty() {
            return Err(ConfigError::target("coefficient table must contain at least l = 0"));
        }
        let l_max = rows.len() as i32 - 1;
        let dim = (2 * l_max + 1) as usize;
        let mut coeffs = vec![0.0; rows.len() * dim];
        for (l, row) in rows.iter().enumerate() {
            if row.len() != 2 * l + 1 {
                return Err(ConfigError::target("coefficient row l must hold exactly 2l + 1 entries"));
            }
            for (j, c) in row.iter().enumerate() {
                // m = j - l
                let m = j as i32 - l as i32;
                coeffs[l * dim + (m + l_max) as usize] = *c;
            }
        }
        Ok(Molecule {
            ionization_potential,
            charge,
            euler: (0.0, 0.0, 0.0),
            l_max,
            coeffs,
        })
    }

    pub fn with_orientation(self, alpha: f64, beta: f64, gamma: f64) -> Self {
        Molecule { euler: (alpha, beta, gamma), ..self }
    }
}

impl Target for Molecule {
    fn ionization_potential(&self) -> f64 {
        self.ionization_potential
    }

    fn asymptotic_charge(&self) -> f64 {
        self.charge
    }

    fn orientation(&self) -> (f64, f64, f64) {
        self.euler
    }

    fn l_max(&self) -> i32 {
        self.l_max
    }

    fn asymptotic_coeff(&self, l: i32, m: i32) -> f64 {
        if l < 0 || l > self.l_max || m.abs() > l {
            return 0.0;
        }
        let dim = (2 * self.l_max + 1) as usize;
        self.coeffs[(l as usize) * dim + (m + self.l_max) as usize]
    }
}
