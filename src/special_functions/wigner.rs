//! Wigner rotation matrix elements

use num_complex::Complex;

use super::Factorial;

/// Evaluates the Wigner small-d matrix element d^l_{mp,m}(beta) by the
/// explicit factorial sum.
pub fn wigner_small_d(l: i32, mp: i32, m: i32, beta: f64) -> f64 {
    assert!(mp.abs() <= l && m.abs() <= l, "invalid Wigner-d indices (l, mp, m) = ({}, {}, {})", l, mp, m);
    let (s, c) = (0.5 * beta).sin_cos();
    let norm = ((l + mp).factorial() * (l - mp).factorial() * (l + m).factorial() * (l - m).factorial()).sqrt();
    let mut sum = 0.0;
    for k in 0.max(m - mp)..=(l + m).min(l - mp) {
        let sign = if (k - m + mp) % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign * c.powi(2 * l - 2 * k + m - mp) * s.powi(2 * k - m + mp)
            / ((l + m - k).factorial() * k.factorial() * (l - k - mp).factorial() * (k - m + mp).factorial());
    }
    norm * sum
}

/// Per-batch memo of the Wigner-D matrix elements
///
///   D^l_{mp,m}(alpha, beta, gamma) = e^(-i mp alpha) d^l_{mp,m}(beta) e^(-i m gamma)
///
/// for all l ≤ l_max, stored as a dense flat table indexed by
/// [l, mp + l_max, m + l_max].
pub struct WignerDTable {
    l_max: i32,
    data: Vec<Complex<f64>>,
}

impl WignerDTable {
    pub fn new(l_max: i32, alpha: f64, beta: f64, gamma: f64) -> Self {
        assert!(l_max >= 0);
        let dim = (2 * l_max + 1) as usize;
        let mut table = WignerDTable {
            l_max,
            data: vec![Complex::new(0.0, 0.0); (l_max as usize + 1) * dim * dim],
        };
        for l in 0..=l_max {
            for mp in -l..=l {
                for m in -l..=l {
                    let phase = Complex::new(0.0, -(mp as f64) * alpha - (m as f64) * gamma).exp();
                    let ix = table.index(l, mp, m);
                    table.data[ix] = phase * wigner_small_d(l, mp, m, beta);
                }
            }
        }
        table
    }

    fn index(&self, l: i32, mp: i32, m: i32) -> usize {
        let dim = (2 * self.l_max + 1) as usize;
        ((l as usize) * dim + (mp + self.l_max) as usize) * dim + (m + self.l_max) as usize
    }

    pub fn l_max(&self) -> i32 {
        self.l_max
    }

    /// Returns D^l_{mp,m}; indices outside |mp|, |m| ≤ l ≤ l_max are invalid.
    pub fn get(&self, l: i32, mp: i32, m: i32) -> Complex<f64> {
        self.data[self.index(l, mp, m)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_d_closed_forms() {
        let beta = 0.83;
        assert!((wigner_small_d(1, 0, 0, beta) - beta.cos()).abs() < 1.0e-14);
        assert!((wigner_small_d(1, 1, 0, beta) + beta.sin() / 2f64.sqrt()).abs() < 1.0e-14);
        assert!((wigner_small_d(1, 1, 1, beta) - 0.5 * (1.0 + beta.cos())).abs() < 1.0e-14);
        assert!((wigner_small_d(2, 0, 0, beta) - 0.5 * (3.0 * beta.cos().powi(2) - 1.0)).abs() < 1.0e-14);
    }

    #[test]
    fn small_d_unitarity() {
        let beta = 1.9;
        for l in 0..4 {
            for mp in -l..=l {
                let sum: f64 = (-l..=l).map(|m| wigner_small_d(l, mp, m, beta).powi(2)).sum();
                println!("l = {}, mp = {}: sum = {}", l, mp, sum);
                assert!((sum - 1.0).abs() < 1.0e-13);
            }
        }
    }

    #[test]
    fn table_matches_direct_product() {
        let (alpha, beta, gamma) = (0.3, 1.2, -2.1);
        let table = WignerDTable::new(3, alpha, beta, gamma);
        for l in 0..=3 {
            for mp in -l..=l {
                for m in -l..=l {
                    let direct = Complex::new(0.0, -(mp as f64) * alpha - (m as f64) * gamma).exp()
                        * wigner_small_d(l, mp, m, beta);
                    assert!((table.get(l, mp, m) - direct).norm() < 1.0e-15);
                }
            }
        }
    }

    #[test]
    fn zero_rotation_is_identity() {
        let table = WignerDTable::new(2, 0.0, 0.0, 0.0);
        for l in 0..=2 {
            for mp in -l..=l {
                for m in -l..=l {
                    let target = if mp == m { 1.0 } else { 0.0 };
                    assert!((table.get(l, mp, m) - target).norm() < 1.0e-15);
                }
            }
        }
    }
}
