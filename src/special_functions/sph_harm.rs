//! Spherical harmonics as Cartesian polynomials

use std::f64::consts;
use num_complex::Complex;

use super::Factorial;

/// Evaluates the spherical harmonic Y_{l,m} on the Cartesian components
/// n = (x, y, z) of a direction vector:
///
///   Y_{l,m}(n) = N_{l,m} Σ_k (-(x+iy)/2)^(m+k) ((x-iy)/2)^k z^(l-m-2k)
///                        / ((m+k)! k! (l-m-2k)!),
///
/// with N_{l,m} = sqrt((2l+1)/(4π) (l+m)! (l-m)!) and k running over
/// max(0, -m) ≤ k ≤ (l-m)/2. For a real unit vector this is the usual
/// Y_{l,m}(θ, φ). The components may be complex, in which case the
/// polynomial provides the analytic continuation that the sub-barrier
/// momentum arguments of the tunneling prefactor require.
pub fn sph_harm(l: i32, m: i32, n: [Complex<f64>; 3]) -> Complex<f64> {
    assert!(l >= 0 && m.abs() <= l, "invalid spherical harmonic order (l, m) = ({}, {})", l, m);
    let [x, y, z] = n;
    let norm = ((2 * l + 1) as f64 / (4.0 * consts::PI) * (l + m).factorial() * (l - m).factorial()).sqrt();
    let xp = -0.5 * (x + Complex::<f64>::i() * y);
    let xm = 0.5 * (x - Complex::<f64>::i() * y);
    let mut sum = Complex::new(0.0, 0.0);
    for k in 0.max(-m)..=(l - m) / 2 {
        sum += xp.powu((m + k) as u32) * xm.powu(k as u32) * z.powu((l - m - 2 * k) as u32)
            / ((m + k).factorial() * k.factorial() * (l - m - 2 * k).factorial());
    }
    norm * sum
}
