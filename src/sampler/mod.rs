//! The ADK initial-condition sampler
//!
//! Iterates over a set of real birth times; for each, enumerates
//! transverse-momentum candidates at the tunneling exit, weighs them
//! with the (optionally Coulomb-corrected) ADK amplitude and packs the
//! survivors into [`SeedBatch`] rows for the trajectory propagator.

use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;

use crate::constants::*;
use crate::error::ConfigError;
use crate::geometry::FieldFrame;
use crate::pulse::Pulse;
use crate::target::Target;

mod amplitude;
mod batch;

use self::amplitude::BatchAmplitude;
pub use self::batch::*;

/// Which initial phase, if any, each seed carries.
/// CTMC seeds carry none; QTMC and SCTS seeds carry arg(amp), which the
/// propagator accumulates along the trajectory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PhaseMethod {
    Ctmc,
    Qtmc,
    Scts,
}

/// The multiplicative prefactor applied to the tunneling exponential.
/// The Coulomb-corrected form requires a monochromatic pulse and is
/// downgraded to the standard one otherwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Prefactor {
    None,
    Standard,
    CoulombCorrected,
}

/// Whether seeds sample the polarization plane only (k_z fixed at 0)
/// or the full momentum space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dimension {
    Two,
    Three,
}

/// How the transverse-momentum candidates of one batch are enumerated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MomentumSpec {
    /// A regular (k_d, k_z) grid; each axis spans ±|max| with the given
    /// number of points.
    Grid {
        kd_max: f64,
        n_kd: usize,
        kz_max: f64,
        n_kz: usize,
    },
    /// Uniform draws from the rectangle [-kd_max, kd_max] x
    /// [-kz_max, kz_max]; an axis with zero extent is pinned at 0.
    MonteCarlo {
        n_samples: usize,
        kd_max: f64,
        kz_max: f64,
    },
}

/// Immutable description of a sampling run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    t_start: f64,
    t_end: f64,
    n_t: usize,
    momentum: MomentumSpec,
    cutoff: f64,
    phase_method: PhaseMethod,
    prefactor: Prefactor,
    jacobian: bool,
    dimension: Dimension,
    seed: u64,
}

impl SamplerConfig {
    /// Creates a configuration sampling `n_t` birth times on
    /// [`t_start`, `t_end`] with the given momentum enumeration.
    /// Defaults: no rate cutoff, CTMC, no prefactor, no Jacobian,
    /// three-dimensional seeds, seed 0.
    pub fn new(t_start: f64, t_end: f64, n_t: usize, momentum: MomentumSpec) -> Self {
        SamplerConfig {
            t_start,
            t_end,
            n_t,
            momentum,
            cutoff: 0.0,
            phase_method: PhaseMethod::Ctmc,
            prefactor: Prefactor::None,
            jacobian: false,
            dimension: Dimension::Three,
            seed: 0,
        }
    }

    /// Discard seeds with rate below `cutoff`.
    pub fn with_cutoff(&self, cutoff: f64) -> Self {
        SamplerConfig { cutoff, ..*self }
    }

    pub fn with_phase_method(&self, phase_method: PhaseMethod) -> Self {
        SamplerConfig { phase_method, ..*self }
    }

    pub fn with_prefactor(&self, prefactor: Prefactor) -> Self {
        SamplerConfig { prefactor, ..*self }
    }

    /// Include the sqrt(F) Jacobian from momentum to birth-time sampling.
    pub fn with_jacobian(&self, jacobian: bool) -> Self {
        SamplerConfig { jacobian, ..*self }
    }

    pub fn with_dimension(&self, dimension: Dimension) -> Self {
        SamplerConfig { dimension, ..*self }
    }

    /// Root seed from which every per-batch generator derives.
    pub fn with_seed(&self, seed: u64) -> Self {
        SamplerConfig { seed, ..*self }
    }
}

/// The sampler: an immutable (pulse, target, configuration) triple from
/// which batches of trajectory seeds are generated independently.
pub struct AdkSampler<P, T> {
    pulse: P,
    target: T,
    config: SamplerConfig,
    // the prefactor actually applied, after any capability downgrade
    prefactor: Prefactor,
    t_samples: Vec<f64>,
    volume: f64,
}

impl<P, T> AdkSampler<P, T>
where
    P: Pulse,
    T: Target,
{
    /// Validates the configuration against the pulse and target and
    /// derives the birth-time samples and the sample-volume weight.
    pub fn new(pulse: P, target: T, config: SamplerConfig) -> Result<Self, ConfigError> {
        if config.n_t == 0 {
            return Err(ConfigError::sampler("at least one birth time is required"));
        }
        if !(config.t_end >= config.t_start) {
            return Err(ConfigError::sampler("birth-time interval is empty"));
        }
        if !(config.cutoff >= 0.0) {
            return Err(ConfigError::sampler("rate cutoff must be non-negative"));
        }
        match config.momentum {
            MomentumSpec::Grid { kd_max, n_kd, kz_max, n_kz } => {
                if n_kd == 0 || n_kz == 0 {
                    return Err(ConfigError::sampler("momentum grid counts must be positive"));
                }
                if !(kd_max.abs() > 0.0 || kz_max.abs() > 0.0) {
                    return Err(ConfigError::sampler("at least one momentum extent must be nonzero"));
                }
            },
            MomentumSpec::MonteCarlo { n_samples, kd_max, kz_max } => {
                if n_samples == 0 {
                    return Err(ConfigError::sampler("at least one Monte Carlo sample is required"));
                }
                if !(kd_max >= 0.0 && kz_max >= 0.0) {
                    return Err(ConfigError::sampler("Monte Carlo momentum extents must be non-negative"));
                }
                if kd_max == 0.0 && kz_max == 0.0 {
                    return Err(ConfigError::sampler("at least one momentum extent must be nonzero"));
                }
            },
        }
        if target.ionization_potential() <= 0.0 {
            return Err(ConfigError::target("ionization potential must be positive"));
        }

        let prefactor = if config.prefactor == Prefactor::CoulombCorrected && !pulse.monochromatic() {
            warn!("Coulomb-corrected prefactor requires a monochromatic pulse; using the standard prefactor instead");
            Prefactor::Standard
        } else {
            config.prefactor
        };

        let keldysh = pulse.keldysh_parameter(target.ionization_potential());
        if keldysh >= 1.0 {
            warn!("Keldysh parameter = {:.3}: tunneling rates are not valid in the multiphoton regime", keldysh);
        } else if keldysh >= 0.6 {
            warn!("Keldysh parameter = {:.3}: the tunneling approximation is marginal", keldysh);
        }

        let t_samples = match config.momentum {
            MomentumSpec::Grid { .. } => {
                (0..config.n_t)
                    .map(|i| grid_point_on(config.t_start, config.t_end, config.n_t, i))
                    .collect()
            },
            MomentumSpec::MonteCarlo { .. } => {
                let mut rng = root_rng(config.seed);
                // keep the birth-time draws off the per-batch streams
                rng.long_jump();
                let mut t: Vec<f64> = (0..config.n_t)
                    .map(|_| config.t_start + (config.t_end - config.t_start) * rng.gen::<f64>())
                    .collect();
                t.sort_by(|a, b| a.partial_cmp(b).unwrap());
                t
            },
        };

        let dt = match config.momentum {
            MomentumSpec::Grid { .. } => {
                if config.n_t > 1 {
                    (config.t_end - config.t_start) / ((config.n_t - 1) as f64)
                } else {
                    1.0
                }
            },
            MomentumSpec::MonteCarlo { .. } => (config.t_end - config.t_start) / (config.n_t as f64),
        };

        let volume = match (config.dimension, config.momentum) {
            (Dimension::Two, MomentumSpec::Grid { kd_max, n_kd, .. }) => dt * grid_step(kd_max, n_kd),
            (Dimension::Three, MomentumSpec::Grid { kd_max, n_kd, kz_max, n_kz }) => {
                dt * grid_step(kd_max, n_kd) * grid_step(kz_max, n_kz)
            },
            (Dimension::Two, MomentumSpec::MonteCarlo { n_samples, kd_max, .. }) => {
                dt * mc_extent(kd_max) / (n_samples as f64)
            },
            (Dimension::Three, MomentumSpec::MonteCarlo { n_samples, kd_max, kz_max }) => {
                dt * mc_extent(kd_max) * mc_extent(kz_max) / (n_samples as f64)
            },
        };

        Ok(AdkSampler {
            pulse,
            target,
            config,
            prefactor,
            t_samples,
            volume,
        })
    }

    /// Number of batches, one per birth time.
    pub fn batch_count(&self) -> usize {
        self.config.n_t
    }

    /// Upper bound on the number of seeds a single batch can emit.
    pub fn batch_max_size(&self) -> usize {
        match self.config.momentum {
            MomentumSpec::Grid { n_kd, n_kz, .. } => {
                let n_kz = if self.config.dimension == Dimension::Two { 1 } else { n_kz };
                n_kd * n_kz
            },
            MomentumSpec::MonteCarlo { n_samples, .. } => n_samples,
        }
    }

    /// Entries per emitted seed row.
    pub fn row_width(&self) -> usize {
        match (self.config.dimension, self.config.phase_method) {
            (Dimension::Two, PhaseMethod::Ctmc) => 6,
            (Dimension::Two, _) => 7,
            (Dimension::Three, PhaseMethod::Ctmc) => 8,
            (Dimension::Three, _) => 9,
        }
    }

    /// The prefactor in effect, after any capability downgrade.
    pub fn prefactor(&self) -> Prefactor {
        self.prefactor
    }

    /// The birth times, ascending.
    pub fn birth_times(&self) -> &[f64] {
        &self.t_samples
    }

    /// Generates the seeds born at the `index`-th birth time. Pure
    /// function of (pulse, target, config, index), so batches can be
    /// evaluated in any order or in parallel.
    pub fn generate_batch(&self, index: usize) -> SeedBatch {
        let t_r = self.t_samples[index];
        let (f_x, f_y) = self.pulse.electric_field(t_r);
        let frame = FieldFrame::new(f_x, f_y);
        let ctx = BatchAmplitude::new(
            &self.pulse,
            &self.target,
            &frame,
            t_r,
            self.prefactor,
            self.volume,
            self.config.jacobian,
        );
        let mut batch = SeedBatch::with_capacity(self.row_width(), self.batch_max_size());

        match self.config.momentum {
            MomentumSpec::Grid { kd_max, n_kd, kz_max, n_kz } => {
                let n_kz = if self.config.dimension == Dimension::Two { 1 } else { n_kz };
                for i_d in 0..n_kd {
                    let k_d = grid_point(kd_max, n_kd, i_d);
                    for i_z in 0..n_kz {
                        let k_z = if self.config.dimension == Dimension::Two {
                            0.0
                        } else {
                            grid_point(kz_max, n_kz, i_z)
                        };
                        self.emit_candidate(&ctx, &frame, t_r, k_d, k_z, &mut batch);
                    }
                }
            },
            MomentumSpec::MonteCarlo { n_samples, kd_max, kz_max } => {
                let mut rng = self.batch_rng(index);
                let kz_max = if self.config.dimension == Dimension::Two { 0.0 } else { kz_max };
                for _ in 0..n_samples {
                    let k_d = if kd_max > 0.0 {
                        kd_max * (2.0 * rng.gen::<f64>() - 1.0)
                    } else {
                        0.0
                    };
                    let k_z = if kz_max > 0.0 {
                        kz_max * (2.0 * rng.gen::<f64>() - 1.0)
                    } else {
                        0.0
                    };
                    self.emit_candidate(&ctx, &frame, t_r, k_d, k_z, &mut batch);
                }
            },
        }

        batch
    }

    fn emit_candidate(
        &self,
        ctx: &BatchAmplitude,
        frame: &FieldFrame,
        t_r: f64,
        k_d: f64,
        k_z: f64,
        batch: &mut SeedBatch,
    ) {
        if k_d.abs() < KD_CUTOFF {
            return;
        }
        let (sin_exit, cos_exit) = frame.exit_azimuth().sin_cos();
        let k_x = -k_d * sin_exit;
        let k_y = k_d * cos_exit;

        let amp = ctx.evaluate(k_x, k_y, k_d, k_z);
        let rate = amp.norm_sqr();
        if rate.is_nan() || rate < self.config.cutoff {
            return;
        }

        // tunneling exit sits along -F at the radius where the barrier opens
        let ip = self.target.ionization_potential();
        let r0 = (ip + 0.5 * (k_d * k_d + k_z * k_z)) / frame.magnitude();
        let x0 = r0 * cos_exit;
        let y0 = r0 * sin_exit;

        match (self.config.dimension, self.config.phase_method) {
            (Dimension::Three, PhaseMethod::Ctmc) => {
                batch.push_row(&[x0, y0, 0.0, k_x, k_y, k_z, t_r, rate]);
            },
            (Dimension::Three, _) => {
                batch.push_row(&[x0, y0, 0.0, k_x, k_y, k_z, t_r, rate, amp.arg()]);
            },
            (Dimension::Two, PhaseMethod::Ctmc) => {
                batch.push_row(&[x0, y0, k_x, k_y, t_r, rate]);
            },
            (Dimension::Two, _) => {
                batch.push_row(&[x0, y0, k_x, k_y, t_r, rate, amp.arg()]);
            },
        }
    }

    fn batch_rng(&self, index: usize) -> Xoshiro256StarStar {
        let mut rng = root_rng(self.config.seed);
        for _ in 0..index {
            rng.jump();
        }
        rng
    }
}

impl<P, T> AdkSampler<P, T>
where
    P: Pulse + Sync,
    T: Target + Sync,
{
    /// Generates every batch, in parallel, returning them in index
    /// order regardless of completion order.
    pub fn generate_all(&self) -> Vec<SeedBatch> {
        (0..self.batch_count())
            .into_par_iter()
            .map(|i| self.generate_batch(i))
            .collect()
    }

    /// Like [`generate_all`](Self::generate_all), but checks the flag at
    /// every batch boundary: once it is raised, no further batch is
    /// started and the contiguous run of completed batches is returned.
    pub fn generate_until(&self, cancel: &AtomicBool) -> Vec<SeedBatch> {
        let batches: Vec<Option<SeedBatch>> = (0..self.batch_count())
            .into_par_iter()
            .map(|i| {
                if cancel.load(Ordering::Relaxed) {
                    None
                } else {
                    Some(self.generate_batch(i))
                }
            })
            .collect();
        batches.into_iter().map_while(|b| b).collect()
    }
}

fn root_rng(seed: u64) -> Xoshiro256StarStar {
    let seed = 0x243f6a8885a308d3u64.wrapping_add(seed.wrapping_mul(0x9e3779b97f4a7c15));
    Xoshiro256StarStar::seed_from_u64(seed)
}

/// The i-th of `count` points spanning [start, end]; the single point
/// of a one-point partition is `start`.
fn grid_point_on(start: f64, end: f64, count: usize, index: usize) -> f64 {
    if count > 1 {
        start + (end - start) * (index as f64) / ((count - 1) as f64)
    } else {
        start
    }
}

/// The i-th of `count` points spanning ±|extent|; a one-point axis
/// collapses onto 0.
fn grid_point(extent: f64, count: usize, index: usize) -> f64 {
    if count > 1 {
        let extent = extent.abs();
        -extent + 2.0 * extent * (index as f64) / ((count - 1) as f64)
    } else {
        0.0
    }
}

/// The step length of a ±|extent| grid; 1 for a one-point axis, so a
/// collapsed axis does not weigh the sample volume down.
fn grid_step(extent: f64, count: usize) -> f64 {
    if count > 1 {
        2.0 * extent.abs() / ((count - 1) as f64)
    } else {
        1.0
    }
}

/// The length of a Monte Carlo axis; 1 if the axis is pinned at 0.
fn mc_extent(max: f64) -> f64 {
    if max > 0.0 {
        2.0 * max
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex;
    use super::*;
    use crate::pulse::{CosQuarticPulse, CosSquaredPulse};
    use crate::target::{Atom, Molecule};

    fn hydrogen() -> Atom {
        Atom::new(0.5, 1.0).unwrap()
    }

    fn circular_pulse() -> CosQuarticPulse {
        CosQuarticPulse::new(4.0e14, 800.0, 4.0).unwrap()
            .with_ellipticity(1.0).unwrap()
    }

    #[test]
    fn grid_batch_drops_the_centre_point() {
        // 21-point k_d grid: the k_d = 0 point falls below the
        // transverse-momentum cutoff and the other 20 survive
        let pulse = CosSquaredPulse::new(4.0e14, 800.0, 2.0).unwrap();
        let config = SamplerConfig::new(
            0.0, 0.0, 1,
            MomentumSpec::Grid { kd_max: 1.0, n_kd: 21, kz_max: 0.0, n_kz: 1 },
        ).with_dimension(Dimension::Two);
        let sampler = AdkSampler::new(pulse, hydrogen(), config).unwrap();
        assert!(sampler.batch_count() == 1);
        assert!(sampler.batch_max_size() == 21);
        let batch = sampler.generate_batch(0);
        assert!(batch.width() == 6);
        assert!(batch.len() == 20);
    }

    #[test]
    fn rate_peaks_at_smallest_transverse_momentum() {
        // sample at a carrier extremum so the field is strong
        let pulse = CosSquaredPulse::new(4.0e14, 800.0, 2.0).unwrap();
        let t = 0.25 * pulse.period();
        let config = SamplerConfig::new(
            t, t, 1,
            MomentumSpec::Grid { kd_max: 1.0, n_kd: 21, kz_max: 0.0, n_kz: 1 },
        ).with_dimension(Dimension::Two);
        let sampler = AdkSampler::new(pulse, hydrogen(), config).unwrap();
        let batch = sampler.generate_batch(0);
        assert!(batch.len() == 20);
        let rates: Vec<f64> = batch.rows().map(|row| row[5]).collect();
        // monotone increase towards the centre from either side, with
        // the two innermost points (k_d = ±0.1) tied for the maximum
        for i in 0..9 {
            assert!(rates[i] < rates[i + 1]);
        }
        for i in 10..19 {
            assert!(rates[i] > rates[i + 1]);
        }
        assert!(((rates[9] - rates[10]) / rates[9]).abs() < 1.0e-9);
        assert!(rates.iter().all(|r| *r > 0.0 && r.is_finite()));
    }

    #[test]
    fn exit_geometry_invariants() {
        let pulse = circular_pulse();
        let t_r = 0.15 * pulse.period();
        let config = SamplerConfig::new(
            t_r, t_r, 1,
            MomentumSpec::Grid { kd_max: 0.8, n_kd: 9, kz_max: 0.5, n_kz: 5 },
        );
        let sampler = AdkSampler::new(pulse, hydrogen(), config).unwrap();
        let batch = sampler.generate_batch(0);
        assert!(batch.width() == 8);
        // 9 x 5 grid minus the 5 candidates on the k_d = 0 line
        assert!(batch.len() == 40);

        let (f_x, f_y) = pulse.electric_field(t_r);
        let f = f_x.hypot(f_y);
        for row in batch.rows() {
            let (x0, y0, k_x, k_y, k_z) = (row[0], row[1], row[3], row[4], row[5]);
            // r0 F = I_p + (k_d² + k_z²)/2
            let r0 = (x0 * x0 + y0 * y0).sqrt();
            let k_sqr = k_x * k_x + k_y * k_y + k_z * k_z;
            assert!((r0 * f - (0.5 + 0.5 * k_sqr)).abs() < 1.0e-10);
            // transverse momentum is perpendicular to the field
            assert!((k_x * f_x + k_y * f_y).abs() < 1.0e-12);
            // the exit sits on the downfield side
            assert!(x0 * f_x + y0 * f_y < 0.0);
            assert!(row[6] == t_r);
        }
    }

    #[test]
    fn row_width_follows_phase_method() {
        let pulse = circular_pulse();
        let t = 0.1 * pulse.period();
        let atom = hydrogen().with_orbital(1, 1, 1.0).unwrap();
        let base = SamplerConfig::new(
            t, t, 1,
            MomentumSpec::Grid { kd_max: 0.5, n_kd: 11, kz_max: 0.0, n_kz: 1 },
        ).with_dimension(Dimension::Two)
            .with_prefactor(Prefactor::Standard);

        let ctmc = AdkSampler::new(pulse, atom, base).unwrap();
        assert!(ctmc.row_width() == 6);
        assert!(ctmc.generate_batch(0).width() == 6);

        for method in [PhaseMethod::Qtmc, PhaseMethod::Scts] {
            let sampler = AdkSampler::new(pulse, atom, base.with_phase_method(method)).unwrap();
            assert!(sampler.row_width() == 7);
            let batch = sampler.generate_batch(0);
            assert!(batch.width() == 7);
            assert!(!batch.is_empty());
            // a p orbital with m = 1 gives the amplitude a genuine phase
            let phases: Vec<f64> = batch.rows().map(|row| row[6]).collect();
            assert!(phases.iter().all(|p| p.is_finite() && p.abs() <= std::f64::consts::PI));
            assert!(phases.iter().any(|p| p.abs() > 1.0e-6));
        }

        let sampler = AdkSampler::new(
            pulse,
            atom,
            base.with_dimension(Dimension::Three).with_phase_method(PhaseMethod::Qtmc),
        ).unwrap();
        assert!(sampler.row_width() == 9);
    }

    #[test]
    fn cutoff_empties_the_batch() {
        let pulse = circular_pulse();
        let t = 0.1 * pulse.period();
        let config = SamplerConfig::new(
            t, t, 1,
            MomentumSpec::Grid { kd_max: 0.5, n_kd: 11, kz_max: 0.0, n_kz: 1 },
        ).with_cutoff(1.0);
        let sampler = AdkSampler::new(pulse, hydrogen(), config).unwrap();
        assert!(sampler.batch_count() == 1);
        let batch = sampler.generate_batch(0);
        // every rate falls below the cutoff: empty batch, not an error
        assert!(batch.is_empty());
        assert!(batch.len() == 0);
    }

    /// A field with no carrier, for exercising the capability downgrade.
    #[derive(Copy, Clone)]
    struct StaticField;

    impl Pulse for StaticField {
        fn peak_intensity(&self) -> f64 { 1.0e14 }
        fn wavelength(&self) -> f64 { 800.0 }
        fn ellipticity(&self) -> f64 { 0.0 }
        fn azimuth(&self) -> f64 { 0.0 }
        fn cep(&self) -> f64 { 0.0 }
        fn time_shift(&self) -> f64 { 0.0 }
        fn monochromatic(&self) -> bool { false }
        fn unit_envelope(&self, _t: f64) -> f64 { 1.0 }
        fn a_x(&self, _t: Complex<f64>) -> Complex<f64> { Complex::new(0.0, 0.0) }
        fn a_y(&self, _t: Complex<f64>) -> Complex<f64> { Complex::new(0.0, 0.0) }
        fn f_x(&self, _t: Complex<f64>) -> Complex<f64> { Complex::new(self.peak_field(), 0.0) }
        fn f_y(&self, _t: Complex<f64>) -> Complex<f64> { Complex::new(0.0, 0.0) }
    }

    #[test]
    fn coulomb_correction_requires_monochromatic_pulse() {
        let config = SamplerConfig::new(
            0.0, 10.0, 2,
            MomentumSpec::Grid { kd_max: 0.5, n_kd: 5, kz_max: 0.0, n_kz: 1 },
        ).with_prefactor(Prefactor::CoulombCorrected);

        let sampler = AdkSampler::new(StaticField, hydrogen(), config).unwrap();
        assert!(sampler.prefactor() == Prefactor::Standard);

        // a monochromatic pulse keeps the correction
        let sampler = AdkSampler::new(circular_pulse(), hydrogen(), config).unwrap();
        assert!(sampler.prefactor() == Prefactor::CoulombCorrected);
        let batch = sampler.generate_batch(1);
        assert!(batch.rows().all(|row| row[7].is_finite()));
    }

    #[test]
    fn molecular_orbital_batch() {
        let pulse = circular_pulse();
        let t = 0.2 * pulse.period();
        // p-like orbital with a small s admixture, arbitrarily oriented
        let molecule = Molecule::from_coeffs(0.58, 1.0, &[
            vec![0.3],
            vec![0.0, 1.0, 0.0],
        ]).unwrap()
        .with_orientation(0.4, 1.1, -0.2);
        let config = SamplerConfig::new(
            t, t, 1,
            MomentumSpec::Grid { kd_max: 0.6, n_kd: 7, kz_max: 0.4, n_kz: 3 },
        ).with_prefactor(Prefactor::Standard)
            .with_phase_method(PhaseMethod::Qtmc)
            .with_jacobian(true);
        let sampler = AdkSampler::new(pulse, molecule, config).unwrap();
        let batch = sampler.generate_batch(0);
        assert!(batch.width() == 9);
        assert!(!batch.is_empty());
        for row in batch.rows() {
            assert!(row[7] > 0.0 && row[7].is_finite());
            assert!(row[8].is_finite());
        }
    }

    #[test]
    fn monte_carlo_reproducibility_and_ordering() {
        let pulse = circular_pulse();
        let config = SamplerConfig::new(
            -20.0, 20.0, 4,
            MomentumSpec::MonteCarlo { n_samples: 64, kd_max: 0.8, kz_max: 0.4 },
        ).with_seed(7);

        let first = AdkSampler::new(pulse, hydrogen(), config).unwrap();
        let second = AdkSampler::new(pulse, hydrogen(), config).unwrap();

        // birth times are sorted draws, identical across constructions
        let times = first.birth_times();
        assert!(times.len() == 4);
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert!(times == second.birth_times());

        for i in 0..4 {
            assert!(first.generate_batch(i) == second.generate_batch(i));
        }

        // parallel generation returns the same batches in index order
        let all = first.generate_all();
        assert!(all.len() == 4);
        for (i, batch) in all.iter().enumerate() {
            assert!(*batch == first.generate_batch(i));
        }

        // a different seed changes the draws
        let other = AdkSampler::new(pulse, hydrogen(), config.with_seed(8)).unwrap();
        assert!(other.birth_times() != times);
    }

    #[test]
    fn cancellation_preserves_completed_batches() {
        let pulse = circular_pulse();
        let config = SamplerConfig::new(
            -20.0, 20.0, 4,
            MomentumSpec::MonteCarlo { n_samples: 16, kd_max: 0.8, kz_max: 0.4 },
        );
        let sampler = AdkSampler::new(pulse, hydrogen(), config).unwrap();

        let run = AtomicBool::new(false);
        assert!(sampler.generate_until(&run).len() == 4);

        let cancelled = AtomicBool::new(true);
        assert!(sampler.generate_until(&cancelled).is_empty());
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let grid = MomentumSpec::Grid { kd_max: 1.0, n_kd: 5, kz_max: 0.0, n_kz: 1 };
        let cases = [
            SamplerConfig::new(0.0, 1.0, 0, grid),
            SamplerConfig::new(1.0, 0.0, 5, grid),
            SamplerConfig::new(0.0, 1.0, 5, grid).with_cutoff(-1.0),
            SamplerConfig::new(0.0, 1.0, 5, MomentumSpec::Grid { kd_max: 1.0, n_kd: 0, kz_max: 0.0, n_kz: 1 }),
            SamplerConfig::new(0.0, 1.0, 5, MomentumSpec::Grid { kd_max: 0.0, n_kd: 5, kz_max: 0.0, n_kz: 5 }),
            SamplerConfig::new(0.0, 1.0, 5, MomentumSpec::MonteCarlo { n_samples: 0, kd_max: 1.0, kz_max: 0.0 }),
            SamplerConfig::new(0.0, 1.0, 5, MomentumSpec::MonteCarlo { n_samples: 16, kd_max: -1.0, kz_max: 0.0 }),
            SamplerConfig::new(0.0, 1.0, 5, MomentumSpec::MonteCarlo { n_samples: 16, kd_max: 0.0, kz_max: 0.0 }),
        ];
        for config in cases {
            assert!(AdkSampler::new(circular_pulse(), hydrogen(), config).is_err());
        }
    }
}
