//! Initial-condition sampling for semiclassical strong-field ionization
//!
//! Given an intense laser [pulse](pulse) and an atomic or molecular
//! [target](target), the [ADK sampler](sampler::AdkSampler) produces
//! batches of classical electron trajectory seeds at tunneling-exit
//! points on the real time axis. Each seed carries an initial position,
//! initial momentum, birth time and ionization-rate weight, and
//! optionally an initial quantum phase; batches are independent and can
//! be generated in parallel. Propagating the seeds is the job of a
//! downstream trajectory integrator.
//!
//! All quantities are in Hartree atomic units, except laser intensities
//! (W/cm²) and wavelengths (nm).

pub mod constants;
mod error;
pub mod geometry;
pub mod pulse;
pub mod sampler;
pub mod special_functions;
pub mod target;

pub use error::{ConfigError, ConfigErrorKind};
pub use pulse::{CosQuarticPulse, CosSquaredPulse, LaserPulse, Pulse, TrapezoidalPulse};
pub use sampler::{
    AdkSampler, Dimension, MomentumSpec, PhaseMethod, Prefactor, SamplerConfig, SeedBatch,
};
pub use target::{Atom, Molecule, Target};
