//! Custom implementations of the special functions the tunneling
//! prefactor is built from.

mod factorial;
mod gamma;
mod sph_harm;
mod wigner;

pub use factorial::*;
pub use gamma::*;
pub use sph_harm::*;
pub use wigner::*;
