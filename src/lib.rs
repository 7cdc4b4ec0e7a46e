//! Spectral (FFT) ocean surface simulation.
//!
//! An [`OceanSurface`] turns a Phillips wave spectrum into a displacement map and a
//! slope/folding map per tick.

pub mod ocean;

pub use ocean::*;
