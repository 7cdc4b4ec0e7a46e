mod error;
mod gaussian;
mod ocean_parameters;
mod ocean_surface;
mod pipelines;
mod spectrum;
mod texture;
mod utils;

pub use error::{OceanError, OceanResult};
pub use gaussian::GaussianSource;
pub use ocean_parameters::{OceanParameters, MAX_DMAP_DIM};
pub use ocean_surface::*;
pub use pipelines::{
  apply_sign_correction, InitialSpectrum, SpectralTransform, SpectrumChannels, FFT, ROW_PADDING,
};
pub use spectrum::*;
pub use texture::{DisplacementMap, DisplacementTexel, GradientMap, GradientTexel, Texture};
