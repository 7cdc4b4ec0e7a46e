mod time_dependent_spectrum_pipeline;
mod initial_spectrum_pipeline;
mod waves_data_merge_pipeline;
mod gradient_folding_pipeline;
mod fft;
mod generate_mipmaps_pipeline;

pub use waves_data_merge_pipeline::{apply_sign_correction, WavesDataMergePipeline};
pub use time_dependent_spectrum_pipeline::{SpectrumChannels, TimeDependentSpectrumPipeline};
pub use initial_spectrum_pipeline::{InitialSpectrum, InitialSpectrumPipeline, ROW_PADDING};
pub use gradient_folding_pipeline::GradientFoldingPipeline;
pub use fft::{SpectralTransform, FFT};
pub use generate_mipmaps_pipeline::GenerateMipmapsPipeline;
