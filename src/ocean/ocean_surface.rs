use crate::ocean::error::{OceanError, OceanResult};
use crate::ocean::ocean_parameters::OceanParameters;
use crate::ocean::pipelines::GenerateMipmapsPipeline;
use crate::ocean::pipelines::GradientFoldingPipeline;
use crate::ocean::pipelines::InitialSpectrumPipeline;
use crate::ocean::pipelines::TimeDependentSpectrumPipeline;
use crate::ocean::pipelines::WavesDataMergePipeline;
use crate::ocean::pipelines::{InitialSpectrum, SpectralTransform, SpectrumChannels, FFT};
use crate::ocean::texture::{DisplacementMap, GradientMap};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0;

/// One simulated ocean patch.
///
/// The initial spectrum is built once at construction. Every call to
/// [`advance_to`](OceanSurface::advance_to) recomputes the displacement and gradient maps from
/// it and the given time, so ticks can be issued in any order.
pub struct OceanSurface {
  params: OceanParameters,
  seed: u64,
  parameters_changed: bool,

  initial_spectrum: InitialSpectrum,
  spectrum_channels: SpectrumChannels,
  spatial_channels: SpectrumChannels,
  displacement_map: DisplacementMap,
  gradient_map: GradientMap,
  gradient_mips: Vec<GradientMap>,

  // pipelines
  initial_spectrum_pipeline: InitialSpectrumPipeline,
  time_dependent_spectrum_pipeline: TimeDependentSpectrumPipeline,
  fft: Box<dyn SpectralTransform>,
  waves_data_merge_pipeline: WavesDataMergePipeline,
  gradient_folding_pipeline: GradientFoldingPipeline,
  generate_mipmaps_pipeline: GenerateMipmapsPipeline,
}

impl OceanSurface {
  pub fn new(params: OceanParameters, seed: Option<u64>) -> OceanResult<OceanSurface> {
    params.validate()?;
    let fft = Box::new(FFT::init(params.dmap_dim));
    Self::with_transform(params, seed, fft)
  }

  /// Builds a surface that runs its inverse transforms through `fft`.
  pub fn with_transform(
    params: OceanParameters,
    seed: Option<u64>,
    fft: Box<dyn SpectralTransform>,
  ) -> OceanResult<OceanSurface> {
    params.validate()?;

    let seed = seed.unwrap_or(DEFAULT_SEED);
    let size = params.dmap_dim;

    let initial_spectrum_pipeline = InitialSpectrumPipeline::init(size, seed);
    let generate_mipmaps_pipeline = GenerateMipmapsPipeline::init(size);

    let mut surface = OceanSurface {
      initial_spectrum: InitialSpectrum::new(size),
      spectrum_channels: SpectrumChannels::new(size),
      spatial_channels: SpectrumChannels::new(size),
      displacement_map: DisplacementMap::new(size, size),
      gradient_map: GradientMap::new(size, size),
      gradient_mips: generate_mipmaps_pipeline.allocate_levels(),

      initial_spectrum_pipeline,
      time_dependent_spectrum_pipeline: TimeDependentSpectrumPipeline::init(size),
      fft,
      waves_data_merge_pipeline: WavesDataMergePipeline::init(size, params.choppy_scale),
      gradient_folding_pipeline: GradientFoldingPipeline::init(&params),
      generate_mipmaps_pipeline,

      params,
      seed,
      parameters_changed: false,
    };

    surface
      .initial_spectrum_pipeline
      .dispatch(&surface.params, &mut surface.initial_spectrum);

    log::info!(
      "ocean surface ready: {}x{} texels over a {} patch, seed {}",
      size,
      size,
      surface.params.patch_length,
      seed
    );

    Ok(surface)
  }

  /// Runs one tick at absolute simulation time `time`.
  ///
  /// On a transform failure the maps keep the previous tick's contents (flat before the first
  /// successful tick) and the error is returned.
  pub fn advance_to(&mut self, time: f32) -> OceanResult<(&DisplacementMap, &GradientMap)> {
    if !time.is_finite() {
      return Err(OceanError::Configuration(format!(
        "simulation time must be finite, got {}",
        time
      )));
    }

    if self.parameters_changed {
      self.rebuild();
      self.parameters_changed = false;
    }

    let scaled_time = time * self.params.time_scale;
    let max_phase = scaled_time.abs() * self.initial_spectrum.max_omega();
    if !scaled_time.is_finite() || !max_phase.is_finite() {
      return Err(OceanError::Configuration(format!(
        "simulation time {} is out of range for time_scale {}",
        time, self.params.time_scale
      )));
    }

    let start = instant::Instant::now();
    let size = self.params.dmap_dim;

    self.time_dependent_spectrum_pipeline.dispatch(
      &self.initial_spectrum,
      scaled_time,
      &mut self.spectrum_channels,
    );

    // transformed in the scratch channels, published only once all three succeed
    for channel in self.spectrum_channels.channels_mut() {
      if let Err(err) = self.fft.inverse_2d(size, channel) {
        log::warn!("dropping tick at t = {}: {}", time, err);
        return Err(err);
      }
      if channel.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
        log::warn!("dropping tick at t = {}: transform produced non-finite samples", time);
        return Err(OceanError::Transform(
          "transform produced non-finite samples".into(),
        ));
      }
    }
    std::mem::swap(&mut self.spectrum_channels, &mut self.spatial_channels);

    self
      .waves_data_merge_pipeline
      .dispatch(&self.spatial_channels, &mut self.displacement_map);
    self
      .gradient_folding_pipeline
      .dispatch(&self.displacement_map, &mut self.gradient_map);
    self
      .generate_mipmaps_pipeline
      .dispatch(&self.gradient_map, &mut self.gradient_mips);

    log::debug!("tick t = {} took {:?}", time, start.elapsed());

    Ok((&self.displacement_map, &self.gradient_map))
  }

  /// Replaces the parameters. The initial spectrum is rebuilt, with the same seed, on the
  /// next tick.
  pub fn change_parameters(&mut self, parameters: OceanParameters) -> OceanResult<()> {
    parameters.validate()?;

    log::info!("ocean parameters changed, initial spectrum will be rebuilt");
    self.params = parameters;
    self.parameters_changed = true;

    Ok(())
  }

  fn rebuild(&mut self) {
    let size = self.params.dmap_dim;

    if size != self.initial_spectrum.size() {
      self.initial_spectrum_pipeline = InitialSpectrumPipeline::init(size, self.seed);
      self.time_dependent_spectrum_pipeline = TimeDependentSpectrumPipeline::init(size);
      self.generate_mipmaps_pipeline = GenerateMipmapsPipeline::init(size);

      self.initial_spectrum = InitialSpectrum::new(size);
      self.spectrum_channels = SpectrumChannels::new(size);
      self.spatial_channels = SpectrumChannels::new(size);
      self.displacement_map = DisplacementMap::new(size, size);
      self.gradient_map = GradientMap::new(size, size);
      self.gradient_mips = self.generate_mipmaps_pipeline.allocate_levels();
    }

    self.waves_data_merge_pipeline = WavesDataMergePipeline::init(size, self.params.choppy_scale);
    self.gradient_folding_pipeline = GradientFoldingPipeline::init(&self.params);

    self
      .initial_spectrum_pipeline
      .dispatch(&self.params, &mut self.initial_spectrum);
  }

  pub fn parameters(&self) -> &OceanParameters {
    &self.params
  }

  pub fn seed(&self) -> u64 {
    self.seed
  }

  pub fn initial_spectrum(&self) -> &InitialSpectrum {
    &self.initial_spectrum
  }

  /// Raw transformed Dz, Dx, Dy of the last successful tick, before sign correction. All
  /// zero before the first one.
  pub fn spatial_channels(&self) -> &SpectrumChannels {
    &self.spatial_channels
  }

  pub fn displacement_map(&self) -> &DisplacementMap {
    &self.displacement_map
  }

  pub fn gradient_map(&self) -> &GradientMap {
    &self.gradient_map
  }

  /// Gradient map levels below the base, halving down to 1x1.
  pub fn gradient_mips(&self) -> &[GradientMap] {
    &self.gradient_mips
  }
}
