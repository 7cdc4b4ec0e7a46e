use rayon::prelude::*;
use rustfft::num_complex::Complex32;

use crate::ocean::gaussian::GaussianSource;
use crate::ocean::ocean_parameters::OceanParameters;
use crate::ocean::spectrum::{dispersion_omega, phillips, wave_vector, HALF_SQRT_2};

/// Unused cells appended to every row of the initial spectrum.
pub const ROW_PADDING: usize = 4;

/// H0 and omega over the `(size + 1) x (size + 1)` frequency grid. The extra row and column
/// hold `+N/2`, so every `K` on the `size x size` tile has its `-K` partner stored.
#[derive(Debug, Clone)]
pub struct InitialSpectrum {
  size: usize,
  h0: Vec<Complex32>,
  omega: Vec<f32>,
}

impl InitialSpectrum {
  pub fn new(size: usize) -> Self {
    let len = (size + ROW_PADDING) * (size + 1);
    Self {
      size,
      h0: vec![Complex32::new(0.0, 0.0); len],
      omega: vec![0.0; len],
    }
  }

  pub fn size(&self) -> usize {
    self.size
  }

  /// Row stride of the stored buffers.
  pub fn input_width(&self) -> usize {
    self.size + ROW_PADDING
  }

  #[inline]
  pub fn index(&self, row: usize, col: usize) -> usize {
    row * self.input_width() + col
  }

  pub fn h0_at(&self, row: usize, col: usize) -> Complex32 {
    self.h0[self.index(row, col)]
  }

  pub fn omega_at(&self, row: usize, col: usize) -> f32 {
    self.omega[self.index(row, col)]
  }

  pub fn h0(&self) -> &[Complex32] {
    &self.h0
  }

  pub fn omega(&self) -> &[f32] {
    &self.omega
  }

  /// Largest angular frequency on the grid.
  pub fn max_omega(&self) -> f32 {
    self.omega.iter().fold(0.0, |max, &w| max.max(w))
  }
}

pub struct InitialSpectrumPipeline {
  size: usize,
  noise_data: Vec<f32>,
}

impl InitialSpectrumPipeline {
  pub fn init(size: usize, seed: u64) -> Self {
    let noise_data = generate_noise_data(size, seed);

    Self { size, noise_data }
  }

  pub fn dispatch(&self, params: &OceanParameters, spectrum: &mut InitialSpectrum) {
    debug_assert_eq!(spectrum.size, self.size);

    let size = self.size;
    let input_width = spectrum.input_width();
    let wind_dir = params.wind_direction();
    let amplitude = params.wave_amplitude * params.amplitude_scale;
    let noise = &self.noise_data;

    spectrum
      .h0
      .par_chunks_mut(input_width)
      .zip(spectrum.omega.par_chunks_mut(input_width))
      .enumerate()
      .for_each(|(row, (h0_row, omega_row))| {
        for col in 0..=size {
          let k = wave_vector(row, col, size, params.patch_length);

          let phil = if k.x == 0.0 && k.y == 0.0 {
            0.0
          } else {
            phillips(
              k,
              wind_dir,
              params.wind_speed,
              amplitude,
              params.wind_dependency,
            )
            .sqrt()
          };

          let n = 2 * (row * (size + 1) + col);
          h0_row[col] = Complex32::new(
            phil * noise[n] * HALF_SQRT_2,
            phil * noise[n + 1] * HALF_SQRT_2,
          );
          omega_row[col] = dispersion_omega(k);
        }
      });
  }
}

/// Two normal draws per grid point, real part first, in row-major order.
fn generate_noise_data(size: usize, seed: u64) -> Vec<f32> {
  let mut source = GaussianSource::new(seed);
  let mut buf = vec![0.0f32; 2 * (size + 1) * (size + 1)];
  source.fill(&mut buf);

  return buf;
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  fn params(size: usize) -> OceanParameters {
    OceanParameters {
      dmap_dim: size,
      ..Default::default()
    }
  }

  fn build(params: &OceanParameters, seed: u64) -> InitialSpectrum {
    let pipeline = InitialSpectrumPipeline::init(params.dmap_dim, seed);
    let mut spectrum = InitialSpectrum::new(params.dmap_dim);
    pipeline.dispatch(params, &mut spectrum);
    spectrum
  }

  #[test]
  fn zero_frequency_is_silent() {
    let spectrum = build(&params(16), 0);
    assert_eq!(spectrum.h0_at(8, 8), Complex32::new(0.0, 0.0));
    assert_eq!(spectrum.omega_at(8, 8), 0.0);
  }

  #[test]
  fn padding_cells_stay_empty() {
    let spectrum = build(&params(16), 3);
    for row in 0..=16 {
      for col in 17..spectrum.input_width() {
        assert_eq!(spectrum.h0_at(row, col), Complex32::new(0.0, 0.0));
        assert_eq!(spectrum.omega_at(row, col), 0.0);
      }
    }
  }

  #[test]
  fn omega_is_non_negative_and_symmetric() {
    let spectrum = build(&params(16), 0);
    for row in 0..=16 {
      for col in 0..=16 {
        let omega = spectrum.omega_at(row, col);
        assert!(omega >= 0.0);
        assert_eq!(omega, spectrum.omega_at(16 - row, 16 - col));
      }
    }
  }

  #[test]
  fn max_omega_sits_in_the_corner() {
    let spectrum = build(&params(16), 0);
    assert_eq!(spectrum.max_omega(), spectrum.omega_at(0, 0));
    assert!(spectrum.max_omega() > 0.0);
  }

  #[test]
  fn sample_matches_phillips_and_noise() {
    let p = params(16);
    let spectrum = build(&p, 11);

    let mut source = GaussianSource::new(11);
    let (row, col) = (5usize, 12usize);
    let mut xi = (0.0, 0.0);
    for n in 0..=(row * 17 + col) {
      let pair = (source.sample(), source.sample());
      if n == row * 17 + col {
        xi = pair;
      }
    }

    let k = wave_vector(row, col, 16, p.patch_length);
    let amp = phillips(
      k,
      p.wind_direction(),
      p.wind_speed,
      p.wave_amplitude * p.amplitude_scale,
      p.wind_dependency,
    )
    .sqrt();

    let h0 = spectrum.h0_at(row, col);
    assert_relative_eq!(h0.re, amp * xi.0 * HALF_SQRT_2, max_relative = 1e-5);
    assert_relative_eq!(h0.im, amp * xi.1 * HALF_SQRT_2, max_relative = 1e-5);
  }
}
