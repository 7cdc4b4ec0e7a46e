use rayon::prelude::*;
use rustfft::num_complex::Complex32;

use crate::ocean::pipelines::InitialSpectrum;

/// Frequency-domain vertical (dz) and horizontal (dx, dy) displacement, `size x size` each.
/// After the transform the same buffers hold the spatial-domain result.
#[derive(Debug, Clone)]
pub struct SpectrumChannels {
  size: usize,
  pub dz: Vec<Complex32>,
  pub dx: Vec<Complex32>,
  pub dy: Vec<Complex32>,
}

impl SpectrumChannels {
  pub fn new(size: usize) -> Self {
    let zero = Complex32::new(0.0, 0.0);
    Self {
      size,
      dz: vec![zero; size * size],
      dx: vec![zero; size * size],
      dy: vec![zero; size * size],
    }
  }

  pub fn size(&self) -> usize {
    self.size
  }

  pub fn channels_mut(&mut self) -> [&mut [Complex32]; 3] {
    [&mut self.dz, &mut self.dx, &mut self.dy]
  }
}

pub struct TimeDependentSpectrumPipeline {
  size: usize,
}

impl TimeDependentSpectrumPipeline {
  pub fn init(size: usize) -> Self {
    Self { size }
  }

  /// Evolves H0 to `time` (already scaled):
  /// `H(t, K) = H0(K) e^{i w t} + conj(H0(-K)) e^{-i w t}`, `D(t, K) = -i K/|K| H(t, K)`.
  pub fn dispatch(&self, spectrum: &InitialSpectrum, time: f32, channels: &mut SpectrumChannels) {
    debug_assert_eq!(spectrum.size(), self.size);
    debug_assert_eq!(channels.size, self.size);

    let size = self.size;
    let half = size as f32 * 0.5;
    let h0 = spectrum.h0();
    let omega = spectrum.omega();

    channels
      .dz
      .par_chunks_mut(size)
      .zip(channels.dx.par_chunks_mut(size))
      .zip(channels.dy.par_chunks_mut(size))
      .enumerate()
      .for_each(|(y, ((dz_row, dx_row), dy_row))| {
        for x in 0..size {
          let in_index = spectrum.index(y, x);
          let in_mindex = spectrum.index(size - y, size - x);

          let h0_k = h0[in_index];
          let h0_mk = h0[in_mindex];
          let (sin_v, cos_v) = (omega[in_index] * time).sin_cos();

          let ht = Complex32::new(
            (h0_k.re + h0_mk.re) * cos_v - (h0_k.im + h0_mk.im) * sin_v,
            (h0_k.re - h0_mk.re) * sin_v + (h0_k.im - h0_mk.im) * cos_v,
          );

          let mut kx = x as f32 - half;
          let mut ky = y as f32 - half;
          let sqr_k = kx * kx + ky * ky;
          let rsqr_k = if sqr_k > 1e-12 { 1.0 / sqr_k.sqrt() } else { 0.0 };
          kx *= rsqr_k;
          ky *= rsqr_k;

          dz_row[x] = ht;
          dx_row[x] = Complex32::new(ht.im * kx, -ht.re * kx);
          dy_row[x] = Complex32::new(ht.im * ky, -ht.re * ky);
        }
      });
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ocean::pipelines::InitialSpectrumPipeline;
  use crate::ocean::OceanParameters;
  use approx::assert_relative_eq;

  const SIZE: usize = 16;

  fn evolve(time: f32) -> (InitialSpectrum, SpectrumChannels) {
    let params = OceanParameters {
      dmap_dim: SIZE,
      ..Default::default()
    };
    let mut spectrum = InitialSpectrum::new(SIZE);
    InitialSpectrumPipeline::init(SIZE, 5).dispatch(&params, &mut spectrum);

    let mut channels = SpectrumChannels::new(SIZE);
    TimeDependentSpectrumPipeline::init(SIZE).dispatch(&spectrum, time, &mut channels);
    (spectrum, channels)
  }

  #[test]
  fn zero_time_is_h0_plus_conjugate_mirror() {
    let (spectrum, channels) = evolve(0.0);

    for y in 0..SIZE {
      for x in 0..SIZE {
        let expected = spectrum.h0_at(y, x) + spectrum.h0_at(SIZE - y, SIZE - x).conj();
        assert_eq!(channels.dz[y * SIZE + x], expected);
      }
    }
  }

  #[test]
  fn evolved_spectrum_is_hermitian() {
    let (_, channels) = evolve(3.7);

    for y in 1..SIZE {
      for x in 1..SIZE {
        let k = y * SIZE + x;
        let mk = (SIZE - y) * SIZE + (SIZE - x);
        for channel in [&channels.dz, &channels.dx, &channels.dy] {
          assert_relative_eq!(channel[k].re, channel[mk].re, epsilon = 1e-12);
          assert_relative_eq!(channel[k].im, -channel[mk].im, epsilon = 1e-12);
        }
      }
    }
  }

  #[test]
  fn zero_frequency_has_no_horizontal_displacement() {
    let (_, channels) = evolve(1.0);
    let center = SIZE / 2 * SIZE + SIZE / 2;
    assert_eq!(channels.dx[center], Complex32::new(0.0, 0.0));
    assert_eq!(channels.dy[center], Complex32::new(0.0, 0.0));
  }

  #[test]
  fn horizontal_spectra_follow_wave_direction() {
    let (_, channels) = evolve(2.0);

    // K along +x: Dx = -i H, Dy = 0
    let along_x = SIZE / 2 * SIZE + SIZE / 2 + 3;
    let h = channels.dz[along_x];
    assert_relative_eq!(channels.dx[along_x].re, h.im, epsilon = 1e-12);
    assert_relative_eq!(channels.dx[along_x].im, -h.re, epsilon = 1e-12);
    assert_eq!(channels.dy[along_x], Complex32::new(0.0, 0.0));
  }
}
