use std::sync::Arc;

use rayon::prelude::*;
use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};

use crate::ocean::error::{OceanError, OceanResult};

/// Inverse 2D discrete Fourier transform over one `size x size` complex channel, in place.
///
/// No normalization is expected: the amplitude constants of the spectrum are tuned for an
/// unscaled inverse transform.
pub trait SpectralTransform: Send {
  fn inverse_2d(&mut self, size: usize, channel: &mut [Complex32]) -> OceanResult<()>;
}

/// CPU transform: a row pass, a transpose, a second row pass and a transpose back.
pub struct FFT {
  size: usize,
  inverse: Arc<dyn Fft<f32>>,
  buffer: Vec<Complex32>,
}

impl FFT {
  pub fn init(size: usize) -> Self {
    let mut planner = FftPlanner::<f32>::new();
    let inverse = planner.plan_fft_inverse(size);

    return Self {
      size,
      inverse,
      buffer: vec![Complex32::new(0.0, 0.0); size * size],
    };
  }
}

impl SpectralTransform for FFT {
  fn inverse_2d(&mut self, size: usize, channel: &mut [Complex32]) -> OceanResult<()> {
    if size == 0 || channel.len() != size * size {
      return Err(OceanError::Transform(format!(
        "expected a {size}x{size} channel, got {} samples",
        channel.len()
      )));
    }
    if size != self.size {
      *self = FFT::init(size);
    }

    let inverse = &self.inverse;

    channel
      .par_chunks_mut(size)
      .for_each(|row| inverse.process(row));

    transpose(channel, &mut self.buffer, size);
    self
      .buffer
      .par_chunks_mut(size)
      .for_each(|column| inverse.process(column));
    transpose(&self.buffer, channel, size);

    Ok(())
  }
}

fn transpose(src: &[Complex32], dst: &mut [Complex32], size: usize) {
  dst
    .par_chunks_mut(size)
    .enumerate()
    .for_each(|(y, row)| {
      for (x, value) in row.iter_mut().enumerate() {
        *value = src[x * size + y];
      }
    });
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn impulse_at_origin_is_constant() {
    let size = 8;
    let mut channel = vec![Complex32::new(0.0, 0.0); size * size];
    channel[0] = Complex32::new(1.0, 0.0);

    FFT::init(size).inverse_2d(size, &mut channel).unwrap();

    for value in &channel {
      assert_relative_eq!(value.re, 1.0, epsilon = 1e-6);
      assert_relative_eq!(value.im, 0.0, epsilon = 1e-6);
    }
  }

  #[test]
  fn single_frequency_becomes_plane_wave() {
    let size = 16;
    let mut channel = vec![Complex32::new(0.0, 0.0); size * size];
    // one cycle along x
    channel[1] = Complex32::new(1.0, 0.0);

    FFT::init(size).inverse_2d(size, &mut channel).unwrap();

    for y in 0..size {
      for x in 0..size {
        let phase = 2.0 * std::f32::consts::PI * x as f32 / size as f32;
        let value = channel[y * size + x];
        assert_relative_eq!(value.re, phase.cos(), epsilon = 1e-5);
        assert_relative_eq!(value.im, phase.sin(), epsilon = 1e-5);
      }
    }
  }

  #[test]
  fn size_change_replans() {
    let mut fft = FFT::init(4);
    let mut channel = vec![Complex32::new(0.0, 0.0); 64];
    channel[0] = Complex32::new(2.0, 0.0);

    fft.inverse_2d(8, &mut channel).unwrap();
    assert_relative_eq!(channel[63].re, 2.0, epsilon = 1e-6);
  }

  #[test]
  fn malformed_channel_is_rejected() {
    let mut channel = vec![Complex32::new(0.0, 0.0); 10];
    let result = FFT::init(4).inverse_2d(4, &mut channel);
    assert!(matches!(result, Err(OceanError::Transform(_))));
  }
}
