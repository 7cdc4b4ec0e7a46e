use rayon::prelude::*;
use rustfft::num_complex::Complex32;

use crate::ocean::pipelines::SpectrumChannels;
use crate::ocean::texture::{DisplacementMap, DisplacementTexel};
use crate::ocean::utils::checkerboard_sign;

/// Multiplies a spatial-domain channel by `(-1)^(x + y)` in place. Applying it twice
/// restores the input.
pub fn apply_sign_correction(size: usize, channel: &mut [Complex32]) {
  channel
    .par_chunks_mut(size)
    .enumerate()
    .for_each(|(y, row)| {
      for (x, value) in row.iter_mut().enumerate() {
        *value *= checkerboard_sign(x, y);
      }
    });
}

/// Folds the three transformed channels into the displacement map.
pub struct WavesDataMergePipeline {
  size: usize,
  choppy_scale: f32,
}

impl WavesDataMergePipeline {
  pub fn init(size: usize, choppy_scale: f32) -> Self {
    Self { size, choppy_scale }
  }

  pub fn dispatch(&self, channels: &SpectrumChannels, displacement: &mut DisplacementMap) {
    debug_assert_eq!(channels.size(), self.size);
    debug_assert_eq!(displacement.width(), self.size);

    let size = self.size;
    let choppy_scale = self.choppy_scale;

    displacement
      .texels_mut()
      .par_chunks_mut(size)
      .enumerate()
      .for_each(|(y, row)| {
        for (x, texel) in row.iter_mut().enumerate() {
          let addr = y * size + x;
          let sign_correction = checkerboard_sign(x, y);

          *texel = DisplacementTexel {
            dx: channels.dx[addr].re * sign_correction * choppy_scale,
            dz: channels.dz[addr].re * sign_correction,
            dy: channels.dy[addr].re * sign_correction * choppy_scale,
            w: 1.0,
          };
        }
      });
  }
}
