use rayon::prelude::*;

use crate::ocean::ocean_parameters::OceanParameters;
use crate::ocean::texture::{DisplacementMap, GradientMap, GradientTexel};

/// Surface slope and Jacobian folding from the displacement map, using wrapped central
/// differences.
pub struct GradientFoldingPipeline {
  size: usize,
  choppy_scale: f32,
  grid_len: f32,
  fold_threshold: f32,
}

impl GradientFoldingPipeline {
  pub fn init(params: &OceanParameters) -> Self {
    Self {
      size: params.dmap_dim,
      choppy_scale: params.choppy_scale,
      grid_len: params.grid_len(),
      fold_threshold: params.fold_threshold,
    }
  }

  pub fn dispatch(&self, displacement: &DisplacementMap, gradient: &mut GradientMap) {
    debug_assert_eq!(displacement.width(), self.size);
    debug_assert_eq!(gradient.width(), self.size);

    let size = self.size;
    let jacobian_scale = self.choppy_scale * self.grid_len;
    let fold_threshold = self.fold_threshold;

    gradient
      .texels_mut()
      .par_chunks_mut(size)
      .enumerate()
      .for_each(|(y, row)| {
        let y = y as isize;
        for (x, texel) in row.iter_mut().enumerate() {
          let x = x as isize;

          let left = displacement.get_wrapped(x - 1, y);
          let right = displacement.get_wrapped(x + 1, y);
          let back = displacement.get_wrapped(x, y - 1);
          let front = displacement.get_wrapped(x, y + 1);

          let slope_x = -(right.dz - left.dz);
          let slope_y = -(front.dz - back.dz);

          // partial derivatives of the horizontal displacement along x and y
          let dx_x = (right.dx - left.dx) * jacobian_scale;
          let dy_x = (right.dy - left.dy) * jacobian_scale;
          let dx_y = (front.dx - back.dx) * jacobian_scale;
          let dy_y = (front.dy - back.dy) * jacobian_scale;

          let jacobian = (1.0 + dx_x) * (1.0 + dy_y) - dy_x * dx_y;

          *texel = GradientTexel {
            slope_x,
            slope_y,
            fold: (fold_threshold - jacobian).max(0.0),
            unused: 0.0,
          };
        }
      });
  }
}
