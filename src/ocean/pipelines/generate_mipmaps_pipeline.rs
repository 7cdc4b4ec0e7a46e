use rayon::prelude::*;

use crate::ocean::texture::{GradientMap, GradientTexel};

/// Box-filtered mip chain of the gradient map, from half resolution down to 1x1.
pub struct GenerateMipmapsPipeline {
  size: usize,
}

impl GenerateMipmapsPipeline {
  pub fn init(size: usize) -> Self {
    Self { size }
  }

  /// Sizes of every level below the base.
  pub fn level_sizes(&self) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut size = self.size;
    while size > 1 {
      size = (size / 2).max(1);
      sizes.push(size);
    }

    sizes
  }

  pub fn allocate_levels(&self) -> Vec<GradientMap> {
    self
      .level_sizes()
      .into_iter()
      .map(|size| GradientMap::new(size, size))
      .collect()
  }

  pub fn dispatch(&self, base: &GradientMap, levels: &mut [GradientMap]) {
    debug_assert_eq!(base.width(), self.size);

    for level in 0..levels.len() {
      let (done, rest) = levels.split_at_mut(level);
      let src = if level == 0 { base } else { &done[level - 1] };
      downsample(src, &mut rest[0]);
    }
  }
}

fn downsample(src: &GradientMap, dst: &mut GradientMap) {
  let width = dst.width();
  let src_width = src.width();
  let src_height = src.height();

  dst
    .texels_mut()
    .par_chunks_mut(width)
    .enumerate()
    .for_each(|(y, row)| {
      let y0 = (2 * y).min(src_height - 1);
      let y1 = (2 * y + 1).min(src_height - 1);

      for (x, texel) in row.iter_mut().enumerate() {
        let x0 = (2 * x).min(src_width - 1);
        let x1 = (2 * x + 1).min(src_width - 1);

        let taps = [src.get(x0, y0), src.get(x1, y0), src.get(x0, y1), src.get(x1, y1)];
        let mut sum = GradientTexel::default();
        for tap in taps {
          sum.slope_x += tap.slope_x;
          sum.slope_y += tap.slope_y;
          sum.fold += tap.fold;
          sum.unused += tap.unused;
        }

        *texel = GradientTexel {
          slope_x: sum.slope_x * 0.25,
          slope_y: sum.slope_y * 0.25,
          fold: sum.fold * 0.25,
          unused: sum.unused * 0.25,
        };
      }
    });
}
