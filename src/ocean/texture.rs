use bytemuck::{Pod, Zeroable};

use crate::ocean::utils::wrap;

/// One texel of the displacement map: horizontal x, vertical, horizontal y.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DisplacementTexel {
  pub dx: f32,
  pub dz: f32,
  pub dy: f32,
  pub w: f32,
}

impl DisplacementTexel {
  pub const FLAT: DisplacementTexel = DisplacementTexel {
    dx: 0.0,
    dz: 0.0,
    dy: 0.0,
    w: 1.0,
  };
}

impl Default for DisplacementTexel {
  fn default() -> Self {
    Self::FLAT
  }
}

/// One texel of the gradient/folding map.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GradientTexel {
  pub slope_x: f32,
  pub slope_y: f32,
  /// Zero where the surface does not fold; grows with the amount of overlap.
  pub fold: f32,
  pub unused: f32,
}

/// Row-major 2D grid of texels, sampled with wrap addressing where asked.
#[derive(Debug, Clone)]
pub struct Texture<T> {
  width: usize,
  height: usize,
  texels: Vec<T>,
}

pub type DisplacementMap = Texture<DisplacementTexel>;
pub type GradientMap = Texture<GradientTexel>;

impl<T: Pod + Zeroable + Default> Texture<T> {
  pub fn new(width: usize, height: usize) -> Self {
    Self::filled(width, height, T::default())
  }

  pub fn filled(width: usize, height: usize, value: T) -> Self {
    Self {
      width,
      height,
      texels: vec![value; width * height],
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  #[inline]
  pub fn get(&self, x: usize, y: usize) -> T {
    self.texels[y * self.width + x]
  }

  #[inline]
  pub fn set(&mut self, x: usize, y: usize, value: T) {
    self.texels[y * self.width + x] = value;
  }

  /// Periodic sampling: coordinates outside the grid wrap around.
  #[inline]
  pub fn get_wrapped(&self, x: isize, y: isize) -> T {
    self.get(wrap(x, self.width), wrap(y, self.height))
  }

  pub fn texels(&self) -> &[T] {
    &self.texels
  }

  pub fn texels_mut(&mut self) -> &mut [T] {
    &mut self.texels
  }

  /// Raw texel memory, laid out as an RGBA32F image.
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.texels)
  }
}
