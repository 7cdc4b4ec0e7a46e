/// Maps any integer coordinate onto `0..size` periodically.
#[inline]
pub fn wrap(index: isize, size: usize) -> usize {
  index.rem_euclid(size as isize) as usize
}

/// `(-1)^(x + y)`: undoes the checkerboard left by transforming a centered spectrum.
#[inline]
pub fn checkerboard_sign(x: usize, y: usize) -> f32 {
  if (x + y) & 1 == 1 {
    -1.0
  } else {
    1.0
  }
}
