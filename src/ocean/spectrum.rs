//! Phillips spectrum and the deep-water dispersion relation.

use cgmath::{InnerSpace, Vector2};

/// Gravitational acceleration, cm/s^2.
pub const GRAV_ACCEL: f32 = 981.0;

pub const HALF_SQRT_2: f32 = 0.7071068;

/// Raw amplitudes are tiny; they are scaled by this before entering the spectrum so the
/// user-facing value stays in an editable range.
pub const DEFAULT_AMPLITUDE_SCALE: f32 = 1e-7;

/// Wave vector of grid cell `(row, col)` on the `(size + 1) x (size + 1)` frequency grid.
pub fn wave_vector(row: usize, col: usize, size: usize, patch_length: f32) -> Vector2<f32> {
  let step = 2.0 * std::f32::consts::PI / patch_length;
  let half = size as f32 / 2.0;

  Vector2::new((-half + col as f32) * step, (-half + row as f32) * step)
}

/// Phillips spectrum for wave vector `k`.
///
/// `wind_dir` is expected to be normalized. Waves moving against the wind are scaled by
/// `wind_dependency`. The zero wave vector carries no energy.
pub fn phillips(
  k: Vector2<f32>,
  wind_dir: Vector2<f32>,
  wind_speed: f32,
  amplitude: f32,
  wind_dependency: f32,
) -> f32 {
  let k_sqr = k.magnitude2();
  if k_sqr == 0.0 {
    return 0.0;
  }

  // largest possible wave from constant wind
  let l = wind_speed * wind_speed / GRAV_ACCEL;
  // damp out waves with very small length w << l
  let w = l / 1000.0;

  let k_cos = k.dot(wind_dir);
  let mut phillips =
    amplitude * (-1.0 / (l * l * k_sqr)).exp() / (k_sqr * k_sqr * k_sqr) * (k_cos * k_cos);

  if k_cos < 0.0 {
    phillips *= wind_dependency;
  }

  phillips * (-k_sqr * w * w).exp()
}

/// Angular frequency of a gravity wave: `omega^2 = g * |k|`.
pub fn dispersion_omega(k: Vector2<f32>) -> f32 {
  (GRAV_ACCEL * k.magnitude()).sqrt()
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn zero_wave_vector_has_no_energy_or_frequency() {
    let zero = Vector2::new(0.0, 0.0);
    for (speed, amplitude) in [(600.0, 0.35e-7), (20.0, 1.0), (0.0, 5.0)] {
      assert_eq!(phillips(zero, Vector2::new(1.0, 0.0), speed, amplitude, 0.07), 0.0);
    }
    assert_eq!(dispersion_omega(zero), 0.0);
  }

  #[test]
  fn center_of_grid_is_zero_wave_vector() {
    let k = wave_vector(32, 32, 64, 512.0);
    assert_eq!(k, Vector2::new(0.0, 0.0));

    let corner = wave_vector(0, 64, 64, 512.0);
    assert_relative_eq!(corner.x, 32.0 * 2.0 * std::f32::consts::PI / 512.0, max_relative = 1e-6);
    assert_relative_eq!(corner.y, -32.0 * 2.0 * std::f32::consts::PI / 512.0, max_relative = 1e-6);
  }

  #[test]
  fn waves_against_the_wind_are_suppressed() {
    let wind = Vector2::new(1.0, 0.0);
    let k = Vector2::new(0.01, 0.0);

    let along = phillips(k, wind, 600.0, 1.0, 0.07);
    let against = phillips(-k, wind, 600.0, 1.0, 0.07);

    assert!(along > 0.0);
    assert_relative_eq!(against, along * 0.07, max_relative = 1e-5);
  }

  #[test]
  fn crosswind_waves_vanish() {
    let p = phillips(Vector2::new(0.0, 0.02), Vector2::new(1.0, 0.0), 600.0, 1.0, 0.07);
    assert_eq!(p, 0.0);
  }

  #[test]
  fn spectrum_is_linear_in_amplitude() {
    let wind = Vector2::new(0.8, 0.6);
    let k = Vector2::new(0.02, 0.01);

    let base = phillips(k, wind, 600.0, 1e-7, 0.07);
    let tripled = phillips(k, wind, 600.0, 3e-7, 0.07);
    assert_relative_eq!(tripled, 3.0 * base, max_relative = 1e-5);
  }

  #[test]
  fn dispersion_matches_deep_water_relation() {
    let k = Vector2::new(0.03, 0.04);
    assert_relative_eq!(dispersion_omega(k), (981.0f32 * 0.05).sqrt(), max_relative = 1e-6);
  }
}
