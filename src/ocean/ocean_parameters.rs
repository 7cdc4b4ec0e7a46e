use std::path::Path;

use cgmath::{InnerSpace, Vector2};
use serde::{Deserialize, Serialize};

use crate::ocean::error::{OceanError, OceanResult};
use crate::ocean::spectrum::DEFAULT_AMPLITUDE_SCALE;

/// Largest supported displacement map resolution.
pub const MAX_DMAP_DIM: usize = 4096;

/// Configuration of one simulated ocean patch. Units follow the gravity constant: lengths in
/// centimetres, speeds in centimetres per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OceanParameters {
  /// Resolution of the displacement map (N). Must be even.
  pub dmap_dim: usize,
  /// Side length of the periodic patch.
  pub patch_length: f32,
  /// Multiplier applied to the time handed to `advance_to`.
  pub time_scale: f32,
  pub wave_amplitude: f32,
  /// Normalized before use.
  pub wind_dir: Vector2<f32>,
  pub wind_speed: f32,
  /// Factor kept for waves travelling against the wind.
  pub wind_dependency: f32,
  /// Horizontal displacement multiplier.
  pub choppy_scale: f32,
  /// Empirical factor applied to `wave_amplitude` before it enters the Phillips spectrum.
  pub amplitude_scale: f32,
  /// Jacobian value under which a texel starts to fold.
  pub fold_threshold: f32,
}

impl Default for OceanParameters {
  fn default() -> OceanParameters {
    OceanParameters {
      dmap_dim: 512,
      patch_length: 2000.0,
      time_scale: 0.8,
      wave_amplitude: 0.35,
      wind_dir: Vector2::new(0.8, 0.6),
      wind_speed: 600.0,
      wind_dependency: 0.07,
      choppy_scale: 1.3,
      amplitude_scale: DEFAULT_AMPLITUDE_SCALE,
      fold_threshold: 1.0,
    }
  }
}

impl OceanParameters {
  pub fn from_json_file<P: AsRef<Path>>(path: P) -> OceanResult<Self> {
    let source = std::fs::read_to_string(path)?;
    let params: OceanParameters = serde_json::from_str(&source)?;
    params.validate()?;
    Ok(params)
  }

  pub fn validate(&self) -> OceanResult<()> {
    if self.dmap_dim == 0 {
      return Err(OceanError::Configuration("dmap_dim must be positive".into()));
    }
    if self.dmap_dim > MAX_DMAP_DIM {
      return Err(OceanError::Configuration(format!(
        "dmap_dim must be at most {}, got {}",
        MAX_DMAP_DIM, self.dmap_dim
      )));
    }
    // the centered frequency grid needs a zero bin at N/2
    if self.dmap_dim % 2 != 0 {
      return Err(OceanError::Configuration(format!(
        "dmap_dim must be even, got {}",
        self.dmap_dim
      )));
    }
    if !self.patch_length.is_finite() || self.patch_length <= 0.0 {
      return Err(OceanError::Configuration(format!(
        "patch_length must be a positive finite length, got {}",
        self.patch_length
      )));
    }
    if !self.wind_dir.x.is_finite() || !self.wind_dir.y.is_finite() {
      return Err(OceanError::Configuration("wind_dir must be finite".into()));
    }
    if self.wind_dir.magnitude2() == 0.0 {
      return Err(OceanError::Configuration("wind_dir must not be zero".into()));
    }

    let scalars = [
      ("wind_speed", self.wind_speed),
      ("wind_dependency", self.wind_dependency),
      ("wave_amplitude", self.wave_amplitude),
      ("amplitude_scale", self.amplitude_scale),
      ("choppy_scale", self.choppy_scale),
      ("time_scale", self.time_scale),
      ("fold_threshold", self.fold_threshold),
    ];
    for (name, value) in scalars {
      if !value.is_finite() {
        return Err(OceanError::Configuration(format!(
          "{} must be finite, got {}",
          name, value
        )));
      }
    }

    // a negative spectrum has no real square root
    let non_negative = [
      ("wave_amplitude", self.wave_amplitude),
      ("amplitude_scale", self.amplitude_scale),
      ("wind_dependency", self.wind_dependency),
    ];
    for (name, value) in non_negative {
      if value < 0.0 {
        return Err(OceanError::Configuration(format!(
          "{} must not be negative, got {}",
          name, value
        )));
      }
    }

    Ok(())
  }

  /// Wind direction as a unit vector.
  pub fn wind_direction(&self) -> Vector2<f32> {
    self.wind_dir.normalize()
  }

  /// Texels per unit length of the patch.
  pub fn grid_len(&self) -> f32 {
    self.dmap_dim as f32 / self.patch_length
  }
}
