use thiserror::Error;

pub type OceanResult<T> = Result<T, OceanError>;

#[derive(Error, Debug)]
pub enum OceanError {
  /// Parameters that cannot produce a simulation. Fatal for the instance being built.
  #[error("invalid ocean parameters: {0}")]
  Configuration(String),

  /// The spectral transform failed or handed back unusable data. The tick is dropped and
  /// the previous output stays in place.
  #[error("spectral transform failed: {0}")]
  Transform(String),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}
