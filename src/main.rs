use std::path::{Path, PathBuf};

use anyhow::Context;
use cgmath::{InnerSpace, Vector3};
use clap::Parser;

use fft_ocean::{DisplacementMap, GradientMap, OceanParameters, OceanSurface};

/// Runs the ocean simulation headless and dumps the last frame's maps as images.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
  /// JSON file with ocean parameters; missing fields use the defaults
  #[arg(short, long)]
  config: Option<PathBuf>,

  #[arg(short, long)]
  seed: Option<u64>,

  #[arg(short, long, default_value_t = 120)]
  frames: u32,

  /// Seconds between frames
  #[arg(long, default_value_t = 0.016)]
  dt: f32,

  /// Overrides the displacement map resolution
  #[arg(long)]
  dim: Option<usize>,

  #[arg(short, long, default_value = "ocean_out")]
  output: PathBuf,
}

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let args = Args::parse();

  let mut params = match &args.config {
    Some(path) => OceanParameters::from_json_file(path)
      .with_context(|| format!("loading {}", path.display()))?,
    None => OceanParameters::default(),
  };
  if let Some(dim) = args.dim {
    params.dmap_dim = dim;
  }

  let mut ocean = OceanSurface::new(params, args.seed)?;

  let start_instant = instant::Instant::now();
  for frame in 0..args.frames {
    let frame_instant = instant::Instant::now();
    ocean.advance_to(frame as f32 * args.dt)?;
    log::info!("frame {} took {:?}", frame, frame_instant.elapsed());
  }
  log::info!(
    "{} frames in {:?}",
    args.frames,
    start_instant.elapsed()
  );

  std::fs::create_dir_all(&args.output)
    .with_context(|| format!("creating {}", args.output.display()))?;

  save_height(ocean.displacement_map(), &args.output.join("height.png"))?;
  save_foam(ocean.gradient_map(), &args.output.join("foam.png"))?;
  save_normals(ocean.gradient_map(), ocean.parameters(), &args.output.join("normal.png"))?;

  log::info!("maps written to {}", args.output.display());

  Ok(())
}

fn save_height(displacement: &DisplacementMap, path: &Path) -> anyhow::Result<()> {
  let (min, max) = displacement
    .texels()
    .iter()
    .fold((f32::MAX, f32::MIN), |(lo, hi), t| (lo.min(t.dz), hi.max(t.dz)));
  let range = (max - min).max(f32::EPSILON);

  let image = image::GrayImage::from_fn(
    displacement.width() as u32,
    displacement.height() as u32,
    |x, y| {
      let height = displacement.get(x as usize, y as usize).dz;
      image::Luma([((height - min) / range * 255.0) as u8])
    },
  );
  image.save(path)?;

  Ok(())
}

fn save_foam(gradient: &GradientMap, path: &Path) -> anyhow::Result<()> {
  let image = image::GrayImage::from_fn(gradient.width() as u32, gradient.height() as u32, |x, y| {
    let fold = gradient.get(x as usize, y as usize).fold;
    image::Luma([(fold.min(1.0) * 255.0) as u8])
  });
  image.save(path)?;

  Ok(())
}

fn save_normals(gradient: &GradientMap, params: &OceanParameters, path: &Path) -> anyhow::Result<()> {
  // slopes are height differences across two texels
  let span = 2.0 / params.grid_len();

  let image = image::RgbImage::from_fn(gradient.width() as u32, gradient.height() as u32, |x, y| {
    let texel = gradient.get(x as usize, y as usize);
    let normal = Vector3::new(texel.slope_x, texel.slope_y, span).normalize();
    let encode = |v: f32| ((v * 0.5 + 0.5) * 255.0) as u8;
    image::Rgb([encode(normal.x), encode(normal.y), encode(normal.z)])
  });
  image.save(path)?;

  Ok(())
}
