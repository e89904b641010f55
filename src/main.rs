use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};

use spheretracer::output::{PixelSink, PngSink, PpmSink};
use spheretracer::progress::{scanline_bar, NoProgress, RenderObserver};
use spheretracer::random::{entropy_rng, seeded_rng};
use spheretracer::scene;

mod cli;
mod logger;

use cli::{Args, SceneChoice};
use logger::init_logger;

/// Pick the sink from the output file extension.
fn open_sink(path: &Path) -> Result<Box<dyn PixelSink>> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "ppm" => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            Ok(Box::new(PpmSink::new(BufWriter::new(file))))
        }
        "png" => Ok(Box::new(PngSink::new(path))),
        other => bail!("unsupported file extension '{}'; use .ppm or .png", other),
    }
}

fn run(args: Args) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            seeded_rng(seed)
        }
        None => entropy_rng(),
    };

    let (world, mut camera) = match args.scene {
        SceneChoice::Cover => scene::cover(&mut rng),
        SceneChoice::Quick => scene::quick(),
    };
    info!("Scene {:?} with {} spheres", args.scene, world.len());

    camera.image_width = args.width;
    camera.aspect_ratio = args.aspect_ratio;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.initialize().context("invalid render settings")?;

    let mut sink = open_sink(&args.output)?;

    let bar;
    let observer: &dyn RenderObserver = if args.no_progress {
        &NoProgress
    } else {
        bar = scanline_bar(camera.image_height());
        &bar
    };

    camera
        .render(&world, sink.as_mut(), observer, &mut rng)
        .with_context(|| format!("rendering to {} failed", args.output.display()))?;

    info!("Image created at {}", args.output.display());
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("Spheretracer - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
