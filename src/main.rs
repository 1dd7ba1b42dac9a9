use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use aurora::aurora::{OUTLINE_COLOR, RIDGE_COLOR};
use aurora::{logger, AuroraConfig, Frame, Point, Presets, Rgba, Scene, Size};
use clap::Parser;
use tracing::Level;

const SKY_TOP: [f32; 3] = [0.0, 0.0, 0.0];
const SKY_BOTTOM: [f32; 3] = [0.01, 0.02, 0.04];
const STAR_OPACITY: f32 = 0.9;
const RIDGE_STEPS: usize = 24;

#[derive(Parser)]
#[command(name = "aurora_preview")]
#[command(about = "Render aurora frames to PNG without a GUI")]
struct Cli {
    #[arg(long, default_value_t = 390)]
    width: u32,
    #[arg(long, default_value_t = 844)]
    height: u32,
    /// Number of clock ticks to run
    #[arg(long, default_value_t = 90)]
    frames: u64,
    /// Write every n-th frame
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,
    #[arg(long, conflicts_with = "config")]
    preset: Option<String>,
    /// TOML file with an aurora config
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "aurora_out")]
    out: PathBuf,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_stderr(if cli.verbose { Level::DEBUG } else { Level::INFO });

    if cli.width == 0 || cli.height == 0 {
        return Err(anyhow!("width/height must be > 0"));
    }

    let config = resolve_config(&cli)?;
    let mut scene = Scene::new(config);
    let size = Size::new(cli.width as f64, cli.height as f64);

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("create output dir {}", cli.out.display()))?;

    for tick in 0..=cli.frames {
        if tick % cli.every == 0 {
            let frame = scene.frame(size);
            let buf = rasterize(&frame, cli.width as usize, cli.height as usize);
            let path = cli.out.join(format!("aurora_frame_{:04}.png", frame.number));
            image::save_buffer(&path, &buf, cli.width, cli.height, image::ColorType::Rgb8)
                .with_context(|| format!("save {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote frame");
        }
        scene.advance();
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AuroraConfig> {
    if let Some(path) = &cli.config {
        return AuroraConfig::load(path);
    }

    match &cli.preset {
        Some(name) => {
            let presets = Presets::init();
            presets
                .find(name)
                .map(|preset| preset.config.clone())
                .ok_or_else(|| {
                    anyhow!(
                        "unknown preset {name}, expected one of: {}",
                        presets.names().join(", ")
                    )
                })
        }
        None => Ok(AuroraConfig::default()),
    }
}

/// Flat rendition of a frame: sky, stars, screen-blended curtains and glow,
/// then the ridge on top. Host-side blur is not reproduced.
fn rasterize(frame: &Frame, width: usize, height: usize) -> Vec<u8> {
    let mut canvas = vec![[0.0f32; 3]; width * height];

    for (y, row) in canvas.chunks_mut(width).enumerate() {
        let t = y as f32 / height.max(1) as f32;
        let sky = mix(SKY_TOP, SKY_BOTTOM, t);
        row.fill(sky);
    }

    for star in &frame.stars {
        let r = star.star.radius;
        let cx = star.star.x + r / 2.0;
        let cy = star.star.y + r / 2.0;
        let (px, py) = (cx.floor(), cy.floor());
        if px < 0.0 || py < 0.0 || px >= width as f64 || py >= height as f64 {
            continue;
        }
        let coverage = (std::f64::consts::PI * (r / 2.0) * (r / 2.0)).min(1.0);
        let alpha = (coverage * star.opacity) as f32 * STAR_OPACITY;
        let pixel = &mut canvas[py as usize * width + px as usize];
        *pixel = screen(*pixel, [1.0; 3], alpha);
    }

    for layer in &frame.layers {
        let shifted: Vec<Point> = layer
            .path
            .points
            .iter()
            .map(|p| Point::new(p.x + layer.offset.x, p.y + layer.offset.y))
            .collect();
        let opacity = layer.opacity as f32;
        let size = frame.size;

        fill_polygon(&shifted, width, height, |x, y| {
            let color = gradient_at(layer.colors, size, x as f64 + 0.5, y as f64 + 0.5);
            let pixel = &mut canvas[y * width + x];
            *pixel = screen(*pixel, [color[0], color[1], color[2]], color[3] * opacity);
        });

        let outline = [OUTLINE_COLOR[0], OUTLINE_COLOR[1], OUTLINE_COLOR[2]];
        stroke_polygon(&shifted, width, height, |x, y| {
            let pixel = &mut canvas[y * width + x];
            *pixel = screen(*pixel, outline, OUTLINE_COLOR[3] * opacity);
        });
    }

    for (y, row) in canvas.chunks_mut(width).enumerate() {
        let Some(t) = frame.glow.position(y as f64 + 0.5) else {
            continue;
        };
        let [a, b] = frame.glow.colors;
        let t = t as f32;
        let color = mix([a[0], a[1], a[2]], [b[0], b[1], b[2]], t);
        let alpha = a[3] + (b[3] - a[3]) * t;
        for pixel in row.iter_mut() {
            *pixel = screen(*pixel, color, alpha);
        }
    }

    let ridge = frame.ridge.flatten(RIDGE_STEPS);
    let ink = [RIDGE_COLOR[0], RIDGE_COLOR[1], RIDGE_COLOR[2]];
    fill_polygon(&ridge, width, height, |x, y| {
        let pixel = &mut canvas[y * width + x];
        *pixel = over(*pixel, ink, RIDGE_COLOR[3]);
    });

    canvas
        .iter()
        .flat_map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
        .collect()
}

/// Even-odd scanline fill sampling pixel centers
fn fill_polygon<F>(points: &[Point], width: usize, height: usize, mut put: F)
where
    F: FnMut(usize, usize),
{
    if points.len() < 3 {
        return;
    }

    let mut crossings = Vec::new();
    for y in 0..height {
        let sy = y as f64 + 0.5;
        crossings.clear();

        for (i, a) in points.iter().enumerate() {
            let b = &points[(i + 1) % points.len()];
            if (a.y <= sy) != (b.y <= sy) {
                crossings.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil().max(0.0) as usize;
            let end = ((span[1] - 0.5).floor() + 1.0).clamp(0.0, width as f64) as usize;
            for x in start..end {
                put(x, y);
            }
        }
    }
}

/// One pixel wide edges, stepped at most one pixel at a time
fn stroke_polygon<F>(points: &[Point], width: usize, height: usize, mut put: F)
where
    F: FnMut(usize, usize),
{
    if points.len() < 2 {
        return;
    }

    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let steps = dx.abs().max(dy.abs()).ceil();
        if !steps.is_finite() {
            continue;
        }
        let steps = steps.max(1.0) as usize;

        for step in 0..steps {
            let t = step as f64 / steps as f64;
            let (x, y) = ((a.x + dx * t).floor(), (a.y + dy * t).floor());
            if x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64 {
                put(x as usize, y as usize);
            }
        }
    }
}

/// Linear gradient from the top-left corner to the bottom-right one
fn gradient_at(colors: [Rgba; 2], size: Size, x: f64, y: f64) -> Rgba {
    let len_sq = size.width * size.width + size.height * size.height;
    let t = if len_sq > 0.0 {
        ((x * size.width + y * size.height) / len_sq).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    let [a, b] = colors;
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn over(dst: [f32; 3], src: [f32; 3], alpha: f32) -> [f32; 3] {
    mix(dst, src, alpha)
}

fn screen(dst: [f32; 3], src: [f32; 3], alpha: f32) -> [f32; 3] {
    let mut out = dst;
    for (o, s) in out.iter_mut().zip(src) {
        *o = 1.0 - (1.0 - *o) * (1.0 - s * alpha);
    }
    out
}
