//! Command-line driver: image in, KRL motion program out.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use krlkit::{
    convert, init_logging, ConvertOptions, ExtractorParams, FilterParams, FitMode,
    KeepOrientation, LayoutParams, PaperSize, SaddleConnectivity, SmoothingParams,
    SynthesisParams, ThresholdPolarity,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
}

impl From<PaperArg> for PaperSize {
    fn from(value: PaperArg) -> Self {
        match value {
            PaperArg::A3 => PaperSize::A3,
            PaperArg::A4 => PaperSize::A4,
            PaperArg::A5 => PaperSize::A5,
            PaperArg::Letter => PaperSize::Letter,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrientationArg {
    Cw,
    Ccw,
    Any,
}

impl From<OrientationArg> for KeepOrientation {
    fn from(value: OrientationArg) -> Self {
        match value {
            OrientationArg::Cw => KeepOrientation::Cw,
            OrientationArg::Ccw => KeepOrientation::Ccw,
            OrientationArg::Any => KeepOrientation::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SmoothingArg {
    Spline,
    MovingAverage,
    None,
}

/// Convert a raster image into a KUKA KRL pen-plotter program.
#[derive(Debug, Parser)]
#[command(name = "krlkit", version, about)]
struct Cli {
    /// Input image (PNG, JPEG, BMP, ...).
    input: PathBuf,

    /// Output KRL program file.
    #[arg(short, long, default_value = "draw_picture.src")]
    output: PathBuf,

    /// Paper size preset.
    #[arg(long, value_enum, default_value = "a4")]
    paper: PaperArg,

    /// Blank border inside the paper edge, in millimeters.
    #[arg(long, default_value_t = 5.0)]
    paper_border: f64,

    /// Stretch to fill the drawable area instead of preserving aspect.
    #[arg(long)]
    stretch: bool,

    /// Median denoising window in pixels (odd; 1 disables).
    #[arg(long, default_value_t = 7)]
    blur_size: u32,

    /// Adaptive threshold neighborhood in pixels (odd).
    #[arg(long, default_value_t = 3)]
    block_size: u32,

    /// Threshold bias subtracted from the neighborhood mean.
    #[arg(long, default_value_t = 1.0)]
    bias: f64,

    /// Extract light strokes on a dark background instead of the reverse.
    #[arg(long)]
    light_on_dark: bool,

    /// White margin added around the image before processing, in pixels.
    #[arg(long, default_value_t = 20)]
    image_margin: u32,

    /// Rotate the image 180 degrees before processing.
    #[arg(long)]
    rotate: bool,

    /// Join diagonal high corners of saddle cells when tracing.
    #[arg(long)]
    connect_diagonals: bool,

    /// Iso level for contour tracing, strictly between 0 and 1.
    #[arg(long, default_value_t = 0.9)]
    iso_level: f64,

    /// Drop contours with fewer points than this.
    #[arg(long, default_value_t = 20)]
    min_points: usize,

    /// Winding orientation to keep.
    #[arg(long, value_enum, default_value = "cw")]
    keep: OrientationArg,

    /// Smoothing strategy.
    #[arg(long, value_enum, default_value = "spline")]
    smoothing: SmoothingArg,

    /// Moving-average window in points (odd).
    #[arg(long, default_value_t = 5)]
    window_size: usize,

    /// Spline control-point smoothing factor (0 interpolates exactly).
    #[arg(long, default_value_t = 0.5)]
    smoothing_factor: f64,

    /// Target distance between resampled points, in millimeters.
    #[arg(long, default_value_t = 5.0)]
    point_spacing: f64,

    /// Bridge contour endpoint gaps wider than this, in millimeters
    /// (0 disables).
    #[arg(long, default_value_t = 0.5)]
    gap_tolerance: f64,

    /// Pen travel height between contours, in millimeters.
    #[arg(long, default_value_t = 10.0)]
    travel_z: f64,

    /// Pen drawing height, in millimeters.
    #[arg(long, default_value_t = 0.0)]
    draw_z: f64,

    /// Emit every Nth drawing point (terminal point always kept).
    #[arg(long, default_value_t = 1)]
    step: usize,

    /// Settle time after pen descend, in seconds.
    #[arg(long, default_value_t = 0.1)]
    settle: f64,

    /// KUKA tool number for BAS(#tool).
    #[arg(long, default_value_t = 3)]
    tool: u32,

    /// KUKA base number for BAS(#base).
    #[arg(long, default_value_t = 3)]
    base: u32,

    /// KRL program name.
    #[arg(long, default_value = "DRAW_PICTURE")]
    program_name: String,
}

impl Cli {
    fn to_options(&self) -> ConvertOptions {
        let smoothing = match self.smoothing {
            SmoothingArg::Spline => SmoothingParams::Spline {
                smoothing_factor: self.smoothing_factor,
                point_spacing: self.point_spacing,
            },
            SmoothingArg::MovingAverage => SmoothingParams::MovingAverage {
                window_size: self.window_size,
            },
            SmoothingArg::None => SmoothingParams::MovingAverage { window_size: 1 },
        };
        let fit_mode = if self.stretch {
            FitMode::StretchToFit
        } else {
            FitMode::PreserveAspect
        };
        ConvertOptions {
            extractor: ExtractorParams {
                blur_size: self.blur_size,
                block_size: self.block_size,
                bias: self.bias,
                polarity: if self.light_on_dark {
                    ThresholdPolarity::LightOnDark
                } else {
                    ThresholdPolarity::DarkOnLight
                },
                margin: self.image_margin,
                rotate180: self.rotate,
            },
            connectivity: if self.connect_diagonals {
                SaddleConnectivity::High
            } else {
                SaddleConnectivity::Low
            },
            iso_level: self.iso_level,
            filter: FilterParams {
                min_points: self.min_points,
                keep_orientation: self.keep.into(),
                ..FilterParams::default()
            },
            smoothing,
            gap_tolerance: self.gap_tolerance,
            layout: LayoutParams::for_paper(self.paper.into(), self.paper_border, fit_mode),
            synthesis: SynthesisParams {
                travel_z: self.travel_z,
                draw_z: self.draw_z,
                step: self.step,
                settle_sec: self.settle,
                tool_id: self.tool,
                base_id: self.base,
                program_name: self.program_name.clone(),
                ..SynthesisParams::default()
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let options = cli.to_options();

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let text = convert(&bytes, &options)
        .with_context(|| format!("converting {}", cli.input.display()))?;
    std::fs::write(&cli.output, &text)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    info!(
        output = %cli.output.display(),
        bytes = text.len(),
        "wrote motion program"
    );
    Ok(())
}
