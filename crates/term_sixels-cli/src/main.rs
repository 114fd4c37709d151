//! termsixels - Paint images and frames as SIXEL graphics
//!
//! A command-line front end for the term_sixels pixel buffer.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use image::RgbaImage;
use log::{debug, info, LevelFilter};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use term_sixels::{
    sixel_encode_with, Bound, Color, ColorSpace, EncodeOptions, PixelBuffer,
    PixelRatioCorrection, SpanRange,
};

/// Palettes beyond this size are not supported by most terminals.
const TERMINAL_REGISTER_LIMIT: usize = 256;

/// Options that only apply to `encode`.
#[derive(Args)]
struct PaletteArgs {
    /// Refuse images with more distinct colors than this. Every color gets
    /// its own register and there is no palette reduction, so photos blow
    /// up both the output and the terminal's register table.
    #[arg(long, default_value_t = TERMINAL_REGISTER_LIMIT)]
    max_colors: usize,
}

#[derive(Parser)]
#[command(name = "termsixels")]
#[command(version)]
#[command(about = "Paint images and frames as SIXEL graphics", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paint an image file into a pixel buffer and encode it
    Encode {
        /// Input image file (PNG, JPEG, GIF, WebP)
        input: PathBuf,

        #[command(flatten)]
        palette: PaletteArgs,

        #[command(flatten)]
        ratio: RatioArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Draw a pair of axes inset from the edges
    Frame {
        /// Logical height in pixels
        #[arg(long, default_value = "120")]
        height: usize,

        /// Logical width in pixels
        #[arg(long, default_value = "240")]
        width: usize,

        /// Gap between the axes and the buffer edges
        #[arg(short, long, default_value = "2")]
        margin: usize,

        /// Axis thickness
        #[arg(short, long, default_value = "2")]
        thickness: usize,

        /// Axis color as RRGGBB
        #[arg(short, long, default_value = "ffffff", value_parser = parse_hex_color)]
        color: Color,

        #[command(flatten)]
        ratio: RatioArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct RatioArgs {
    /// Axis stretched by the pixel ratio
    #[arg(long, value_enum, default_value_t = Correction::None)]
    correction: Correction,

    /// Pixel ratio for the corrected axis
    #[arg(long, default_value = "1")]
    ratio: usize,
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Define registers in HLS instead of RGB
    #[arg(long)]
    hls: bool,

    /// Break lines after each band row for readable dumps
    #[arg(long)]
    line_breaks: bool,

    /// Write a 0/1 bitmap of the buffer instead of SIXEL
    #[arg(long)]
    bitmap: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Correction {
    None,
    Width,
    Height,
}

impl From<Correction> for PixelRatioCorrection {
    fn from(correction: Correction) -> Self {
        match correction {
            Correction::None => PixelRatioCorrection::None,
            Correction::Width => PixelRatioCorrection::AdjustWidth,
            Correction::Height => PixelRatioCorrection::AdjustHeight,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Encode {
            input,
            palette,
            ratio,
            output,
        } => {
            let img = image::open(&input)
                .map_err(|e| format!("Failed to open '{}': {}", input.display(), e))?;
            let rgba_img = img.to_rgba8();

            info!(
                "Painting '{}' ({}x{})",
                input.display(),
                rgba_img.width(),
                rgba_img.height()
            );

            let buffer = paint_image(&rgba_img, &ratio)?;
            let colors = check_palette(&buffer, palette.max_colors)?;
            debug!("{} distinct colors", colors);

            write_output(&buffer, &output)?;
        }

        Commands::Frame {
            height,
            width,
            margin,
            thickness,
            color,
            ratio,
            output,
        } => {
            let mut buffer =
                PixelBuffer::new(height, width, ratio.correction.into(), ratio.ratio)?;
            draw_axes(&mut buffer, margin, thickness, color)?;

            info!(
                "Frame {}x{} (physical {}x{})",
                height,
                width,
                buffer.height(),
                buffer.width()
            );

            write_output(&buffer, &output)?;
        }
    }

    Ok(())
}

/// Paints every image pixel as a one-pixel range so corrected axes stretch
/// it over `ratio` physical pixels. Mostly transparent pixels become black.
fn paint_image(img: &RgbaImage, ratio: &RatioArgs) -> term_sixels::Result<PixelBuffer> {
    let (width, height) = img.dimensions();
    let mut buffer = PixelBuffer::new(
        height as usize,
        width as usize,
        ratio.correction.into(),
        ratio.ratio,
    )?;
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let color = if a < 128 {
            Color::BLACK
        } else {
            Color::new(r, g, b)
        };
        let (y, x) = (y as usize, x as usize);
        buffer.set(y..y + 1, x..x + 1, color)?;
    }
    Ok(buffer)
}

/// Number of distinct colors, or an error when there are more than `max`.
fn check_palette(buffer: &PixelBuffer, max: usize) -> Result<usize, String> {
    let colors = buffer.unique_colors().len();
    if colors > max {
        return Err(format!(
            "{colors} distinct colors exceed --max-colors {max}; \
             reduce the palette before encoding"
        ));
    }
    Ok(colors)
}

/// Y-axis down the left side and x-axis along the bottom. Both are anchored
/// to the far edges with from-end bounds.
fn draw_axes(
    buffer: &mut PixelBuffer,
    margin: usize,
    thickness: usize,
    color: Color,
) -> term_sixels::Result<()> {
    buffer.set(
        SpanRange::new(Bound::Start(margin), Bound::End(margin)),
        margin..margin + thickness,
        color,
    )?;
    buffer.set(
        SpanRange::new(Bound::End(margin + thickness), Bound::End(margin)),
        SpanRange::new(Bound::Start(margin), Bound::End(margin)),
        color,
    )
}

fn write_output(buffer: &PixelBuffer, args: &OutputArgs) -> io::Result<()> {
    let text = if args.bitmap {
        buffer.to_bitmap_string()
    } else {
        let opts = EncodeOptions {
            color_space: if args.hls {
                ColorSpace::Hls
            } else {
                ColorSpace::Rgb
            },
            line_breaks: args.line_breaks,
        };
        sixel_encode_with(buffer, &opts)
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &text)?;
            info!("Written {} bytes to '{}'", text.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got '{s}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("'{s}': {e}"))
    };
    Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
}
