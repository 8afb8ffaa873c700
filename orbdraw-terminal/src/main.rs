//! orbdraw - draw an orbit from its 3D positions
//!
//! Reads a positions file, projects and places the path on a canvas, and writes it as CSV,
//! SVG or a live terminal drawing.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use orbdraw_core::{
    draw_path, read_positions, CsvWriter, DrawingMode, Margins, SegmentSink, SizeFit, SvgWriter,
};
use orbdraw_terminal::{OrbdrawConfig, OutputFormat, TerminalApp};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Offset from the canvas center
    Simple,
    /// Aspect-preserving fit inside the margins
    Fitted,
}

#[derive(Parser, Debug)]
#[command(
    name = "orbdraw",
    version = env!("CARGO_PKG_VERSION"),
    about = "Turn a sequence of 3D orbit positions into a 2D drawing",
    after_help = r#"
Environment Variables:
  ORBDRAW_CONFIG=<path>       Path to a TOML configuration file
  ORBDRAW_LOG_LEVEL=debug     Set log level (error, warn, info, debug, trace)
"#
)]
struct Cli {
    /// Positions file with one `x, y, z` per line, or `-` for stdin
    input: PathBuf,

    /// Configuration file
    #[arg(short, long, env = "ORBDRAW_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Set log level
    #[arg(long, value_enum, env = "ORBDRAW_LOG_LEVEL", default_value = "warn")]
    log_level: LogLevel,

    /// Tilt of the projection plane (radians)
    #[arg(long, allow_hyphen_values = true)]
    alpha: Option<f64>,

    /// Rotation of the projection plane about z (radians)
    #[arg(long, allow_hyphen_values = true)]
    beta: Option<f64>,

    /// Rotation of the drawing after projection (radians)
    #[arg(long, allow_hyphen_values = true)]
    delta: Option<f64>,

    /// Canvas width
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height
    #[arg(long)]
    height: Option<f64>,

    /// Placement mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Uniform margin on every side
    #[arg(long)]
    margin: Option<f64>,

    /// Horizontal offset in simple mode
    #[arg(long, allow_hyphen_values = true)]
    dx: Option<f64>,

    /// Vertical offset in simple mode
    #[arg(long, allow_hyphen_values = true)]
    dy: Option<f64>,

    /// Scale raw positions to this fraction of the canvas height (simple mode)
    #[arg(long)]
    size_factor: Option<f64>,

    /// Drawing title
    #[arg(long)]
    title: Option<String>,

    /// Drawing description
    #[arg(long)]
    description: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .filter_level(cli.log_level.into())
        .init();

    let mut config = match &cli.config {
        Some(path) => OrbdrawConfig::load_from_file(path)?,
        None => OrbdrawConfig::default(),
    };
    apply_overrides(&mut config, &cli);
    debug!("effective configuration: {:?}", config);

    let positions = if cli.input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read positions from stdin")?;
        orbdraw_core::parse_positions(&text)?
    } else {
        let file = File::open(&cli.input)
            .with_context(|| format!("Failed to open positions file: {}", cli.input.display()))?;
        read_positions(file)
            .with_context(|| format!("Failed to read positions file: {}", cli.input.display()))?
    };
    info!("Read {} positions", positions.len());

    let pipeline = config.pipeline();
    let points = pipeline.run(&positions).context("Failed to lay out drawing")?;

    let output = &config.output;
    match output.format {
        OutputFormat::Csv => {
            let mut sink = CsvWriter::new(open_output(cli.output.as_ref())?);
            emit(&points, &mut sink)?;
        }
        OutputFormat::Svg => {
            let mut sink = SvgWriter::new(open_output(cli.output.as_ref())?, pipeline.canvas)
                .with_stroke(output.stroke.clone(), output.stroke_width);
            if let Some(title) = &output.title {
                sink = sink.with_title(title.clone());
            }
            if let Some(description) = &output.description {
                sink = sink.with_description(description.clone());
            }
            emit(&points, &mut sink)?;
        }
        OutputFormat::Terminal => {
            let title = output.title.clone().unwrap_or_else(|| "orbdraw".to_string());
            let mut sink = TerminalApp::new(pipeline.canvas, title)?;
            emit(&points, &mut sink)?;
        }
    }

    Ok(())
}

fn emit<S: SegmentSink>(points: &[nalgebra::Point2<f64>], sink: &mut S) -> Result<()> {
    draw_path(points, sink).context("Failed to write drawing")?;
    info!("Wrote {} segments", points.len().saturating_sub(1));
    Ok(())
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn apply_overrides(config: &mut OrbdrawConfig, cli: &Cli) {
    if let Some(alpha) = cli.alpha {
        config.angles.alpha = alpha;
    }
    if let Some(beta) = cli.beta {
        config.angles.beta = beta;
    }
    if let Some(delta) = cli.delta {
        config.angles.delta = delta;
    }
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }

    match cli.mode {
        Some(ModeArg::Simple) if !matches!(config.mode, DrawingMode::Simple { .. }) => {
            config.mode = DrawingMode::Simple {
                dx: 0.0,
                dy: 0.0,
                size_fit: None,
            };
        }
        Some(ModeArg::Fitted) if !matches!(config.mode, DrawingMode::Fitted { .. }) => {
            config.mode = DrawingMode::Fitted {
                margins: Margins::default(),
            };
        }
        _ => {}
    }

    match &mut config.mode {
        DrawingMode::Simple { dx, dy, size_fit } => {
            if let Some(value) = cli.dx {
                *dx = value;
            }
            if let Some(value) = cli.dy {
                *dy = value;
            }
            if let Some(factor) = cli.size_factor {
                size_fit.get_or_insert_with(SizeFit::default).factor = factor;
            }
            if let (Some(margin), Some(fit)) = (cli.margin, size_fit.as_mut()) {
                fit.margins = Margins::uniform(margin);
            }
        }
        DrawingMode::Fitted { margins } => {
            if let Some(margin) = cli.margin {
                *margins = Margins::uniform(margin);
            }
        }
    }

    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(title) = &cli.title {
        config.output.title = Some(title.clone());
    }
    if let Some(description) = &cli.description {
        config.output.description = Some(description.clone());
    }
}
