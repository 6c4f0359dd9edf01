use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fast_bitmap::{Color, Rect};
use shotfx::effects::EffectKind;
use shotfx::models::{
    AnnotationDocument, AnnotationSpec, AppConfig, StringAlignment, TextStyleOverrides, CONFIG_ENV,
};
use shotfx::services::AnnotationPipeline;

#[derive(Parser)]
#[command(name = "shotfx")]
#[command(about = "Screenshot effects: Scale2x upscaling and drop-shadow text annotations")]
struct Cli {
    /// Config file (defaults to $SHOTFX_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Magnify a PNG to twice its size, keeping diagonal edges sharp
    Scale2x {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Draw a text annotation onto a PNG
    Text {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Text to draw
        #[arg(short, long)]
        text: String,

        /// Target rectangle as x,y,width,height
        #[arg(short, long, value_parser = parse_rect)]
        rect: Rect,

        /// Font family (e.g. "DejaVu Sans", "sans-serif")
        #[arg(long)]
        font: Option<String>,

        /// Font size in pixels
        #[arg(long)]
        size: Option<f32>,

        #[arg(long)]
        bold: bool,

        #[arg(long)]
        italic: bool,

        /// Text color as #RGB, #RRGGBB or #AARRGGBB
        #[arg(long)]
        color: Option<Color>,

        /// Background fill color (disables the shadow)
        #[arg(long)]
        fill: Option<Color>,

        /// Border thickness; text is inset by half of it
        #[arg(long)]
        thickness: Option<i32>,

        /// Do not draw the drop shadow
        #[arg(long)]
        no_shadow: bool,

        /// Horizontal alignment: near, center or far
        #[arg(long)]
        align: Option<StringAlignment>,

        /// Vertical alignment: near, center or far
        #[arg(long)]
        valign: Option<StringAlignment>,

        /// Size the rectangle to the text
        #[arg(long)]
        fit: bool,

        /// Apply Scale2x before drawing (the rectangle follows the image)
        #[arg(long)]
        scale2x: bool,
    },
    /// Apply the effects and annotations listed in a YAML document
    Annotate {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Annotation document (YAML)
        #[arg(short, long)]
        document: PathBuf,
    },
    /// List the font families available for text
    Fonts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Scale2x { input, output }) => {
            init_logging();
            let config = load_config(cli.config);
            let document = AnnotationDocument {
                effects: vec![EffectKind::Scale2x],
                annotations: Vec::new(),
            };
            run_document(&config, &input, &output, &document)
        }
        Some(Commands::Text {
            input,
            output,
            text,
            rect,
            font,
            size,
            bold,
            italic,
            color,
            fill,
            thickness,
            no_shadow,
            align,
            valign,
            fit,
            scale2x,
        }) => {
            init_logging();
            let config = load_config(cli.config);
            let style = TextStyleOverrides {
                font_family: font,
                font_size: size,
                bold: bold.then_some(true),
                italic: italic.then_some(true),
                line_thickness: thickness,
                line_color: color,
                fill_color: fill,
                shadow: no_shadow.then_some(false),
                horizontal_alignment: align,
                vertical_alignment: valign,
            };
            let document = AnnotationDocument {
                effects: if scale2x {
                    vec![EffectKind::Scale2x]
                } else {
                    Vec::new()
                },
                annotations: vec![AnnotationSpec {
                    text,
                    rect: [rect.x, rect.y, rect.width, rect.height],
                    fit,
                    style,
                }],
            };
            run_document(&config, &input, &output, &document)
        }
        Some(Commands::Annotate {
            input,
            output,
            document,
        }) => {
            init_logging();
            let config = load_config(cli.config);
            let document = AnnotationDocument::load(&document)
                .with_context(|| format!("Failed to load {}", document.display()))?;
            run_document(&config, &input, &output, &document)
        }
        Some(Commands::Fonts) => {
            init_logging();
            let config = load_config(cli.config);
            run_fonts_command(&config);
            Ok(())
        }
        None => {
            run_status_command(cli.config);
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shotfx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_config(explicit: Option<PathBuf>) -> AppConfig {
    AppConfig::load(AppConfig::resolve_path(explicit).as_deref())
}

fn run_document(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    document: &AnnotationDocument,
) -> anyhow::Result<()> {
    let png = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let pipeline = AnnotationPipeline::new(config);
    let result = pipeline.render_png(&png, document)?;

    std::fs::write(output, &result)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), result.len());
    Ok(())
}

fn run_fonts_command(config: &AppConfig) {
    let pipeline = AnnotationPipeline::new(config);
    for family in pipeline.fonts().families() {
        println!("{family}");
    }
}

fn run_status_command(explicit: Option<PathBuf>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("shotfx v{VERSION} - screenshot effects");
    println!("Scale2x upscaling and drop-shadow text annotations\n");

    println!("Environment Variables:");
    let env_config = std::env::var(CONFIG_ENV).ok();
    println!(
        "  {CONFIG_ENV} = {}",
        env_config.as_deref().unwrap_or("(not set)")
    );

    let path = AppConfig::resolve_path(explicit);
    let config_source = match &path {
        Some(p) if p.exists() => p.display().to_string(),
        Some(p) => format!("{} (file not found, using defaults)", p.display()),
        None => "built-in defaults".to_string(),
    };
    println!("\nConfig:  {config_source}");

    let config = AppConfig::load(path.as_deref());
    let pipeline = AnnotationPipeline::new(&config);
    let fonts = pipeline.fonts();
    println!(
        "Fonts:   {} faces in {} families",
        fonts.face_count(),
        fonts.families().len()
    );
    if let Some(dir) = &config.fonts_dir {
        println!("         extra fonts from {}", dir.display());
    }

    let text = pipeline.defaults();
    println!(
        "Text:    {} {}px, thickness {}, shadow {}",
        text.font_family, text.font_size, text.line_thickness, text.shadow
    );

    println!("\nCommands:");
    println!("  shotfx scale2x -i IN.png -o OUT.png");
    println!("  shotfx text -i IN.png -o OUT.png --text TEXT --rect x,y,w,h");
    println!("  shotfx annotate -i IN.png -o OUT.png -d annotations.yaml");
    println!("  shotfx fonts");
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<i32> = s
        .split(',')
        .map(|p| p.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid rectangle '{s}': {e}"))?;
    match parts.as_slice() {
        &[x, y, width, height] => Ok(Rect::new(x, y, width, height)),
        _ => Err(format!(
            "invalid rectangle '{s}': expected x,y,width,height"
        )),
    }
}
