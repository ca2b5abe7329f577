use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;

use coverhue::{
    analysis::Analyzer,
    config::{AnalysisConfig, ColorMode},
    loader::ImageLoader,
    palette::{ColorScheme, generate_palette},
    scoring::Algorithm,
    session::{PageContext, ThemeSession},
    theme::{PageKind, ThemeMode},
};

#[derive(Parser)]
#[command(name = "coverhue")]
#[command(about = "Accent colors and tonal palettes from cover art", long_about = None)]
struct Cli {
    /// JSON analysis config, defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dominant color of an image
    Analyze {
        /// Path, http(s) URL or data URI
        source: String,
        /// Preference order, overrides the config
        #[arg(short, long = "algorithm")]
        algorithms: Vec<Algorithm>,
    },
    /// Print the tonal palette of a color
    Palette { color: String },
    /// Print theme CSS for the cover at SOURCE
    Css {
        source: String,
        #[arg(long, default_value = "general")]
        page: PageKind,
        #[arg(long)]
        dark: bool,
    },
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .init();
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AnalysisConfig::read_config(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Commands::Analyze { source, algorithms } => analyze(config, &source, algorithms),
        Commands::Palette { color } => palette(&color),
        Commands::Css { source, page, dark } => css(config, source, page, dark),
    }
}

fn analyze(mut config: AnalysisConfig, source: &str, algorithms: Vec<Algorithm>) -> Result<()> {
    if !algorithms.is_empty() {
        config.algorithms = algorithms;
    }

    let loader = ImageLoader::from_config(&config);
    let analyzer = Analyzer::new(config);
    let result = match loader.load(source) {
        Ok(image) => analyzer.analyze_or_default(Ok(image.as_ref())),
        Err(err) => analyzer.analyze_or_default(Err(err)),
    };

    println!(
        "{}\t{:.3}\t{}",
        result.hex(),
        result.confidence,
        result.algorithm
    );
    Ok(())
}

fn palette(color: &str) -> Result<()> {
    let palette = generate_palette(color)?;
    for (stop, tone) in palette.iter() {
        println!("{stop:>4}\t{}", tone.to_hex());
    }

    let scheme = ColorScheme::from_rgb(palette.primary());
    println!(
        "{}\ton-primary {}",
        if scheme.is_light { "light" } else { "dark" },
        scheme.on_primary().to_hex()
    );
    Ok(())
}

fn css(mut config: AnalysisConfig, source: String, page: PageKind, dark: bool) -> Result<()> {
    config.preferences.color_mode = ColorMode::Thumbnail;

    let mut session = ThemeSession::new(config);
    let page = PageContext {
        kind: page,
        mode: if dark { ThemeMode::Dark } else { ThemeMode::Light },
        cover: Some(source),
    };

    match session.resolve(&page) {
        Some(theme) => {
            print!("{}", theme.css);
            Ok(())
        }
        None => anyhow::bail!("theming skipped for this page"),
    }
}
