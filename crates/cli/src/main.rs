//! CLI tool for generating slide decks from a topic.

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use deckgen_cli::{
    generate_outline, run, Credentials, PipelineConfig, DEFAULT_OUTPUT, DEFAULT_SLIDE_COUNT,
};
use deckgen_core::OutlineSummary;
use deckgen_pptx::{BulletStyle, DeckReader, DeckSummary};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Generate PowerPoint decks with a language model and stock photos.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an outline and render it to a .pptx file
    Generate(GenerateArgs),

    /// Generate an outline and print it without rendering
    Outline {
        /// Presentation topic
        topic: String,

        /// Number of slides to request
        #[arg(
            short = 'n',
            long = "slides",
            default_value_t = DEFAULT_SLIDE_COUNT,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        slides: usize,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize an existing .pptx file
    Inspect {
        /// Deck to read
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Presentation topic
    topic: String,

    /// Number of slides to request
    #[arg(
        short = 'n',
        long = "slides",
        default_value_t = DEFAULT_SLIDE_COUNT,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    slides: usize,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// How bullet points are laid out
    #[arg(long, value_enum, default_value_t = BulletArg::Custom)]
    bullets: BulletArg,

    /// Share of the content width given to text on slides with an image
    #[arg(long, default_value_t = 0.5, value_parser = parse_ratio)]
    text_ratio: f64,

    /// Use placeholder images instead of searching for photos
    #[arg(long)]
    no_photos: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BulletArg {
    /// Free text boxes without bullet glyphs
    Custom,
    /// The layout's content placeholder with the master's bullet glyphs
    Native,
}

impl From<BulletArg> for BulletStyle {
    fn from(arg: BulletArg) -> Self {
        match arg {
            BulletArg::Custom => BulletStyle::Custom,
            BulletArg::Native => BulletStyle::Native,
        }
    }
}

/// A finite fraction in `0.0..=1.0`.
fn parse_ratio(value: &str) -> std::result::Result<f64, String> {
    let ratio: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if ratio.is_finite() && (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("{} is not between 0.0 and 1.0", value))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring .env file: {}", e),
    }

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Outline {
            topic,
            slides,
            json,
        } => outline(&topic, slides, json),
        Command::Inspect { file, json } => inspect(&file, json),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let photos = !args.no_photos;
    let credentials = Credentials::from_env(photos).context("Missing API credentials")?;

    let mut config = PipelineConfig::new(args.topic, credentials);
    config.slide_count = args.slides;
    config.output = args.output;
    config.bullet_style = args.bullets.into();
    config.text_zone_ratio = args.text_ratio;
    config.photos = photos;

    let report = run(&config)
        .with_context(|| format!("Failed to generate {}", config.output.display()))?;

    if report.used_fallback {
        eprintln!("Outline generation failed; used the built-in outline instead.");
    }
    println!(
        "Wrote {} slides to {}",
        report.slide_count,
        report.output.display()
    );

    Ok(())
}

fn outline(topic: &str, slides: usize, json: bool) -> Result<()> {
    let credentials = Credentials::from_env(false).context("Missing API credentials")?;
    let outcome = generate_outline(topic, slides, &credentials)?;

    if outcome.is_fallback() {
        eprintln!("Outline generation failed; showing the built-in outline.");
    }

    let outline = outcome.outline();
    if json {
        println!("{}", outline.to_json_pretty()?);
    } else {
        print!("{}", OutlineSummary::new().format_with_newline(outline));
    }

    Ok(())
}

fn inspect(path: &Path, json: bool) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let summary = DeckReader::new()
        .read(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }

    Ok(())
}

/// Plain-text rendering of a deck summary.
fn format_summary(summary: &DeckSummary) -> String {
    let mut out = String::new();
    if let Some(title) = &summary.title {
        out.push_str(&format!("{}\n", title));
    }
    out.push_str(&format!("{} slides\n", summary.slide_count()));

    for slide in &summary.slides {
        out.push_str(&format!(
            "\n{}. {} [{}]\n",
            slide.number,
            slide.title().unwrap_or_default(),
            slide.layout.as_deref().unwrap_or("?")
        ));
        for line in slide.body() {
            out.push_str(&format!("   - {}\n", line));
        }
        for picture in &slide.pictures {
            out.push_str(&format!(
                "   picture: {}\n",
                picture.target.as_deref().unwrap_or("?")
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_slides_rejected() {
        assert!(Cli::try_parse_from(["deckgen", "generate", "Topic", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["deckgen", "outline", "Topic", "--slides", "0"]).is_err());
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["deckgen", "generate", "Topic"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.slides, 5);
                assert_eq!(args.output, PathBuf::from("presentation.pptx"));
                assert_eq!(args.bullets, BulletArg::Custom);
                assert_eq!(args.text_ratio, 0.5);
                assert!(!args.no_photos);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_text_ratio_must_be_a_fraction() {
        for bad in ["NaN", "inf", "-0.1", "1.5", "half"] {
            assert!(
                Cli::try_parse_from(["deckgen", "generate", "Topic", "--text-ratio", bad]).is_err(),
                "accepted {}",
                bad
            );
        }
        let cli =
            Cli::try_parse_from(["deckgen", "-v", "generate", "Topic", "--text-ratio", "0.6"])
                .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Generate(args) => assert_eq!(args.text_ratio, 0.6),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
