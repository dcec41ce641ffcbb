//! Pipeline wiring for the `deckgen` binary.
//!
//! [`PipelineConfig`] carries everything a run needs, credentials included,
//! and is passed explicitly to [`run`]. Nothing is read from the environment
//! except in [`Credentials::from_env`].

use deckgen_core::{Error, ImageProvider, LayoutConfig, Result};
use deckgen_outline::{CompletionService, GroqClient, OutlineGenerator, OutlineOutcome};
use deckgen_photos::{PexelsClient, PexelsImageProvider, PlaceholderImageProvider};
use deckgen_pptx::{BulletStyle, DeckRenderer};
use std::path::PathBuf;

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const PEXELS_API_KEY: &str = "PEXELS_API_KEY";

/// Default number of slides requested.
pub const DEFAULT_SLIDE_COUNT: usize = 5;

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "presentation.pptx";

/// API keys for the two remote services.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub groq_api_key: String,
    /// Absent when photo search is disabled.
    pub pexels_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("groq_api_key", &"<redacted>")
            .field(
                "pexels_api_key",
                &self.pexels_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Credentials {
    /// Read the keys from the process environment.
    ///
    /// The Pexels key is only required when `photos` is set.
    pub fn from_env(photos: bool) -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok(), photos)
    }

    /// Read the keys through `lookup`; empty values count as missing.
    pub fn from_lookup<F>(lookup: F, photos: bool) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let groq_api_key = get(GROQ_API_KEY).ok_or(Error::MissingCredential(GROQ_API_KEY))?;
        let pexels_api_key = if photos {
            Some(get(PEXELS_API_KEY).ok_or(Error::MissingCredential(PEXELS_API_KEY))?)
        } else {
            None
        };

        Ok(Self {
            groq_api_key,
            pexels_api_key,
        })
    }
}

/// Everything one `generate` run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub topic: String,
    pub slide_count: usize,
    pub output: PathBuf,
    pub bullet_style: BulletStyle,
    /// Share of the content width given to bullets when a slide has an image.
    pub text_zone_ratio: f64,
    /// Search for stock photos; otherwise every image is the placeholder.
    pub photos: bool,
    pub credentials: Credentials,
}

impl PipelineConfig {
    pub fn new(topic: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            topic: topic.into(),
            slide_count: DEFAULT_SLIDE_COUNT,
            output: PathBuf::from(DEFAULT_OUTPUT),
            bullet_style: BulletStyle::default(),
            text_zone_ratio: 0.5,
            photos: credentials.pexels_api_key.is_some(),
            credentials,
        }
    }

    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig::new().with_text_zone_ratio(self.text_zone_ratio)
    }
}

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output: PathBuf,
    pub slide_count: usize,
    /// The fallback outline was used because generation failed.
    pub used_fallback: bool,
}

/// Generate an outline for `topic` with the Groq client.
pub fn generate_outline(
    topic: &str,
    slide_count: usize,
    credentials: &Credentials,
) -> Result<OutlineOutcome> {
    let client = GroqClient::new(credentials.groq_api_key.clone())?;
    Ok(OutlineGenerator::new(client).generate(topic, slide_count))
}

/// Generate an outline and render it to `config.output`.
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
    let client = GroqClient::new(config.credentials.groq_api_key.clone())?;
    let generator = OutlineGenerator::new(client);

    match (config.photos, &config.credentials.pexels_api_key) {
        (true, Some(key)) => {
            let images = PexelsImageProvider::new(PexelsClient::new(key.clone())?);
            run_with(config, &generator, images)
        }
        (true, None) => Err(Error::MissingCredential(PEXELS_API_KEY)),
        (false, _) => run_with(config, &generator, PlaceholderImageProvider::new()),
    }
}

/// [`run`] with the services supplied by the caller.
pub fn run_with<S, P>(
    config: &PipelineConfig,
    generator: &OutlineGenerator<S>,
    images: P,
) -> Result<RunReport>
where
    S: CompletionService,
    P: ImageProvider,
{
    log::info!(
        "Generating {} slides about '{}'",
        config.slide_count,
        config.topic
    );
    let outcome = generator.generate(&config.topic, config.slide_count);
    let used_fallback = outcome.is_fallback();
    let outline = outcome.into_outline();

    let mut renderer = DeckRenderer::new(images)
        .with_layout(config.layout())
        .with_bullet_style(config.bullet_style);
    let output = renderer.render(&outline, &config.output)?;

    Ok(RunReport {
        output,
        slide_count: outline.len(),
        used_fallback,
    })
}
