//! Outline generation with a single attempt and a deterministic fallback.

use crate::client::{CompletionRequest, CompletionService, DEFAULT_MODEL};
use crate::fallback::fallback_outline;
use crate::parse::{parse_outline, preview};
use crate::prompt::{outline_prompt, SYSTEM_PROMPT};
use deckgen_core::{Error, Outline, Result};

/// Sampling parameters for outline requests.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 4000,
        }
    }
}

/// What [`OutlineGenerator::generate`] produced.
#[derive(Debug)]
pub enum OutlineOutcome {
    /// The service answered with a usable outline.
    Generated(Outline),
    /// The service failed; the fixed fallback outline was used instead.
    Fallback {
        outline: Outline,
        /// Why the service result was rejected.
        reason: Error,
    },
}

impl OutlineOutcome {
    /// The outline, whichever way it was obtained.
    pub fn outline(&self) -> &Outline {
        match self {
            Self::Generated(outline) | Self::Fallback { outline, .. } => outline,
        }
    }

    /// Consume the outcome, keeping only the outline.
    pub fn into_outline(self) -> Outline {
        match self {
            Self::Generated(outline) | Self::Fallback { outline, .. } => outline,
        }
    }

    /// Whether the fallback outline was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Produces slide outlines for a topic through a [`CompletionService`].
pub struct OutlineGenerator<S> {
    service: S,
    settings: GenerationSettings,
}

impl<S: CompletionService> OutlineGenerator<S> {
    /// Create a generator with the default model and sampling settings.
    pub fn new(service: S) -> Self {
        Self {
            service,
            settings: GenerationSettings::default(),
        }
    }

    /// Override the model and sampling settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Generate an outline of at most `slide_count` slides.
    ///
    /// Never fails: any service, parse or shape error is logged and replaced
    /// by the fallback outline.
    pub fn generate(&self, topic: &str, slide_count: usize) -> OutlineOutcome {
        let slide_count = slide_count.max(1);

        match self.request_outline(topic, slide_count) {
            Ok(outline) => {
                log::info!("Generated {}-slide outline for '{}'", outline.len(), topic);
                OutlineOutcome::Generated(outline)
            }
            Err(reason) => {
                log::warn!("Error generating outline, using fallback: {}", reason);
                OutlineOutcome::Fallback {
                    outline: fallback_outline(topic, slide_count),
                    reason,
                }
            }
        }
    }

    fn request_outline(&self, topic: &str, slide_count: usize) -> Result<Outline> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            user: outline_prompt(topic, slide_count),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let raw = self.service.complete(&request)?;
        log::debug!("Raw response from model: {}", preview(&raw));

        parse_outline(&raw, slide_count)
    }
}
