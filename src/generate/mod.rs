use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::profile::UserProfile;
use crate::prompt::build_prompt;

pub mod gemini;

pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to generation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation service returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("malformed response from generation service: {0}")]
    Malformed(String),

    #[error("prompt was blocked by the generation service: {0}")]
    Blocked(String),

    #[error("generation service returned no text")]
    Empty,
}

/// Anything that turns a prompt into plan text
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
    fn name(&self) -> &str;
}

/// Outcome shown to the user after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedPlan {
    Plan(String),
    Failed(String),
}

impl GeneratedPlan {
    pub fn from_error(error: &GenerationError) -> Self {
        GeneratedPlan::Failed(format!("An error occurred: {}", error))
    }

    pub fn text(&self) -> &str {
        match self {
            GeneratedPlan::Plan(text) | GeneratedPlan::Failed(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GeneratedPlan::Failed(_))
    }
}

/// Build the prompt for `profile`, send it once and wrap the outcome for display.
pub async fn dispatch(generator: &dyn PlanGenerator, profile: &UserProfile) -> GeneratedPlan {
    let prompt = build_prompt(profile);
    debug!(
        provider = generator.name(),
        condition = profile.condition.label(),
        prompt_chars = prompt.len(),
        "Dispatching meal plan prompt"
    );

    let start = std::time::Instant::now();
    match generator.generate(&prompt).await {
        Ok(text) => {
            info!(
                "Meal plan generated by {} in {:?} ({} chars)",
                generator.name(),
                start.elapsed(),
                text.len()
            );
            GeneratedPlan::Plan(text)
        }
        Err(e) => {
            warn!("Meal plan generation failed: {}", e);
            GeneratedPlan::from_error(&e)
        }
    }
}
