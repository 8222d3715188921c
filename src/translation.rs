/*!
 * Translation service.
 *
 * Wraps the configured provider behind one `translate` call: prompt
 * construction, provider dispatch, and response extraction. The prompts
 * instruct the model to preserve markup; the engine downstream assumes it
 * will fail to anyway.
 */

use anyhow::{Result, anyhow};
use log::debug;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Sentinel written to the output column when a row cannot be translated.
pub const TRANSLATION_FAILED_SENTINEL: &str = "ERROR: Translation Failed";

/// Translation provider implementation variants
enum ProviderImpl {
    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },

    /// In-process mock, for tests
    Mock {
        /// Client instance
        client: MockProvider,
    },
}

/// Service translating one text unit at a time through the configured
/// provider.
pub struct TranslationService {
    provider_impl: ProviderImpl,
    config: TranslationConfig,
    model: String,
}

impl TranslationService {
    /// Create a service from the translation configuration.
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let provider_config = config
            .provider_config()
            .ok_or_else(|| anyhow!("No configuration for provider: {}", config.provider))?;
        let model = provider_config.model.clone();

        let provider_impl = match config.provider {
            TranslationProvider::OpenAI => ProviderImpl::OpenAI {
                client: OpenAI::new(
                    provider_config.api_key.clone(),
                    provider_config.endpoint.clone(),
                    provider_config.timeout_secs,
                ),
            },
            TranslationProvider::Anthropic => ProviderImpl::Anthropic {
                client: Anthropic::new(
                    provider_config.api_key.clone(),
                    provider_config.endpoint.clone(),
                    provider_config.timeout_secs,
                ),
            },
        };

        Ok(Self {
            provider_impl,
            config,
            model,
        })
    }

    /// Create a service backed by a mock provider - used by tests.
    pub fn with_mock(provider: MockProvider, config: TranslationConfig) -> Self {
        Self {
            provider_impl: ProviderImpl::Mock { client: provider },
            config,
            model: "mock".to_string(),
        }
    }

    /// Translate one unit of text into the target language.
    ///
    /// `context` carries the preceding window's tail for chunked content;
    /// it is presented to the model as reference material only.
    pub async fn translate(
        &self,
        text: &str,
        context: Option<&str>,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let system_prompt = Self::system_prompt();
        let user_prompt = Self::user_prompt(text, context, target_language);
        debug!(
            "translating {} chars to {} via {}",
            text.len(),
            target_language,
            self.model
        );

        let translated = match &self.provider_impl {
            ProviderImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(self.model.as_str())
                    .add_message("system", system_prompt.as_str())
                    .add_message("user", user_prompt.as_str())
                    .temperature(self.config.temperature)
                    .max_tokens(self.config.max_tokens);
                let response = client.complete(request).await?;
                OpenAI::extract_text(&response)
            }
            ProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(self.model.as_str(), self.config.max_tokens)
                    .system(system_prompt.as_str())
                    .add_message("user", user_prompt.as_str())
                    .temperature(self.config.temperature);
                let response = client.complete(request).await?;
                Anthropic::extract_text(&response)
            }
            ProviderImpl::Mock { client } => {
                let request = MockRequest {
                    text: text.to_string(),
                    context: context.map(str::to_string),
                    target_language: target_language.to_string(),
                };
                let response = client.complete(request).await?;
                MockProvider::extract_text(&response)
            }
        };

        if translated.is_empty() {
            return Err(TranslationError::EmptyResponse);
        }
        Ok(translated)
    }

    /// Test the connection to the configured provider.
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider_impl {
            ProviderImpl::OpenAI { client } => client.test_connection().await,
            ProviderImpl::Anthropic { client } => client.test_connection().await,
            ProviderImpl::Mock { client } => client.test_connection().await,
        }
    }

    fn system_prompt() -> String {
        "You are an AI trained for preserving HTML structures while translating content."
            .to_string()
    }

    fn user_prompt(text: &str, context: Option<&str>, target_language: &str) -> String {
        let target = language_utils::language_name(target_language)
            .map(str::to_string)
            .unwrap_or_else(|| target_language.to_string());

        let mut prompt = format!(
            "You are a professional translator. Translate the following HTML content into {target}.\n\
             - Preserve all HTML tags and formatting.\n\
             - Only translate readable text within the tags.\n\
             - Do NOT alter or remove any tags.\n\
             - Output should be in HTML format, identical in structure to the input but translated.\n"
        );
        if let Some(context) = context {
            if !context.is_empty() {
                prompt.push_str(
                    "\nPreceding context, for reference only - do not translate or repeat it:\n",
                );
                prompt.push_str(context);
                prompt.push('\n');
            }
        }
        prompt.push_str("\nContent:\n");
        prompt.push_str(text);
        prompt
    }
}
