/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate translator behaviors
 * the preservation engine must survive:
 * - `MockProvider::identity()` - returns the payload unchanged
 * - `MockProvider::tag_stripping()` - drops every tag from the payload
 * - `MockProvider::tag_renaming()` - renames `<p>` pairs to `<div>`
 * - `MockProvider::failing()` - always fails with an API error
 * - `MockProvider::empty()` - returns an empty response
 * - `MockProvider::intermittent(n)` - fails every nth request
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::strip_tags;
use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Cross-window context, when chunked
    pub context: Option<String>,
    /// Target language
    pub target_language: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The translated text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns the payload unchanged (a perfectly tag-preserving translator)
    Identity,
    /// Strips every tag from the payload (a markup-destroying translator)
    TagStripping,
    /// Renames paragraph tags to divs (a structure-mangling translator)
    TagRenaming,
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
    /// Fails intermittently (every nth request)
    Intermittent {
        /// Every nth request fails
        fail_every: usize,
    },
    /// Simulates slow responses (for timeout testing)
    Slow {
        /// Delay before responding
        delay_ms: u64,
    },
}

/// Mock provider for testing structure-preservation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a mock that echoes the payload unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Create a mock that strips all markup from the payload
    pub fn tag_stripping() -> Self {
        Self::new(MockBehavior::TagStripping)
    }

    /// Create a mock that renames `<p>` pairs to `<div>`
    pub fn tag_renaming() -> Self {
        Self::new(MockBehavior::TagRenaming)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        if let Some(generator) = self.custom_response {
            return Ok(MockResponse {
                text: generator(&request),
            });
        }

        match self.behavior {
            MockBehavior::Identity => Ok(MockResponse { text: request.text }),

            MockBehavior::TagStripping => Ok(MockResponse {
                text: strip_tags(&request.text),
            }),

            MockBehavior::TagRenaming => Ok(MockResponse {
                text: request.text.replace("<p>", "<div>").replace("</p>", "</div>"),
            }),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(MockResponse {
                text: String::new(),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(MockResponse { text: request.text })
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(MockResponse { text: request.text })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
