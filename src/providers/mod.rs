/*!
 * Provider implementations for the external translation service.
 *
 * - GoogleTranslate: public Google Translate web endpoint
 * - MockProvider: deterministic provider for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all providers at the request/response level
///
/// This trait defines the interface that all provider implementations must follow,
/// exposing their native request and response types.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Text to text translation, addressed by two-letter language codes
///
/// Object-safe view of a provider used by the translation pipeline.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Check that the service answers, by translating a single word
    async fn check_connection(&self) -> Result<(), ProviderError> {
        self.translate("hello", "en", "fr").await.map(|_| ())
    }
}

pub mod google;
pub mod mock;
