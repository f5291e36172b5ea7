use async_trait::async_trait;

use super::artifact::Artifact;
use super::error::ConvertError;
use super::request::ConversionRequest;

/// Anything that can turn a [`ConversionRequest`] into an [`Artifact`]
///
/// Each call is exactly one request: implementations must not retry.
#[async_trait]
pub trait ConversionBackend: Send + Sync {
    async fn submit(&self, request: ConversionRequest) -> Result<Artifact, ConvertError>;
}
