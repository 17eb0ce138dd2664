//! Request types for prompt generation.

use serde::{Deserialize, Serialize};

/// A generation request forwarded to the model runner.
///
/// # Examples
///
/// ```
/// use raffaello_core::GenerateRequest;
///
/// let request = GenerateRequest::builder()
///     .prompt("Say hello")
///     .build()
///     .expect("Valid GenerateRequest");
///
/// assert_eq!(request.prompt(), "Say hello");
/// assert!(request.model().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// The text prompt to send to the model
    prompt: String,
    /// Model identifier; omitted selects the configured default
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}
