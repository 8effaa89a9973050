use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use shopadvisor_core::CapabilityError;

use crate::error::GenerationError;

/// Sampling knobs forwarded to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

/// External text-generation capability.
///
/// `initialize` is called at most once per process by the readiness gate;
/// `generate` is only called after the gate reported the capability ready.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    /// Short name used in logs and health output.
    fn name(&self) -> &'static str;

    /// Validate the credential, connect, and run one lightweight probe.
    async fn initialize(&self) -> Result<(), CapabilityError>;

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, GenerationError>;
}
