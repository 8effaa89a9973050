use async_trait::async_trait;

use shopadvisor_core::CapabilityError;

use crate::error::GenerationError;
use crate::generator::{GenerationOptions, TextGenerator};

/// Offline generator for stub mode and local development.
///
/// Always initializes successfully. Output is deterministic: it echoes the
/// candidate product lines from the prompt behind a fixed preamble.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedTextGenerator;

impl CannedTextGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for CannedTextGenerator {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn initialize(&self) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String, GenerationError> {
        let picks: Vec<&str> = prompt.lines().filter(|l| l.starts_with("- ")).collect();
        if picks.is_empty() {
            return Ok("Nothing in the catalog matches yet. Try widening your budget or using a broader product name.".to_string());
        }

        let mut text = String::from("Here is a quick comparison of what fits your request:\n");
        for line in picks {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str("The first option is usually the safest choice.");
        Ok(text)
    }
}
