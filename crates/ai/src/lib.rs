//! `shopadvisor-ai`
//!
//! **Responsibility:** text-generation capability boundary.
//!
//! - [`TextGenerator`] is the narrow interface the readiness gate and the
//!   request handler depend on.
//! - [`GeminiClient`] talks to the Generative Language API over HTTP.
//! - [`CannedTextGenerator`] is the offline stand-in used in stub mode.
//! - [`prompt`] builds prompts and the templated fallback advice.

pub mod canned;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;

pub use canned::CannedTextGenerator;
pub use error::GenerationError;
pub use gemini::{GeminiClient, GeminiConfig};
pub use generator::{GenerationOptions, TextGenerator};
