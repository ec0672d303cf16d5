// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod advice;
mod factory;
mod gemini;
mod traits;
mod types;

// Public re-exports - the ONLY way to access model functionality
pub use advice::{advice_prompt, generate_or_warn, is_warning, warning_text};
pub use factory::ModelFactory;
pub use gemini::GeminiModel;
pub use traits::Generator;
pub use types::{GenerationConfig, GenerationError};

#[cfg(test)]
pub use traits::MockGenerator;
