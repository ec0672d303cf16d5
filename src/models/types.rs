use thiserror::Error;

/// Failure kinds at the generation boundary
///
/// These never reach the session store as errors: [`generate_or_warn`] turns
/// every variant into a human-readable warning answer.
///
/// [`generate_or_warn`]: super::generate_or_warn
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no API key configured (set {env_var})")]
    MissingCredential { env_var: String },

    #[error("authorization failed: {0}")]
    Unauthorized(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("prompt was blocked: {0}")]
    Blocked(String),

    #[error("empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GenerationError::Malformed(err.to_string())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

/// Generation parameters sent along with every prompt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.max_output_tokens.is_none()
    }
}
