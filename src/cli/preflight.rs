//! Pre-flight checks before operations that would otherwise fail midway.

use crate::error::{FolioError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Agent runs require the chat API key.
    Agent,
    /// Local analytics have no external requirements.
    Analyze,
}

/// Run pre-flight checks for the given operation.
///
/// The missing-credential case is the one fatal precondition in Folio: the
/// agent loop is never started without it.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Agent => check_api_key(),
        Operation::Analyze => Ok(()),
    }
}

/// Check if the OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(FolioError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(FolioError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}
