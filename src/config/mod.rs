//! Configuration management.

mod prompts;
mod settings;

pub use prompts::{load_system_prompt, DEFAULT_SYSTEM_PROMPT};
pub use settings::{AgentSettings, DatasetSettings, GeneralSettings, Settings};
