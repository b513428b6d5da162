//! LLM-written narrative: weekly power rankings and matchup predictions.
//!
//! Both generators fetch the league, build a prompt, make exactly one
//! completion call and validate the answer before writing anything.

pub mod llm;
pub mod matchup_predictions;
pub mod power_rankings;
pub mod prompts;
pub mod schema;

pub use llm::{CompletionRequest, LlmClient};
pub use matchup_predictions::{MatchupPredictions, generate_matchup_predictions};
pub use power_rankings::generate_power_rankings;

/// Options shared by both generators.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeOptions {
    pub model: String,
    pub enable_web: bool,
}
