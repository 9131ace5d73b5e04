pub mod analysis;
pub mod interpreter;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use analysis::{analyze, AnalyzeError};
pub use prompt::PromptBuilder;
