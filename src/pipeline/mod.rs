pub mod analysis;
pub mod prompt;
pub mod refinement;

pub use analysis::{analyze_repository, AnalysisPipeline};
pub use prompt::build_refinement_prompt;
pub use refinement::{validate_and_merge, validate_refinement, RefinementCandidate, RefinementError};
