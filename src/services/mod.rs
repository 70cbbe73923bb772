pub mod editorial_writer;
pub mod llm_service;
pub mod problem_repository;
pub mod prompt_builder;
pub mod renderer;
pub mod solution_selector;
pub mod validator;
pub mod vote_backfill;

pub use editorial_writer::{resolve_admin_profile, AdminProfile, EditorialWriter, SaveOutcome};
pub use llm_service::{CompletionProvider, LlmService, OpenAiProvider, UnconfiguredProvider};
pub use problem_repository::{editorial_exists, find_target_problems, TargetSelection};
pub use solution_selector::SolutionSelector;
pub use vote_backfill::backfill_comment_votes;
