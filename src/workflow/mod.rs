pub mod problem_ctx;
pub mod problem_flow;

pub use problem_ctx::ProblemCtx;
pub use problem_flow::{ProblemFlow, ProblemOutcome};
