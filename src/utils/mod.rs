pub mod logging;
pub mod retry;
pub mod text;

pub use retry::RetryPolicy;
pub use text::{code_fence_language, truncate_source};
