//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ### `batch_processor` - 批量题目处理器
//! - 管理应用生命周期（配置校验、连接数据库、解析管理员）
//! - 查询待处理题目
//! - 严格串行地逐题调用 `ProblemFlow`
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Problem>)
//!     ↓
//! workflow::ProblemFlow (处理单个 Problem)
//!     ↓
//! services (能力层：select / validate / prompt / llm / render / write)
//!     ↓
//! infrastructure (基础设施：数据库连接)
//! ```

pub mod batch_processor;

pub use batch_processor::{App, BatchStats};
