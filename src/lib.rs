//! # Editorial Generator
//!
//! 用 LLM 为评测站题目批量生成结构化题解的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 数据库连接与建表
//! - `entity/` - sea-orm 实体，对应评测站的数据表
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个题目
//! - `SolutionSelector` - 挑选 AC 代码
//! - `validator` / `prompt_builder` / `renderer` - 纯函数能力
//! - `LlmService` - 结构化生成（带指数退避重试）
//! - `EditorialWriter` - 事务写入题解
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `ProblemCtx` - 上下文封装（序号 + 题号）
//! - `ProblemFlow` - 流程编排（select → validate → generate → save）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量题目处理器，管理资源和统计
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{EditorialContent, SelectedSolution};
pub use orchestrator::{App, BatchStats};
pub use workflow::{ProblemCtx, ProblemFlow, ProblemOutcome};
