//! 数据库实体（sea-orm）
//!
//! 表结构由评测站 Web 应用维护，这里只声明本工具读写到的列。

pub mod comment;
pub mod comment_vote;
pub mod language;
pub mod problem;
pub mod profile;
pub mod solution;
pub mod solution_author;
pub mod submission;
pub mod submission_source;
pub mod user;
