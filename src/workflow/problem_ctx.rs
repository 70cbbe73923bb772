//! 题目处理上下文
//!
//! 封装"我正在处理本批的第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct ProblemCtx {
    /// 在本批中的序号（从1开始）
    pub index: usize,

    /// 本批题目总数
    pub total: usize,

    /// 题号
    pub code: String,
}

impl ProblemCtx {
    pub fn new(index: usize, total: usize, code: impl Into<String>) -> Self {
        Self {
            index,
            total,
            code: code.into(),
        }
    }
}

impl Display for ProblemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题目 {}/{} {}]", self.index, self.total, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ProblemCtx::new(2, 5, "ABC001").to_string(), "[题目 2/5 ABC001]");
    }
}
