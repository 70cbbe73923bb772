//! 选中的 AC 代码

/// 代码作者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// judge_profile.id
    pub profile_id: i32,
    /// auth_user.username，缺失时为 None
    pub username: Option<String>,
}

/// 提交所用语言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    pub id: i32,
    /// 完整名称，如 "C++17"
    pub name: String,
    /// 通用名称，如 "C++"
    pub common_name: String,
}

/// 被选中用来生成题解的一份 AC 提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSolution {
    pub submission_id: i32,
    pub author: Author,
    pub language: Option<LanguageInfo>,
    /// 源代码，未找到 judge_submissionsource 记录时为 None
    pub source: Option<String>,
}

impl SelectedSolution {
    /// 用于日志和 prompt 的语言名
    pub fn language_label(&self) -> &str {
        self.language
            .as_ref()
            .map(|l| l.common_name.as_str())
            .unwrap_or("Unknown")
    }

    /// 用于日志和 prompt 的作者名
    pub fn author_label(&self) -> &str {
        self.author.username.as_deref().unwrap_or("Unknown")
    }
}
