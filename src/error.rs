use sea_orm::DbErr;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
    /// 数据库错误
    #[error("数据库错误: {0}")]
    Database(#[from] DbErr),
}

/// 配置错误
///
/// 属于致命错误：在任何网络或数据库操作之前报告
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未设置 API 密钥
    #[error("环境变量 OPENAI_API_KEY 未设置，请执行: export OPENAI_API_KEY='sk-...'")]
    MissingApiKey,
    /// 未设置数据库地址
    #[error("未提供数据库地址，请设置 DATABASE_URL 或使用 --database-url")]
    MissingDatabaseUrl,
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 严格模式下找不到指定的管理员账号
    #[error("找不到管理员账号 '{username}'（或该账号没有 profile）")]
    AdminNotFound { username: String },
}

/// LLM 服务错误
///
/// 所有变体都视为可重试的调用失败
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 模型拒绝回答
    #[error("LLM拒绝生成 (模型: {model}): {reason}")]
    Refused { model: String, reason: String },
    /// 返回内容不是合法 JSON
    #[error("LLM返回内容无法解析为JSON: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
    /// 返回内容不满足输出 schema
    #[error("LLM返回内容不符合schema: {reason}")]
    SchemaViolation { reason: String },
}

/// 业务逻辑错误
#[derive(Debug, Error)]
pub enum BusinessError {
    /// 题目不存在或未公开
    #[error("题目 '{code}' 不存在或未公开")]
    ProblemNotFound { code: String },
    /// 题目已有题解
    #[error("题目 '{code}' 已有题解")]
    EditorialExists { code: String },
}

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 是否为配置错误（配置错误不重试）
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
