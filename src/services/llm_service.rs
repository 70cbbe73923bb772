//! LLM 服务 - 业务能力层
//!
//! 只负责"把 prompt 变成结构化题解"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点（`OPENAI_BASE_URL`）和模型
//! - 通过 `response_format = json_schema` 约束输出结构

use std::sync::Arc;

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, LlmError};
use crate::models::editorial::{EditorialContent, SCHEMA_NAME};
use crate::services::prompt_builder::SYSTEM_MESSAGE;
use crate::utils::RetryPolicy;

/// 结构化补全能力
///
/// 一次调用 = 一次请求，重试由 [`LlmService`] 负责
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// 发送 prompt，返回已通过 schema 校验的结构化内容
    async fn complete(&self, prompt: &str) -> AppResult<EditorialContent>;

    /// 模型名（仅用于日志）
    fn model_name(&self) -> &str;
}

/// OpenAI 兼容接口的实现
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
}

impl OpenAiProvider {
    /// 根据配置创建客户端，缺少 API 密钥时返回配置错误
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config
            .llm_api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)?;

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base_url) = &config.llm_api_base_url {
            debug!("使用自定义 OpenAI 端点: {}", base_url);
            openai_config = openai_config.with_api_base(base_url);
        }

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.temperature,
        })
    }

    async fn send(&self, prompt: &str) -> Result<String, AppError> {
        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_MESSAGE)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let mut request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(self.temperature)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        request.response_format = Some(
            serde_json::from_value(json!({
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "schema": EditorialContent::json_schema(),
                    "strict": true
                }
            }))
            .map_err(LlmError::from)?,
        );

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        if let Some(reason) = message.refusal {
            return Err(LlmError::Refused {
                model: self.model_name.clone(),
                reason,
            }
            .into());
        }

        message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                LlmError::EmptyContent {
                    model: self.model_name.clone(),
                }
                .into()
            })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> AppResult<EditorialContent> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", prompt.chars().count());

        let content = self.send(prompt).await?;
        let editorial = EditorialContent::from_json(&content)?;

        debug!("LLM API 调用成功，{} 种解法", editorial.approaches.len());
        Ok(editorial)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// 未配置 API 密钥时使用（仅 dry run 允许走到这里）
///
/// 每次调用都返回配置错误，使对应题目计为失败
pub struct UnconfiguredProvider {
    model_name: String,
}

impl UnconfiguredProvider {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for UnconfiguredProvider {
    async fn complete(&self, _prompt: &str) -> AppResult<EditorialContent> {
        Err(ConfigError::MissingApiKey.into())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// LLM 服务
///
/// 职责：
/// - 持有 provider，带指数退避重试地调用
/// - 重试耗尽后把最后一次错误交给调用方
/// - 配置错误不重试
#[derive(Clone)]
pub struct LlmService {
    provider: Arc<dyn CompletionProvider>,
    retry: RetryPolicy,
}

impl LlmService {
    pub fn new(provider: Arc<dyn CompletionProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    /// 根据配置创建服务
    ///
    /// 缺少 API 密钥：正常模式下直接报错；dry run 模式下只警告
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let retry = RetryPolicy::new(config.max_retries, config.retry_delay);
        let provider: Arc<dyn CompletionProvider> = match OpenAiProvider::from_config(config) {
            Ok(provider) => Arc::new(provider),
            Err(ConfigError::MissingApiKey) if config.dry_run => {
                warn!("⚠️ OPENAI_API_KEY 未设置，dry run 中的生成请求都会失败");
                Arc::new(UnconfiguredProvider::new(&config.llm_model_name))
            }
            Err(e) => return Err(e),
        };
        Ok(Self::new(provider, retry))
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// 生成结构化题解（带重试）
    pub async fn generate(&self, prompt: &str) -> AppResult<EditorialContent> {
        self.retry
            .run_if(|_| self.provider.complete(prompt), |e| !e.is_config())
            .await
    }
}
